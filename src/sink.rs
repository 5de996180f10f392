//! Sink contract: the callback target a push source drives.
//!
//! A sink lives on whichever thread runs the pipeline and is owned by it
//! exclusively, so implementations keep plain mutable state.

/// Receives successive values pushed by a [`Source`](crate::source::Source).
pub trait Sink<T> {
    /// Process one value.
    ///
    /// A well-behaved source checks [`needs_more`](Sink::needs_more) before
    /// producing, but one final in-flight value may still arrive after
    /// saturation; implementations must treat such calls as no-ops.
    fn accept(&mut self, value: T);

    /// Whether this sink wants further values.
    ///
    /// Monotonic: once this returns `false` it stays `false` for the
    /// lifetime of the sink.
    fn needs_more(&self) -> bool {
        true
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for &mut S {
    fn accept(&mut self, value: T) {
        (**self).accept(value)
    }

    fn needs_more(&self) -> bool {
        (**self).needs_more()
    }
}

impl<T, S: Sink<T> + ?Sized> Sink<T> for Box<S> {
    fn accept(&mut self, value: T) {
        (**self).accept(value)
    }

    fn needs_more(&self) -> bool {
        (**self).needs_more()
    }
}

/// Sink that feeds every value to a closure; never saturates.
pub struct FnSink<F> {
    f: F,
}

/// Create a sink from a plain `FnMut(T)` closure.
pub fn sink_fn<T, F>(f: F) -> FnSink<F>
where
    F: FnMut(T),
{
    FnSink { f }
}

impl<T, F> Sink<T> for FnSink<F>
where
    F: FnMut(T),
{
    fn accept(&mut self, value: T) {
        (self.f)(value)
    }
}
