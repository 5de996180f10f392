//! Source constructors.
//!
//! Each constructor is a small struct plus a free function. Constructors
//! that need per-run state (`from_iter`, `unfold`, `try_unfold`) require
//! `Clone` on that state and clone it per run, so re-running a terminal
//! operation re-invokes the source from scratch.

use std::marker::PhantomData;

use crate::error::StreamResult;
use crate::sink::Sink;
use crate::source::Source;

/// Stream with no elements.
#[derive(Clone)]
pub struct Empty<T> {
    _marker: PhantomData<T>,
}

/// Create a stream that completes immediately.
pub fn empty<T>() -> Empty<T> {
    Empty {
        _marker: PhantomData,
    }
}

impl<T> Source for Empty<T> {
    type Item = T;

    fn for_each<S>(&mut self, _sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        Ok(())
    }
}

/// Stream of exactly one element.
#[derive(Clone)]
pub struct Once<T> {
    value: T,
}

/// Emit a single element.
pub fn once<T: Clone>(value: T) -> Once<T> {
    Once { value }
}

impl<T: Clone> Source for Once<T> {
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        if sink.needs_more() {
            sink.accept(self.value.clone());
        }
        Ok(())
    }
}

/// Stream over a cloneable collection of values.
#[derive(Clone)]
pub struct Iter<I> {
    iter: I,
}

/// Create a stream from anything iterable.
pub fn from_iter<I>(iter: I) -> Iter<I>
where
    I: IntoIterator + Clone,
{
    Iter { iter }
}

impl<I> Source for Iter<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<I::Item>,
    {
        let mut values = self.iter.clone().into_iter();
        // Saturation is checked before the next element is even produced.
        while sink.needs_more() {
            match values.next() {
                Some(value) => sink.accept(value),
                None => break,
            }
        }
        Ok(())
    }
}

/// Infinite stream of one repeated value.
#[derive(Clone)]
pub struct Repeat<T> {
    value: T,
}

/// Repeat a value until the sink saturates.
pub fn repeat<T: Clone>(value: T) -> Repeat<T> {
    Repeat { value }
}

impl<T: Clone> Source for Repeat<T> {
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        while sink.needs_more() {
            sink.accept(self.value.clone());
        }
        Ok(())
    }
}

/// Infinite stream of values produced by a closure.
#[derive(Clone)]
pub struct RepeatWith<F> {
    f: F,
}

/// Call `f` for each value until the sink saturates.
pub fn repeat_with<T, F>(f: F) -> RepeatWith<F>
where
    F: FnMut() -> T,
{
    RepeatWith { f }
}

impl<T, F> Source for RepeatWith<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        while sink.needs_more() {
            sink.accept((self.f)());
        }
        Ok(())
    }
}

/// Generator stream: a seed plus a step function.
#[derive(Clone)]
pub struct Unfold<St, F> {
    seed: St,
    f: F,
}

/// Generate values from `seed`, stopping when `f` returns `None`.
pub fn unfold<St, T, F>(seed: St, f: F) -> Unfold<St, F>
where
    St: Clone,
    F: FnMut(St) -> Option<(T, St)>,
{
    Unfold { seed, f }
}

impl<St, T, F> Source for Unfold<St, F>
where
    St: Clone,
    F: FnMut(St) -> Option<(T, St)>,
{
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        let mut state = self.seed.clone();
        while sink.needs_more() {
            match (self.f)(state) {
                Some((value, next)) => {
                    state = next;
                    sink.accept(value);
                }
                None => break,
            }
        }
        Ok(())
    }
}

/// Fallible generator stream.
#[derive(Clone)]
pub struct TryUnfold<St, F> {
    seed: St,
    f: F,
}

/// Generate values from `seed`; a step returning `Err` aborts the stream
/// and the error propagates to the terminal operation (or, under pull
/// usage, to the consumer).
pub fn try_unfold<St, T, F>(seed: St, f: F) -> TryUnfold<St, F>
where
    St: Clone,
    F: FnMut(St) -> StreamResult<Option<(T, St)>>,
{
    TryUnfold { seed, f }
}

impl<St, T, F> Source for TryUnfold<St, F>
where
    St: Clone,
    F: FnMut(St) -> StreamResult<Option<(T, St)>>,
{
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        let mut state = self.seed.clone();
        while sink.needs_more() {
            match (self.f)(state)? {
                Some((value, next)) => {
                    state = next;
                    sink.accept(value);
                }
                None => break,
            }
        }
        Ok(())
    }
}

/// Source built from a bare push closure.
#[derive(Clone)]
pub struct PushFn<T, F> {
    f: F,
    _marker: PhantomData<T>,
}

/// Create a stream from any single-method push producer: a closure that
/// drives the sink it is handed.
pub fn from_push<T, F>(f: F) -> PushFn<T, F>
where
    F: FnMut(&mut dyn Sink<T>) -> StreamResult<()>,
{
    PushFn {
        f,
        _marker: PhantomData,
    }
}

impl<T, F> Source for PushFn<T, F>
where
    F: FnMut(&mut dyn Sink<T>) -> StreamResult<()>,
{
    type Item = T;

    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<T>,
    {
        let sink: &mut dyn Sink<T> = sink;
        (self.f)(sink)
    }
}
