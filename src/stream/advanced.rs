//! Flattening adapters: `flat_map` and `flatten`.

use std::marker::PhantomData;

use crate::error::{StreamError, StreamResult};
use crate::sink::Sink;
use crate::source::Source;

/// Stream adapter produced by [`StreamExt::flat_map`](super::StreamExt::flat_map).
pub struct FlatMap<S, Sub, F> {
    source: S,
    f: F,
    _marker: PhantomData<Sub>,
}

impl<S, Sub, F> FlatMap<S, Sub, F> {
    pub(crate) fn new(source: S, f: F) -> Self {
        FlatMap {
            source,
            f,
            _marker: PhantomData,
        }
    }
}

impl<S, Sub, F> Source for FlatMap<S, Sub, F>
where
    S: Source,
    Sub: Source,
    F: FnMut(S::Item) -> Sub,
{
    type Item = Sub::Item;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<Sub::Item>,
    {
        let mut flattening = Flattening {
            f: &mut self.f,
            downstream: sink,
            failed: None,
        };
        self.source.for_each(&mut flattening)?;
        match flattening.failed {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Sink that runs each sub-stream against the original downstream sink, so
/// a downstream limit terminates mid-sub-stream rather than only between
/// sub-streams. A sub-stream failure is stashed and the sink saturates; the
/// owning adapter re-raises it once the outer source returns.
struct Flattening<'a, F, K> {
    f: &'a mut F,
    downstream: &'a mut K,
    failed: Option<StreamError>,
}

impl<T, Sub, F, K> Sink<T> for Flattening<'_, F, K>
where
    Sub: Source,
    F: FnMut(T) -> Sub,
    K: Sink<Sub::Item>,
{
    fn accept(&mut self, value: T) {
        if self.failed.is_some() {
            return;
        }
        let mut sub = (self.f)(value);
        if let Err(err) = sub.for_each(&mut *self.downstream) {
            self.failed = Some(err);
        }
    }

    fn needs_more(&self) -> bool {
        self.failed.is_none() && self.downstream.needs_more()
    }
}

/// Stream adapter produced by [`StreamExt::flatten`](super::StreamExt::flatten).
pub struct Flatten<S> {
    source: S,
}

impl<S> Flatten<S> {
    pub(crate) fn new(source: S) -> Self {
        Flatten { source }
    }
}

impl<S> Source for Flatten<S>
where
    S: Source,
    S::Item: Source,
{
    type Item = <S::Item as Source>::Item;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<Self::Item>,
    {
        let mut inlining = Inlining {
            downstream: sink,
            failed: None,
        };
        self.source.for_each(&mut inlining)?;
        match inlining.failed {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct Inlining<'a, K> {
    downstream: &'a mut K,
    failed: Option<StreamError>,
}

impl<Sub, K> Sink<Sub> for Inlining<'_, K>
where
    Sub: Source,
    K: Sink<Sub::Item>,
{
    fn accept(&mut self, mut sub: Sub) {
        if self.failed.is_some() {
            return;
        }
        if let Err(err) = sub.for_each(&mut *self.downstream) {
            self.failed = Some(err);
        }
    }

    fn needs_more(&self) -> bool {
        self.failed.is_none() && self.downstream.needs_more()
    }
}
