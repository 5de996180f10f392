//! Core stream facade: the `StreamExt` trait and the basic adapters.
//!
//! Adapters hold configuration only; the matching sink combinator is built
//! fresh inside `for_each`, in front of the caller's sink, so a stream can
//! run a terminal operation more than once and every run starts from
//! scratch.

use std::marker::PhantomData;

use crate::collector::{self, Collector};
use crate::combinator::{filtering, limiting, mapping, skipping};
use crate::error::StreamResult;
use crate::pull::{self, PullConfig, PullIterator};
use crate::sink::{sink_fn, Sink};
use crate::source::Source;

use super::advanced::{FlatMap, Flatten};

/// Extension trait providing combinators and terminal operations on any
/// [`Source`].
pub trait StreamExt: Source + Sized {
    /// Transform every element with `f`.
    fn map<R, F>(self, f: F) -> Map<Self, R, F>
    where
        F: FnMut(Self::Item) -> R,
    {
        Map {
            source: self,
            f,
            _marker: PhantomData,
        }
    }

    /// Keep only elements satisfying `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        Filter {
            source: self,
            predicate,
        }
    }

    /// Pass through at most `limit` elements, then saturate.
    fn limit(self, limit: u64) -> Limit<Self> {
        Limit {
            source: self,
            limit,
        }
    }

    /// Discard the first `offset` elements.
    fn skip(self, offset: u64) -> Skip<Self> {
        Skip {
            source: self,
            offset,
        }
    }

    /// Replace every element with the elements of the sub-stream `f` builds
    /// from it.
    fn flat_map<Sub, F>(self, f: F) -> FlatMap<Self, Sub, F>
    where
        Sub: Source,
        F: FnMut(Self::Item) -> Sub,
    {
        FlatMap::new(self, f)
    }

    /// Inline a stream of streams.
    fn flatten(self) -> Flatten<Self>
    where
        Self::Item: Source,
    {
        Flatten::new(self)
    }

    /// Drain this stream into `collector` and return its finished value.
    fn collect_with<C>(&mut self, mut collector: C) -> StreamResult<C::Output>
    where
        C: Collector<Self::Item>,
    {
        self.for_each(&mut collector)?;
        Ok(collector.finish())
    }

    /// Collect every element into a `Vec`.
    fn to_vec(&mut self) -> StreamResult<Vec<Self::Item>> {
        self.collect_with(collector::to_vec())
    }

    /// Count the elements.
    fn count(&mut self) -> StreamResult<u64> {
        self.collect_with(collector::counting())
    }

    /// Fold the elements into `seed` with `op`.
    fn fold<R, F>(&mut self, seed: R, op: F) -> StreamResult<R>
    where
        F: FnMut(R, Self::Item) -> R,
    {
        self.collect_with(collector::reducing(seed, op))
    }

    /// Reduce the elements with `op`; `None` on an empty stream.
    fn reduce<F>(&mut self, op: F) -> StreamResult<Option<Self::Item>>
    where
        F: FnMut(Self::Item, Self::Item) -> Self::Item,
    {
        self.collect_with(collector::reducing_with(op))
    }

    /// First element, if any; the source is not asked for a second one.
    fn find_first(&mut self) -> StreamResult<Option<Self::Item>> {
        self.collect_with(collector::find_first())
    }

    /// Smallest element by natural order.
    fn min(&mut self) -> StreamResult<Option<Self::Item>>
    where
        Self::Item: Ord,
    {
        self.collect_with(collector::min())
    }

    /// Largest element by natural order.
    fn max(&mut self) -> StreamResult<Option<Self::Item>>
    where
        Self::Item: Ord,
    {
        self.collect_with(collector::max())
    }

    /// Run `f` for every element.
    fn each<F>(&mut self, f: F) -> StreamResult<()>
    where
        F: FnMut(Self::Item),
    {
        let mut sink = sink_fn(f);
        self.for_each(&mut sink)
    }

    /// Move this stream onto a dedicated producer thread and pull values
    /// from it through a blocking iterator.
    fn pull(self) -> PullIterator<Self::Item>
    where
        Self: Send + 'static,
        Self::Item: Send + 'static,
    {
        pull::pull(self)
    }

    /// Like [`pull`](StreamExt::pull), with explicit worker configuration.
    fn pull_with(self, config: PullConfig) -> PullIterator<Self::Item>
    where
        Self: Send + 'static,
        Self::Item: Send + 'static,
    {
        pull::pull_with(self, config)
    }
}

impl<S: Source + Sized> StreamExt for S {}

/// Stream adapter produced by [`StreamExt::map`].
pub struct Map<S, R, F> {
    source: S,
    f: F,
    _marker: PhantomData<R>,
}

impl<S, R, F> Source for Map<S, R, F>
where
    S: Source,
    F: FnMut(S::Item) -> R,
{
    type Item = R;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<R>,
    {
        let mut mapped = mapping(&mut *sink, &mut self.f);
        self.source.for_each(&mut mapped)
    }
}

impl<S, R, F> Map<S, R, F>
where
    S: Source,
    F: FnMut(S::Item) -> R,
{
    /// Compose a further function into this map; stays a single adapter
    /// with one composed closure.
    pub fn map<R2, G>(self, mut g: G) -> Map<S, R2, impl FnMut(S::Item) -> R2>
    where
        G: FnMut(R) -> R2,
    {
        let mut f = self.f;
        Map {
            source: self.source,
            f: move |value| g(f(value)),
            _marker: PhantomData,
        }
    }
}

/// Stream adapter produced by [`StreamExt::filter`].
pub struct Filter<S, P> {
    source: S,
    predicate: P,
}

impl<S, P> Source for Filter<S, P>
where
    S: Source,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<S::Item>,
    {
        let mut filtered = filtering(&mut *sink, &mut self.predicate);
        self.source.for_each(&mut filtered)
    }
}

impl<S, P> Filter<S, P>
where
    S: Source,
    P: FnMut(&S::Item) -> bool,
{
    /// Conjoin a further predicate; stays a single adapter.
    pub fn filter<P2>(self, mut other: P2) -> Filter<S, impl FnMut(&S::Item) -> bool>
    where
        P2: FnMut(&S::Item) -> bool,
    {
        let mut first = self.predicate;
        Filter {
            source: self.source,
            predicate: move |value: &S::Item| first(value) && other(value),
        }
    }
}

/// Stream adapter produced by [`StreamExt::limit`].
pub struct Limit<S> {
    source: S,
    limit: u64,
}

impl<S> Source for Limit<S>
where
    S: Source,
{
    type Item = S::Item;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<S::Item>,
    {
        let mut limited = limiting(&mut *sink, self.limit);
        self.source.for_each(&mut limited)
    }
}

impl<S> Limit<S> {
    /// Tighten the bound; the smaller of the two limits applies.
    pub fn limit(self, limit: u64) -> Limit<S> {
        Limit {
            source: self.source,
            limit: self.limit.min(limit),
        }
    }
}

/// Stream adapter produced by [`StreamExt::skip`].
pub struct Skip<S> {
    source: S,
    offset: u64,
}

impl<S> Source for Skip<S>
where
    S: Source,
{
    type Item = S::Item;

    fn for_each<K>(&mut self, sink: &mut K) -> StreamResult<()>
    where
        K: Sink<S::Item>,
    {
        let mut skipped = skipping(&mut *sink, self.offset);
        self.source.for_each(&mut skipped)
    }
}

impl<S> Skip<S> {
    /// Extend the skipped prefix; the offsets add up.
    pub fn skip(self, offset: u64) -> Skip<S> {
        Skip {
            source: self.source,
            offset: self.offset.saturating_add(offset),
        }
    }
}
