//! rill-stream - a push-based lazy streaming library
//!
//! Pipelines are built from a push-style [`Source`], composed through the
//! sink combinators behind the [`StreamExt`] facade, and terminated by a
//! [`Collector`](collector::Collector). The pull bridge in [`pull`] runs a
//! source on a dedicated producer thread and hands values across a
//! rendezvous-channel pair, exposing the stream as an ordinary blocking
//! iterator.
//!
//! ```
//! use rill_stream::{from_iter, StreamExt};
//!
//! let mut doubled = from_iter(vec![1, 2, 3, 4]).map(|n| n * 2).filter(|n| *n > 4);
//! assert_eq!(doubled.to_vec()?, vec![6, 8]);
//! # Ok::<(), rill_stream::StreamError>(())
//! ```
//!
//! Pulling moves the pipeline onto its own thread:
//!
//! ```
//! use rill_stream::{from_iter, StreamExt};
//!
//! let values: Vec<i32> = from_iter(1..=3).pull().collect::<Result<_, _>>()?;
//! assert_eq!(values, vec![1, 2, 3]);
//! # Ok::<(), rill_stream::StreamError>(())
//! ```

pub mod collector;
pub mod combinator;
pub mod error;
pub mod pull;
pub mod sink;
pub mod source;
pub mod stream;

// Re-export the whole surface at the crate root
pub use error::{StreamError, StreamResult};
pub use sink::{sink_fn, FnSink, Sink};
pub use source::Source;

pub use combinator::{
    filtering, limiting, mapping, skipping, Filtering, Limiting, Mapping, Skipping,
};

pub use collector::{
    counting, find_first, joining, max, max_by, min, min_by, reducing, reducing_with, to_map,
    to_set, to_vec, Collector, Counting, FindFirst, Joining, MaxBy, MinBy, Reducing, ReducingWith,
    ToMap, ToSet, ToVec,
};

pub use stream::{
    empty, from_iter, from_push, once, repeat, repeat_with, try_unfold, unfold, Empty, Filter,
    FlatMap, Flatten, Iter, Limit, Map, Once, PushFn, Repeat, RepeatWith, Skip, StreamExt,
    TryUnfold, Unfold,
};

pub use pull::{pull, pull_with, PullConfig, PullIterator};
