//! Stream facade: combinators, terminal operations, and source
//! constructors over the push [`Source`](crate::source::Source) contract.
//!
//! Pipelines stay lazy: `map`/`filter`/`limit`/`skip` only record
//! configuration, and the matching sink combinator is installed in front of
//! the caller's sink when a terminal operation drains the stream.

pub mod advanced;
pub mod constructors;
pub mod core;

// Re-export core types
pub use self::core::{Filter, Limit, Map, Skip, StreamExt};

// Re-export flattening adapters
pub use self::advanced::{FlatMap, Flatten};

// Re-export constructors
pub use self::constructors::{
    empty, from_iter, from_push, once, repeat, repeat_with, try_unfold, unfold, Empty, Iter, Once,
    PushFn, Repeat, RepeatWith, TryUnfold, Unfold,
};
