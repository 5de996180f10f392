//! Source contract: push-style producers.

use crate::error::StreamResult;
use crate::sink::Sink;

/// A push-style producer of values.
///
/// A source pushes elements into a sink in source-determined order until it
/// is exhausted or the sink stops asking for more. This single method is the
/// abstraction surface everything else in the crate builds on: combinators
/// wrap the sink, collectors terminate it, and the pull bridge runs it on a
/// dedicated thread.
pub trait Source {
    type Item;

    /// Push values into `sink` until exhausted or the sink saturates.
    ///
    /// Taking `&mut self` means re-running a terminal operation re-invokes
    /// the source from scratch; sources backed by single-use state own the
    /// consequences of being run twice.
    fn for_each<S>(&mut self, sink: &mut S) -> StreamResult<()>
    where
        S: Sink<Self::Item>;
}
