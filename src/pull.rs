//! Push→pull bridge.
//!
//! Runs a [`Source`] on its own producer thread and exposes it as a
//! blocking, closeable iterator. Consumer and producer meet on two
//! zero-capacity rendezvous channels: REQUEST carries `Fetch`/`Close`
//! towards the producer, REPLY carries exactly one answer per request back.
//! A rendezvous send blocks until the matching receive (and vice versa), so
//! the two sides alternate in lock-step and at most one value is ever in
//! flight.
//!
//! Producer protocol: the worker's sink blocks in `accept` until a request
//! arrives. `Fetch` is answered with the value; `Close` permanently
//! saturates the sink and is acknowledged with `Closed`. Once the source
//! returns, the worker answers every further `Fetch` with the captured
//! source error exactly once, then `Closed` forever; `Close` is
//! acknowledged and ends the worker.
//!
//! Cancellation is cooperative: `close` cannot preempt a source blocked in
//! unrelated work. It takes effect at the next `accept` boundary or when
//! the source returns naturally.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::error::{StreamError, StreamResult};
use crate::sink::Sink;
use crate::source::Source;

/// What the consumer asks of the producer.
enum Request {
    Fetch,
    Close,
}

/// The producer's answer, one per request.
enum Reply<T> {
    Value(T),
    Closed,
    Failed(StreamError),
}

/// Configuration for a pulled stream's worker thread.
#[derive(Debug, Clone)]
pub struct PullConfig {
    /// Name given to the producer thread.
    pub thread_name: String,
}

impl Default for PullConfig {
    fn default() -> Self {
        PullConfig {
            thread_name: "rill-pull".to_string(),
        }
    }
}

/// Run `source` on a dedicated producer thread and pull from it.
pub fn pull<Src>(source: Src) -> PullIterator<Src::Item>
where
    Src: Source + Send + 'static,
    Src::Item: Send + 'static,
{
    pull_with(source, PullConfig::default())
}

/// Like [`pull`], with explicit worker configuration.
pub fn pull_with<Src>(source: Src, config: PullConfig) -> PullIterator<Src::Item>
where
    Src: Source + Send + 'static,
    Src::Item: Send + 'static,
{
    let (request_tx, request_rx) = bounded(0);
    let (reply_tx, reply_rx) = bounded(0);
    let handle = thread::Builder::new()
        .name(config.thread_name)
        .spawn(move || drain(source, request_rx, reply_tx))
        .expect("pull worker thread should spawn");
    PullIterator {
        requests: request_tx,
        replies: reply_rx,
        lookahead: Lookahead::Unfetched,
        handle: Some(handle),
    }
}

/// Producer-thread body: drive the source through a rendezvous sink, then
/// serve the epilogue until the consumer is done.
fn drain<Src>(mut source: Src, requests: Receiver<Request>, replies: Sender<Reply<Src::Item>>)
where
    Src: Source,
{
    let mut sink = DrainSink {
        requests: &requests,
        replies: &replies,
        open: true,
        close_acked: false,
    };
    let outcome = source.for_each(&mut sink);
    if sink.close_acked {
        // The consumer already asked us to stop and has its acknowledgment.
        return;
    }
    let mut pending_failure = outcome.err();
    if let Some(err) = &pending_failure {
        log::debug!("pull source failed, holding error for the consumer: {}", err);
    }
    loop {
        match requests.recv() {
            Ok(Request::Fetch) => {
                let reply = match pending_failure.take() {
                    Some(err) => Reply::Failed(err),
                    None => Reply::Closed,
                };
                if replies.send(reply).is_err() {
                    return;
                }
            }
            Ok(Request::Close) => {
                let _ = replies.send(Reply::Closed);
                return;
            }
            // Consumer dropped both channel ends.
            Err(_) => return,
        }
    }
}

/// The producer-side sink: blocks in `accept` until the consumer asks for
/// the value it is holding.
struct DrainSink<'a, T> {
    requests: &'a Receiver<Request>,
    replies: &'a Sender<Reply<T>>,
    open: bool,
    close_acked: bool,
}

impl<T> Sink<T> for DrainSink<'_, T> {
    fn accept(&mut self, value: T) {
        if !self.open {
            // Tolerate the final in-flight value after saturation.
            return;
        }
        match self.requests.recv() {
            Ok(Request::Fetch) => {
                if self.replies.send(Reply::Value(value)).is_err() {
                    self.open = false;
                }
            }
            Ok(Request::Close) => {
                self.open = false;
                self.close_acked = true;
                let _ = self.replies.send(Reply::Closed);
            }
            Err(_) => self.open = false,
        }
    }

    fn needs_more(&self) -> bool {
        self.open
    }
}

/// The consumer-side look-ahead slot.
enum Lookahead<T> {
    /// Nothing requested yet for this slot.
    Unfetched,
    Value(T),
    Failed(StreamError),
    Closed,
}

/// Blocking, closeable iterator over a stream running on its own producer
/// thread. Yields `Ok(value)` per element; a producer-side failure is
/// yielded once as `Err`, after which the iterator is closed.
///
/// Dropping the iterator closes it.
pub struct PullIterator<T> {
    requests: Sender<Request>,
    replies: Receiver<Reply<T>>,
    lookahead: Lookahead<T>,
    handle: Option<JoinHandle<()>>,
}

impl<T> PullIterator<T> {
    fn refill(&mut self) {
        self.lookahead = match self.requests.send(Request::Fetch) {
            Ok(()) => match self.replies.recv() {
                Ok(Reply::Value(value)) => Lookahead::Value(value),
                Ok(Reply::Failed(err)) => Lookahead::Failed(err),
                Ok(Reply::Closed) => Lookahead::Closed,
                Err(_) => Lookahead::Failed(StreamError::Disconnected),
            },
            Err(_) => Lookahead::Failed(StreamError::Disconnected),
        };
    }

    /// Whether another value (or a pending failure) is available.
    pub fn has_next(&mut self) -> bool {
        if matches!(self.lookahead, Lookahead::Unfetched) {
            self.refill();
        }
        !matches!(self.lookahead, Lookahead::Closed)
    }

    /// Shut the producer down and wait for its thread to finish.
    ///
    /// Idempotent; may be called at any point, including before any
    /// `next`. Takes effect at the producer's next `accept` boundary.
    pub fn close(&mut self) {
        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => return,
        };
        // Any cached look-ahead value is discarded.
        self.lookahead = Lookahead::Closed;
        if self.requests.send(Request::Close).is_ok() {
            let _ = self.replies.recv();
        }
        if handle.join().is_err() {
            log::warn!("pull worker thread panicked");
        }
    }
}

impl<T> Iterator for PullIterator<T> {
    type Item = StreamResult<T>;

    fn next(&mut self) -> Option<StreamResult<T>> {
        if matches!(self.lookahead, Lookahead::Unfetched) {
            self.refill();
        }
        match std::mem::replace(&mut self.lookahead, Lookahead::Unfetched) {
            Lookahead::Value(value) => {
                // Hand the cached value out and refill the slot right away.
                self.refill();
                Some(Ok(value))
            }
            Lookahead::Failed(err) => {
                self.close();
                Some(Err(err))
            }
            Lookahead::Closed => {
                self.lookahead = Lookahead::Closed;
                None
            }
            Lookahead::Unfetched => None,
        }
    }
}

impl<T> Drop for PullIterator<T> {
    fn drop(&mut self) {
        self.close();
    }
}
