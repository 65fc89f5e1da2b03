// exposed API of channels

use super::{
    core::{self, Timeout},
    error::*,
};
use std::{
    fmt,
    iter::FusedIterator,
    time::{Duration, Instant},
};


// ==== helper functions for adapting core API to exposed API ====


// convert a core send failure into the error type of the limited-blocking send operations.
fn try_send_error<T>((msg, cause): (T, TrySendErrorCause)) -> TrySendError<T> {
    TrySendError { msg, cause }
}

// convert a core send failure for an operation that was given Timeout::Never.
fn send_error<T>((msg, cause): (T, TrySendErrorCause)) -> SendError<T> {
    match cause {
        TrySendErrorCause::Closed(cause) => SendError { msg, cause },
        TrySendErrorCause::WouldBlock(_) => unreachable!("would-block with Timeout::Never"),
    }
}

// convert a core recv failure for an operation that was given Timeout::Never.
fn recv_error(error: TryRecvError) -> ClosedError {
    match error {
        TryRecvError::Closed(cause) => cause,
        TryRecvError::WouldBlock(_) => unreachable!("would-block with Timeout::Never"),
    }
}


// ==== the exposed API ====


/// Create a channel with the given capacity
///
/// A capacity of zero means an unbuffered (rendezvous) channel: every send completes only by
/// handing its value to a receiver that is concurrently blocked in a receive. A capacity
/// greater than zero means a bounded FIFO buffer of that many elements, decoupling senders
/// from receivers in time up to that bound.
pub fn channel<T>(capacity: usize) -> Channel<T> {
    Channel { inner: core::Channel::new(capacity) }
}

/// Handle to a blocking channel
///
/// All handles obtained by cloning refer to the same channel. Any number of threads may send
/// into and receive from the same channel concurrently; values are delivered in FIFO order,
/// and each value is delivered to exactly one receiver.
///
/// The channel is open until [`close`](Self::close) is called, which is permanent: there is no
/// reopening. Blocked operations on a closed channel fail rather than wait. Values still
/// buffered at the moment of closing are discarded (never delivered); see
/// [`recv`](Self::recv).
pub struct Channel<T> {
    inner: core::Channel<T>,
}

impl<T> Channel<T> {
    /// Create an unbuffered (rendezvous) channel
    ///
    /// Equivalent to [`channel(0)`](channel).
    pub fn new() -> Self {
        channel(0)
    }

    /// Create a buffered channel with a bounded FIFO buffer of `capacity` elements
    ///
    /// Equivalent to [`channel(capacity)`](channel). A capacity of zero produces a rendezvous
    /// channel, as [`new`](Self::new) does.
    pub fn with_capacity(capacity: usize) -> Self {
        channel(capacity)
    }

    /// The capacity this channel was created with
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Number of currently buffered values
    ///
    /// After a close this may remain non-zero: buffered values are discarded by the close
    /// policy and stay counted here until the channel is dropped, but can no longer be
    /// received.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the buffer is currently empty
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }

    /// Whether the channel has been closed
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Send a value, blocking until the channel can accept it
    ///
    /// For a buffered channel, blocks while the buffer is full. For a rendezvous channel,
    /// blocks until a receiver is concurrently blocked in a receive, then hands the value
    /// over directly.
    ///
    /// Fails if the channel is closed, or becomes closed while blocking. Closing wins over
    /// room becoming available at the same wake-up. The undelivered value is handed back in
    /// the error; it was never enqueued.
    pub fn send(&self, msg: T) -> Result<(), SendError<T>> {
        self.inner.send(msg, Timeout::Never).map_err(send_error)
    }

    /// Send a value only if the channel can accept it without blocking
    pub fn try_send(&self, msg: T) -> Result<(), TrySendError<T>> {
        self.inner.send(msg, Timeout::NonBlocking).map_err(try_send_error)
    }

    /// Send a value, blocking no longer than `timeout`
    pub fn send_timeout(&self, msg: T, timeout: Duration) -> Result<(), TrySendError<T>> {
        self.send_deadline(msg, Instant::now() + timeout)
    }

    /// Send a value, blocking no later than `deadline`
    ///
    /// Fresh information wins at every wake-up: a close is reported as closed and an
    /// acceptable send is accepted, even when the deadline elapsed at the same moment.
    pub fn send_deadline(&self, msg: T, deadline: Instant) -> Result<(), TrySendError<T>> {
        self.inner.send(msg, Timeout::At(deadline)).map_err(try_send_error)
    }

    /// Receive a value, blocking until one is available
    ///
    /// Fails if the channel is closed, or becomes closed while blocking. Closing wins over
    /// draining: a closed channel fails the receive even if values are still buffered, and
    /// those values are permanently unreachable.
    pub fn recv(&self) -> Result<T, ClosedError> {
        self.inner.recv(Timeout::Never).map_err(recv_error)
    }

    /// Receive a value only if one is available without blocking
    ///
    /// This never establishes a rendezvous: on a zero-capacity channel it does not count as a
    /// blocked receiver for a waiting sender to pair with, though it may take over a value
    /// already mid-hand-off.
    pub fn try_recv(&self) -> Result<T, TryRecvError> {
        self.inner.recv(Timeout::NonBlocking)
    }

    /// Receive a value, blocking no longer than `timeout`
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, TryRecvError> {
        self.recv_deadline(Instant::now() + timeout)
    }

    /// Receive a value, blocking no later than `deadline`
    pub fn recv_deadline(&self, deadline: Instant) -> Result<T, TryRecvError> {
        self.inner.recv(Timeout::At(deadline))
    }

    /// Close the channel
    ///
    /// Every thread blocked in a send or receive on this channel is woken and fails with a
    /// closed error, and every subsequent send or receive fails immediately. Values that were
    /// blocked mid-send are handed back to their senders, and values still buffered are
    /// discarded.
    ///
    /// Idempotent: closing an already-closed channel has no further effect. Never blocks, and
    /// is safe to call from any thread, including from a consumer's cleanup path.
    pub fn close(&self) {
        self.inner.close()
    }

    /// Iterate over values received from this channel
    ///
    /// See [`Iter`].
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { channel: self, ended: false }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Channel::new()
    }
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Channel { inner: self.inner.clone() }
    }
}

impl<T> fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Channel")
            .field("capacity", &self.inner.capacity())
            .field("len", &self.inner.len())
            .field("closed", &self.inner.is_closed())
            .finish()
    }
}


// ==== iterators ====


/// Iterator over values received from a channel
///
/// Each advance is exactly a [`Channel::recv`]: the iterator is single-pass and shares the
/// channel's consumption state with every other receiver on the same channel. It ends
/// cleanly, not as an error, the first time a receive fails because the channel was closed,
/// and once ended it stays ended.
///
/// [`Iterator::next`] is fused: after the end it yields `None` forever. To distinguish
/// advancing past an already-observed end, which is a usage error, use
/// [`try_next`](Self::try_next).
pub struct Iter<'a, T> {
    channel: &'a Channel<T>,
    ended: bool,
}

impl<'a, T> Iter<'a, T> {
    /// Whether this iterator has observed its end
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Advance, distinguishing the clean end from advancing past it
    ///
    /// Returns `Ok(Some(msg))` for each received value, `Ok(None)` exactly once when the
    /// channel is first observed closed, and [`ExhaustedError`] for every advance after that.
    pub fn try_next(&mut self) -> Result<Option<T>, ExhaustedError> {
        if self.ended {
            return Err(ExhaustedError);
        }
        match self.channel.recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(ClosedError) => {
                self.ended = true;
                Ok(None)
            }
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.try_next().unwrap_or(None)
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

impl<'a, T> IntoIterator for &'a Channel<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Owned counterpart of [`Iter`], holding a channel handle
///
/// Same semantics as [`Iter`]; useful for moving a consuming loop into a spawned thread.
pub struct IntoIter<T> {
    channel: Channel<T>,
    ended: bool,
}

impl<T> IntoIter<T> {
    /// Whether this iterator has observed its end
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Advance, distinguishing the clean end from advancing past it
    ///
    /// See [`Iter::try_next`].
    pub fn try_next(&mut self) -> Result<Option<T>, ExhaustedError> {
        if self.ended {
            return Err(ExhaustedError);
        }
        match self.channel.recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(ClosedError) => {
                self.ended = true;
                Ok(None)
            }
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.try_next().unwrap_or(None)
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for Channel<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { channel: self, ended: false }
    }
}


// ==== tests ====
