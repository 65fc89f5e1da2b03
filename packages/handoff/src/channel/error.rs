// channel error types.

use std::fmt;
use thiserror::Error;


// ==== base error types ====


/// Error for operating on a channel that has been closed
///
/// Closing wins over data availability: a send or receive that races with a close fails with
/// this error even if buffer room or a buffered value also became available at the same wake-up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[error("channel is closed")]
pub struct ClosedError;

/// Error for attempting an operation with no or limited blocking, and the operation not
/// completing immediately or by the specified deadline
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[error("operation would block")]
pub struct WouldBlockError;

/// Error for advancing a receive iterator that has already reported its end
///
/// This is a usage error, distinct from [`ClosedError`]: reaching the end of the iterator is
/// expected control flow, advancing past an end that was already observed is not.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[error("receive iterator already ended")]
pub struct ExhaustedError;


// ==== compound error types ====


/// Error for trying to send into a channel
///
/// The undelivered message is handed back to the caller; it was never enqueued.
#[derive(Copy, Clone, Eq, PartialEq, Error)]
#[error("{cause}")]
pub struct SendError<T> {
    /// The message that could not be sent
    pub msg: T,
    /// The reason the message could not be sent
    #[source]
    pub cause: ClosedError,
}

// not derived: the opaque message keeps the impl independent of T.
impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SendError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

/// Error for trying to send into a channel with no or limited blocking
#[derive(Copy, Clone, Eq, PartialEq, Error)]
#[error("{cause}")]
pub struct TrySendError<T> {
    /// The message that could not be sent
    pub msg: T,
    /// The reason the message could not be sent
    #[source]
    pub cause: TrySendErrorCause,
}

impl<T> fmt::Debug for TrySendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TrySendError")
            .field("cause", &self.cause)
            .finish_non_exhaustive()
    }
}

/// Reason a send with no or limited blocking failed
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
pub enum TrySendErrorCause {
    /// The channel has been closed
    #[error(transparent)]
    Closed(#[from] ClosedError),
    /// The operation could not be resolved immediately or by the specified deadline
    #[error(transparent)]
    WouldBlock(#[from] WouldBlockError),
}

/// Error for trying to receive from a channel with no or limited blocking
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
pub enum TryRecvError {
    /// The channel has been closed
    #[error(transparent)]
    Closed(#[from] ClosedError),
    /// The operation could not be resolved immediately or by the specified deadline
    #[error(transparent)]
    WouldBlock(#[from] WouldBlockError),
}
