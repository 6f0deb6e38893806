use thiserror::Error;

/// Errors raised by queue operations.
///
/// An empty queue is not an error: dequeue operations report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("requested wait of {requested}s exceeds the {limit}s limit")]
    TimeoutLimitExceeded { requested: u64, limit: u64 },
}
