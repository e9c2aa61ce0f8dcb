use thiserror::Error;

/// Everything a poll cycle can report. Each recoverable condition is
/// its own variant so the loop classifies outcomes with a single match.
#[derive(Debug, Error)]
pub enum WatchError {
    /// Transport failure or a non-200 answer from the review API.
    #[error("homework API request failed: {0}")]
    Upstream(String),

    /// The API answered, but the body does not have the promised shape.
    #[error("malformed homework API response: {0}")]
    Malformed(String),

    /// Well-formed answer with no submissions in it. Not a failure.
    #[error("no homework is under review right now")]
    NothingToReport,

    /// Telegram refused or dropped the outgoing message.
    #[error("failed to deliver notification: {0}")]
    Notify(String),

    /// The candidate text equals the last delivered one.
    #[error("status has not changed since the last notification")]
    Unchanged,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
