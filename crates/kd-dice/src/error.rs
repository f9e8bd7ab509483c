//! Error types for dice data.

/// Alias for `Result<T, DiceError>`.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur when interpreting dice data.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    /// A denomination tag was empty.
    #[error("empty die denomination")]
    EmptyDenomination,

    /// A pool item could not be parsed (expected e.g. `2b`).
    #[error("invalid pool item: \"{0}\"")]
    InvalidPoolItem(String),
}
