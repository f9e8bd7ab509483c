//! Error types for the karma pipeline.

use kd_dice::DieDenomination;

/// Alias for `Result<T, KarmaError>`.
pub type KarmaResult<T> = Result<T, KarmaError>;

/// Alias for `Result<T, HostError>`.
pub type HostResult<T> = Result<T, HostError>;

/// Faults raised by the pipeline's own post-processing.
///
/// These never reach the caller of a roll or a chat hook: the boundary that
/// runs each stage logs them and falls back to the unadjusted result.
#[derive(Debug, thiserror::Error)]
pub enum KarmaError {
    /// The policy answered with a face the die does not have.
    #[error("policy returned face {face} for {denomination}, outside 1..={faces}")]
    FaceOutOfRange {
        /// Denomination being adjusted.
        denomination: DieDenomination,
        /// Face returned by the policy.
        face: u32,
        /// Faces on the die.
        faces: u32,
    },

    /// The policy could not reach a decision.
    #[error("policy '{policy}' failed: {message}")]
    Policy {
        /// Name of the failing policy.
        policy: String,
        /// What went wrong.
        message: String,
    },

    /// The host could not localize a label key.
    #[error("cannot localize '{key}': {message}")]
    Localize {
        /// The label key.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// A chat summary could not be rendered.
    #[error("summary rendering failed: {0}")]
    Render(String),

    /// A roll batch could not be encoded for a chat payload.
    #[error("roll encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// A configuration file could not be parsed.
    #[error("invalid config: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    /// A result table file could not be parsed.
    #[error("invalid result tables: {0}")]
    InvalidTables(#[source] serde_json::Error),
}

/// Failures reported by the host itself.
///
/// The interceptor passes these through untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// The host's roll operation failed.
    #[error("roll failed: {0}")]
    Roll(String),
}
