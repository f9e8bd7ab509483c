//! Die outcomes, roll batches, and roll statistics for Karmic Dice.
//!
//! This crate holds the data that flows through the karma pipeline: the
//! seven narrative die denominations, the per-die [`DieOutcome`] a host
//! produces, the [`AdjustmentRecord`] stamped onto an outcome when its face
//! was changed, the typed three-level [`RollBatch`] tree scanned when a chat
//! message is built, and the per-denomination [`Ledger`] of face counts.

/// Typed roll → term → outcome tree and change collection.
pub mod batch;
/// Die denominations (ability, boost, setback, ...).
pub mod denomination;
/// Error types used throughout the crate.
pub mod error;
/// Per-denomination face frequency ledger.
pub mod ledger;
/// Single-die outcomes, symbol metadata, and adjustment records.
pub mod outcome;

/// Re-export batch types.
pub use batch::{ChangeEntry, Roll, RollBatch, Term, collect_changes};
/// Re-export the denomination tag.
pub use denomination::DieDenomination;
/// Re-export error types.
pub use error::{DiceError, DiceResult};
/// Re-export ledger types.
pub use ledger::{DEFAULT_FACES, Ledger, LedgerEntry};
/// Re-export outcome types.
pub use outcome::{AdjustmentRecord, DieOutcome, FaceSymbol};
