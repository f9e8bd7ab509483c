//! Roll interception, karma policy, and chat annotation for Karmic Dice.
//!
//! The pipeline wraps each of a host's die classes so that every roll is
//! counted in a shared [`Ledger`](kd_dice::Ledger), offered to a
//! [`KarmaPolicy`], and, when the policy picks a different face, re-stamped
//! and marked with an adjustment record. When the host builds a chat message
//! from those rolls, [`ChatAnnotator`] appends a summary of every adjustment.
//!
//! [`KarmicDice`] ties the pieces to the host's lifecycle signals.

/// Chat message annotation.
pub mod chat;
/// Pipeline configuration.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// Host platform boundary and an in-process reference host.
pub mod host;
/// Roll interception and one-time installation.
pub mod interceptor;
/// Label localization.
pub mod localize;
/// Module lifecycle entry points.
pub mod module;
/// Karma policies.
pub mod policy;
/// Chat summary rendering.
pub mod summary;
/// Result tables and the resolver.
pub mod tables;

pub use chat::{ChatAnnotator, ChatMessageData};
pub use config::KarmaConfig;
pub use error::{HostError, HostResult, KarmaError, KarmaResult};
pub use host::{DiceRegistry, DieClass, DieTerm, Host, MemoryHost, RollOptions, StandardDie};
pub use interceptor::{Interceptor, KarmicTerm, Pipeline};
pub use localize::{Localizer, PassthroughLocalizer, Translations};
pub use module::KarmicDice;
pub use policy::{IdentityPolicy, KarmaPolicy};
pub use summary::{render_summary, wrap_chat_content};
pub use tables::{ResultTable, ResultTables, Resolver, SymbolRegistry, label_for};
