//! Chat message annotation.
//!
//! Runs once per outgoing chat message, before the host persists it. If any
//! die in the message's rolls was adjusted, the body is wrapped with a
//! collapsible summary. Every failure degrades to sending the message as-is.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use kd_dice::{RollBatch, collect_changes};

use crate::error::{KarmaError, KarmaResult};
use crate::summary::{render_summary, wrap_chat_content};
use crate::tables::Resolver;

/// The mutable part of a chat message about to be created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageData {
    /// Serialized rolls attached to the message.
    #[serde(default)]
    pub rolls: Value,
    /// HTML body of the message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ChatMessageData {
    /// A message with `content` carrying the rolls of `batch`.
    pub fn new(content: impl Into<String>, batch: &RollBatch) -> KarmaResult<Self> {
        Ok(Self {
            rolls: serde_json::to_value(batch).map_err(KarmaError::Encode)?,
            content: Some(content.into()),
        })
    }
}

/// Adds the adjustment summary to chat messages.
#[derive(Clone)]
pub struct ChatAnnotator {
    resolver: Resolver,
    title: String,
}

impl ChatAnnotator {
    /// An annotator using `resolver` for labels and `title` as the heading.
    pub fn new(resolver: Resolver, title: impl Into<String>) -> Self {
        Self {
            resolver,
            title: title.into(),
        }
    }

    /// Annotate `data` in place. Returns whether the body was changed.
    pub fn annotate(&self, data: &mut ChatMessageData) -> bool {
        match self.build(data) {
            Ok(Some((content, adjusted))) => {
                data.content = Some(content);
                tracing::info!(adjusted, "applied karmic summary to chat message");
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!(error = %e, "preCreateChatMessage failure");
                false
            }
        }
    }

    fn build(&self, data: &ChatMessageData) -> KarmaResult<Option<(String, usize)>> {
        if !data.rolls.as_array().is_some_and(|rolls| !rolls.is_empty()) {
            return Ok(None);
        }
        let changes = collect_changes(&data.rolls);
        if changes.is_empty() {
            return Ok(None);
        }
        let summary = render_summary(&changes, &self.resolver)?;
        let content = wrap_chat_content(data.content.as_deref(), &self.title, &summary);
        Ok(Some((content, changes.len())))
    }
}
