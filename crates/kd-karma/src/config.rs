//! Configuration for the karma pipeline.

use serde::{Deserialize, Serialize};

use kd_dice::DEFAULT_FACES;

use crate::error::{KarmaError, KarmaResult};

/// Ruleset identifier of the narrative dice system.
pub const DEFAULT_SYSTEM_ID: &str = "starwarsffg";

/// Configuration for the karma pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KarmaConfig {
    /// Host ruleset the pipeline activates for.
    pub system_id: String,
    /// Faces assumed for a die class that does not report any.
    pub default_faces: u32,
    /// Master switch. When false, `ready` installs nothing.
    pub enabled: bool,
    /// Heading of the collapsible chat section.
    pub summary_title: String,
}

impl Default for KarmaConfig {
    fn default() -> Self {
        Self {
            system_id: DEFAULT_SYSTEM_ID.to_string(),
            default_faces: DEFAULT_FACES,
            enabled: true,
            summary_title: "Karmic Dice Adjustments".to_string(),
        }
    }
}

impl KarmaConfig {
    /// Load overrides from JSON. Missing fields keep their defaults, and
    /// values are clamped as the builders clamp them.
    pub fn from_json_str(json: &str) -> KarmaResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(KarmaError::InvalidConfig)?;
        let faces = config.default_faces;
        Ok(config.with_default_faces(faces))
    }

    /// Set the host ruleset identifier.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = system_id.into();
        self
    }

    /// Set the fallback face count (at least 1).
    pub fn with_default_faces(mut self, faces: u32) -> Self {
        self.default_faces = faces.max(1);
        self
    }

    /// Enable or disable the pipeline.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the chat section heading.
    pub fn with_summary_title(mut self, title: impl Into<String>) -> Self {
        self.summary_title = title.into();
        self
    }
}
