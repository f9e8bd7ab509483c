//! Label localization seam.

use std::collections::HashMap;

use crate::error::KarmaResult;

/// Resolves a label key to display text.
pub trait Localizer: Send + Sync {
    /// Display text for `key`. Unknown keys come back unchanged; an error
    /// means the lookup itself failed.
    fn localize(&self, key: &str) -> KarmaResult<String>;
}

/// Returns every key as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughLocalizer;

impl Localizer for PassthroughLocalizer {
    fn localize(&self, key: &str) -> KarmaResult<String> {
        Ok(key.to_string())
    }
}

/// A fixed key → text dictionary.
#[derive(Debug, Clone, Default)]
pub struct Translations {
    entries: HashMap<String, String>,
}

impl Translations {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one translation.
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    /// English text for the label keys used by the standard result tables.
    pub fn english() -> Self {
        [
            ("KARMIC.Blank", "Blank"),
            ("KARMIC.Success", "Success"),
            ("KARMIC.SuccessSuccess", "Success ×2"),
            ("KARMIC.Advantage", "Advantage"),
            ("KARMIC.AdvantageAdvantage", "Advantage ×2"),
            ("KARMIC.SuccessAdvantage", "Success + Advantage"),
            ("KARMIC.Triumph", "Triumph"),
            ("KARMIC.Failure", "Failure"),
            ("KARMIC.FailureFailure", "Failure ×2"),
            ("KARMIC.Threat", "Threat"),
            ("KARMIC.ThreatThreat", "Threat ×2"),
            ("KARMIC.FailureThreat", "Failure + Threat"),
            ("KARMIC.Despair", "Despair"),
            ("KARMIC.Dark", "Dark Side"),
            ("KARMIC.DarkDark", "Dark Side ×2"),
            ("KARMIC.Light", "Light Side"),
            ("KARMIC.LightLight", "Light Side ×2"),
        ]
        .into_iter()
        .fold(Self::new(), |t, (key, text)| t.with(key, text))
    }
}

impl Localizer for Translations {
    fn localize(&self, key: &str) -> KarmaResult<String> {
        Ok(self
            .entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string()))
    }
}
