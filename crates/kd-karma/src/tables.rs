//! Result tables: face → symbol metadata, per denomination.
//!
//! The [`Resolver`] answers two questions for the rest of the pipeline:
//! which symbol metadata belongs to a face (so an adjusted outcome can be
//! re-stamped), and how a face or denomination should be labelled in chat.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use kd_dice::{DieDenomination, FaceSymbol};

use crate::error::{KarmaError, KarmaResult};
use crate::localize::{Localizer, Translations};

/// Symbol metadata for each face of one die kind.
pub type ResultTable = BTreeMap<u32, FaceSymbol>;

/// A host registry of result tables, keyed by denomination.
pub trait SymbolRegistry: Send + Sync {
    /// The table for `denomination`, if the host populated one.
    fn table(&self, denomination: &DieDenomination) -> Option<&ResultTable>;
}

/// In-memory result tables, loadable from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTables {
    tables: BTreeMap<DieDenomination, ResultTable>,
}

impl SymbolRegistry for ResultTables {
    fn table(&self, denomination: &DieDenomination) -> Option<&ResultTable> {
        self.tables.get(denomination)
    }
}

impl ResultTables {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tables from JSON of the form `{"b": {"1": {...}, ...}, ...}`.
    pub fn from_json_str(json: &str) -> KarmaResult<Self> {
        serde_json::from_str(json).map_err(KarmaError::InvalidTables)
    }

    /// Register (or replace) the table for a denomination.
    pub fn insert(&mut self, denomination: DieDenomination, table: ResultTable) {
        self.tables.insert(denomination, table);
    }

    /// Denominations that have a table, in order.
    pub fn denominations(&self) -> impl Iterator<Item = &DieDenomination> {
        self.tables.keys()
    }

    /// The canonical face layout of the seven narrative dice.
    pub fn standard() -> Self {
        let mut tables = Self::new();
        for denom in DieDenomination::STANDARD {
            let table = standard_faces(&denom)
                .iter()
                .zip(1u32..)
                .map(|(key, face)| (face, standard_symbol(&denom, key)))
                .collect();
            tables.insert(denom, table);
        }
        tables
    }
}

fn standard_faces(denom: &DieDenomination) -> &'static [&'static str] {
    match denom {
        DieDenomination::Boost => &[
            "Blank",
            "Blank",
            "Success",
            "SuccessAdvantage",
            "AdvantageAdvantage",
            "Advantage",
        ],
        DieDenomination::Setback => &["Blank", "Blank", "Failure", "Failure", "Threat", "Threat"],
        DieDenomination::Ability => &[
            "Blank",
            "Success",
            "Success",
            "SuccessSuccess",
            "Advantage",
            "Advantage",
            "SuccessAdvantage",
            "AdvantageAdvantage",
        ],
        DieDenomination::Difficulty => &[
            "Blank",
            "Failure",
            "FailureFailure",
            "Threat",
            "Threat",
            "Threat",
            "ThreatThreat",
            "FailureThreat",
        ],
        DieDenomination::Proficiency => &[
            "Blank",
            "Success",
            "Success",
            "SuccessSuccess",
            "SuccessSuccess",
            "Advantage",
            "SuccessAdvantage",
            "SuccessAdvantage",
            "SuccessAdvantage",
            "AdvantageAdvantage",
            "AdvantageAdvantage",
            "Triumph",
        ],
        DieDenomination::Challenge => &[
            "Blank",
            "Failure",
            "Failure",
            "FailureFailure",
            "FailureFailure",
            "Threat",
            "Threat",
            "FailureThreat",
            "FailureThreat",
            "ThreatThreat",
            "ThreatThreat",
            "Despair",
        ],
        DieDenomination::Force => &[
            "Dark",
            "Dark",
            "Dark",
            "Dark",
            "Dark",
            "Dark",
            "DarkDark",
            "Light",
            "Light",
            "LightLight",
            "LightLight",
            "LightLight",
        ],
        DieDenomination::Other(_) => &[],
    }
}

fn symbol_counts(key: &str) -> &'static [(&'static str, u32)] {
    match key {
        "Success" => &[("success", 1)],
        "SuccessSuccess" => &[("success", 2)],
        "Advantage" => &[("advantage", 1)],
        "AdvantageAdvantage" => &[("advantage", 2)],
        "SuccessAdvantage" => &[("success", 1), ("advantage", 1)],
        "Triumph" => &[("success", 1), ("triumph", 1)],
        "Failure" => &[("failure", 1)],
        "FailureFailure" => &[("failure", 2)],
        "Threat" => &[("threat", 1)],
        "ThreatThreat" => &[("threat", 2)],
        "FailureThreat" => &[("failure", 1), ("threat", 1)],
        "Despair" => &[("failure", 1), ("despair", 1)],
        "Dark" => &[("dark", 1)],
        "DarkDark" => &[("dark", 2)],
        "Light" => &[("light", 1)],
        "LightLight" => &[("light", 2)],
        _ => &[],
    }
}

fn standard_symbol(denom: &DieDenomination, key: &str) -> FaceSymbol {
    let image = format!(
        "icons/karmic-dice/{}-{}.png",
        label_for(denom).to_lowercase(),
        key.to_lowercase()
    );
    symbol_counts(key)
        .iter()
        .fold(FaceSymbol::new(format!("KARMIC.{key}"), image), |sym, &(name, n)| {
            sym.with_field(name, n)
        })
}

/// Display name of a denomination.
///
/// Unknown tags are shown as-is; an empty tag reads as "Unknown".
pub fn label_for(denomination: &DieDenomination) -> String {
    match denomination {
        DieDenomination::Ability => "Ability".to_string(),
        DieDenomination::Boost => "Boost".to_string(),
        DieDenomination::Proficiency => "Proficiency".to_string(),
        DieDenomination::Difficulty => "Difficulty".to_string(),
        DieDenomination::Challenge => "Challenge".to_string(),
        DieDenomination::Setback => "Setback".to_string(),
        DieDenomination::Force => "Force".to_string(),
        DieDenomination::Other(tag) if tag.is_empty() => "Unknown".to_string(),
        DieDenomination::Other(tag) => tag.clone(),
    }
}

/// Looks up result tables and localizes their labels.
#[derive(Clone)]
pub struct Resolver {
    registry: Option<Arc<dyn SymbolRegistry>>,
    localizer: Arc<dyn Localizer>,
}

impl Resolver {
    /// A resolver over a host registry.
    pub fn new(registry: Arc<dyn SymbolRegistry>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            registry: Some(registry),
            localizer,
        }
    }

    /// A resolver for a host that exposes no result tables.
    pub fn without_registry(localizer: Arc<dyn Localizer>) -> Self {
        Self {
            registry: None,
            localizer,
        }
    }

    /// Standard tables with English labels.
    pub fn standard() -> Self {
        Self::new(
            Arc::new(ResultTables::standard()),
            Arc::new(Translations::english()),
        )
    }

    /// The table for `denomination`, if the registry exists and has one.
    pub fn table_for(&self, denomination: &DieDenomination) -> Option<&ResultTable> {
        self.registry.as_deref()?.table(denomination)
    }

    /// Symbol metadata for one face.
    pub fn symbol_for(&self, denomination: &DieDenomination, face: u32) -> Option<&FaceSymbol> {
        self.table_for(denomination)?.get(&face)
    }

    /// Localized label of one face, or `Face N` when none is known.
    pub fn face_label(&self, denomination: &DieDenomination, face: u32) -> KarmaResult<String> {
        match self
            .symbol_for(denomination, face)
            .and_then(|sym| sym.label.as_deref())
        {
            Some(key) => self.localizer.localize(key),
            None => Ok(format!("Face {face}")),
        }
    }

    /// Image path of one face, if known.
    pub fn face_image(&self, denomination: &DieDenomination, face: u32) -> Option<&str> {
        self.symbol_for(denomination, face)?.image.as_deref()
    }
}
