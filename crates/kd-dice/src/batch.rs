//! Roll batches: the rolls attached to a single chat message.
//!
//! A batch is a three-level tree (rolls → terms → outcomes). Hosts hand it
//! over as loosely-typed JSON, so [`RollBatch::from_value`] validates each
//! level and drops malformed elements instead of failing the whole batch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::denomination::DieDenomination;
use crate::outcome::{AdjustmentRecord, DieOutcome};

/// One die term inside a roll: a group of dice of the same kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Denomination of the dice in this term, if the host reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub denomination: Option<DieDenomination>,
    /// Number of faces on the dice in this term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faces: Option<u32>,
    /// Per-die outcomes, in roll order.
    #[serde(default)]
    pub results: Vec<DieOutcome>,
}

impl Term {
    /// A term of `denomination` dice with the given outcomes.
    pub fn new(denomination: DieDenomination, faces: u32, results: Vec<DieOutcome>) -> Self {
        Self {
            denomination: Some(denomination),
            faces: Some(faces),
            results,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let results = obj
            .get("results")?
            .as_array()?
            .iter()
            .filter_map(DieOutcome::from_value)
            .collect();
        Some(Self {
            denomination: obj
                .get("denomination")
                .and_then(Value::as_str)
                .map(DieDenomination::from_tag),
            faces: obj
                .get("faces")
                .and_then(Value::as_u64)
                .and_then(|f| u32::try_from(f).ok()),
            results,
        })
    }
}

/// One roll: an ordered list of terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    /// Terms of the roll, in formula order.
    pub terms: Vec<Term>,
}

impl Roll {
    /// A roll made of the given terms.
    pub fn new(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let terms = value
            .as_object()?
            .get("terms")?
            .as_array()?
            .iter()
            .filter_map(Term::from_value)
            .collect();
        Some(Self { terms })
    }

    /// Iterate over all outcomes of this roll in term order.
    pub fn outcomes(&self) -> impl Iterator<Item = &DieOutcome> {
        self.terms.iter().flat_map(|t| t.results.iter())
    }
}

/// All rolls attached to one chat event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollBatch {
    /// Rolls in the order the host attached them.
    pub rolls: Vec<Roll>,
}

/// One adjustment found while scanning a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEntry {
    /// Denomination of the adjusted die.
    pub die_type: DieDenomination,
    /// Face the host rolled.
    pub original_result: u32,
    /// Face after adjustment.
    pub adjusted_result: u32,
}

impl From<&AdjustmentRecord> for ChangeEntry {
    fn from(rec: &AdjustmentRecord) -> Self {
        Self {
            die_type: rec.die_type.clone(),
            original_result: rec.original_result,
            adjusted_result: rec.adjusted_result,
        }
    }
}

impl RollBatch {
    /// A batch of the given rolls.
    pub fn new(rolls: Vec<Roll>) -> Self {
        Self { rolls }
    }

    /// Build a batch from host JSON, skipping anything malformed.
    ///
    /// A non-array value yields an empty batch. Rolls without a `terms`
    /// array, terms without a `results` array, and results that are not
    /// objects are dropped; their siblings are kept. Within a result, each
    /// field is read on its own (see [`DieOutcome::from_value`]).
    pub fn from_value(value: &Value) -> Self {
        let rolls = value
            .as_array()
            .map(|rolls| rolls.iter().filter_map(Roll::from_value).collect())
            .unwrap_or_default();
        Self { rolls }
    }

    /// True if the batch holds no rolls.
    pub fn is_empty(&self) -> bool {
        self.rolls.is_empty()
    }

    /// Iterate over every outcome in roll, term, outcome order.
    pub fn outcomes(&self) -> impl Iterator<Item = &DieOutcome> {
        self.rolls.iter().flat_map(Roll::outcomes)
    }

    /// Every adjustment in the batch, in traversal order.
    pub fn changes(&self) -> Vec<ChangeEntry> {
        self.outcomes()
            .filter_map(|o| o.adjustment.as_ref())
            .filter(|rec| rec.is_change())
            .map(ChangeEntry::from)
            .collect()
    }
}

/// Scan host roll JSON and return every adjustment, in traversal order.
pub fn collect_changes(rolls: &Value) -> Vec<ChangeEntry> {
    RollBatch::from_value(rolls).changes()
}
