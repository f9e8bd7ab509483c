//! Per-denomination roll statistics.
//!
//! The [`Ledger`] counts how often each face of each die kind came up. It
//! is shared between every intercepted die class through an `Arc`, so all
//! mutation goes through an internal lock. Counts only ever grow.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::denomination::DieDenomination;

/// Face count assumed when a die class does not report one.
pub const DEFAULT_FACES: u32 = 12;

/// Roll history for one denomination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Faces declared when the denomination was first seen.
    pub faces: u32,
    /// Total rolls recorded.
    pub rolls: u64,
    /// Occurrences per face. Faces `1..=faces` are always present.
    pub counts: BTreeMap<u32, u64>,
}

impl LedgerEntry {
    fn new(faces: u32) -> Self {
        Self {
            faces,
            rolls: 0,
            counts: (1..=faces).map(|face| (face, 0)).collect(),
        }
    }

    /// How often `face` was recorded.
    pub fn frequency(&self, face: u32) -> u64 {
        self.counts.get(&face).copied().unwrap_or(0)
    }

    /// Fraction of rolls that showed `face`, or 0.0 before any roll.
    pub fn share(&self, face: u32) -> f64 {
        if self.rolls == 0 {
            return 0.0;
        }
        self.frequency(face) as f64 / self.rolls as f64
    }
}

/// Face frequency counters for every denomination observed so far.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Mutex<BTreeMap<DieDenomination, LedgerEntry>>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<DieDenomination, LedgerEntry>> {
        // Every update is a pair of increments; a poisoned map is still valid.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record one observed face.
    ///
    /// `None` stands for a face the host did not report as a number; it is
    /// ignored, as is an empty denomination. The first call for a
    /// denomination creates its entry with `faces` zeroed slots (or
    /// [`DEFAULT_FACES`] when `faces` is unset or 0). A face outside the
    /// declared range, 0 included, gets a slot created on demand.
    pub fn record_face(&self, denom: &DieDenomination, face: Option<u32>, faces: Option<u32>) {
        let Some(face) = face else {
            return;
        };
        if denom.is_empty() {
            return;
        }
        let faces = faces.filter(|&f| f > 0).unwrap_or(DEFAULT_FACES);
        let mut entries = self.lock();
        let entry = entries
            .entry(denom.clone())
            .or_insert_with(|| LedgerEntry::new(faces));
        entry.rolls += 1;
        *entry.counts.entry(face).or_insert(0) += 1;
    }

    /// A copy of the history for `denom`.
    pub fn entry(&self, denom: &DieDenomination) -> Option<LedgerEntry> {
        self.lock().get(denom).cloned()
    }

    /// A copy of every entry, ordered by denomination.
    pub fn snapshot(&self) -> BTreeMap<DieDenomination, LedgerEntry> {
        self.lock().clone()
    }

    /// Total rolls across all denominations.
    pub fn total_rolls(&self) -> u64 {
        self.lock().values().map(|e| e.rolls).sum()
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn first_roll_initializes_all_faces() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Boost, Some(2), Some(6));
        let entry = ledger.entry(&DieDenomination::Boost).unwrap();
        assert_eq!(entry.faces, 6);
        assert_eq!(entry.rolls, 1);
        assert_eq!(entry.counts.len(), 6);
        assert_eq!(entry.frequency(2), 1);
        assert_eq!(entry.frequency(1), 0);
    }

    #[test]
    fn boost_scenario() {
        let ledger = Ledger::new();
        for face in [2, 2, 4, 2] {
            ledger.record_face(&DieDenomination::Boost, Some(face), Some(6));
        }
        let entry = ledger.entry(&DieDenomination::Boost).unwrap();
        assert_eq!(entry.rolls, 4);
        let expected: BTreeMap<u32, u64> =
            [(1, 0), (2, 3), (3, 0), (4, 1), (5, 0), (6, 0)].into_iter().collect();
        assert_eq!(entry.counts, expected);
        assert!((entry.share(2) - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn default_faces() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Force, Some(1), None);
        ledger.record_face(&DieDenomination::Setback, Some(1), Some(0));
        assert_eq!(ledger.entry(&DieDenomination::Force).unwrap().faces, DEFAULT_FACES);
        assert_eq!(ledger.entry(&DieDenomination::Setback).unwrap().faces, DEFAULT_FACES);
    }

    #[test]
    fn invalid_input_is_ignored() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::from_tag(""), Some(3), Some(6));
        ledger.record_face(&DieDenomination::Boost, None, Some(6));
        assert!(ledger.is_empty());

        ledger.record_face(&DieDenomination::Boost, Some(3), Some(6));
        let before = ledger.snapshot();
        ledger.record_face(&DieDenomination::Boost, None, Some(6));
        ledger.record_face(&DieDenomination::from_tag(""), Some(3), Some(6));
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn face_zero_is_counted() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Boost, Some(0), Some(6));
        let entry = ledger.entry(&DieDenomination::Boost).unwrap();
        assert_eq!(entry.rolls, 1);
        assert_eq!(entry.frequency(0), 1);
        assert_eq!(entry.counts.len(), 7);
    }

    #[test]
    fn out_of_range_face_gets_a_slot() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Setback, Some(9), Some(6));
        let entry = ledger.entry(&DieDenomination::Setback).unwrap();
        assert_eq!(entry.faces, 6);
        assert_eq!(entry.frequency(9), 1);
        assert_eq!(entry.counts.len(), 7);
    }

    #[test]
    fn faces_fixed_at_first_observation() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Ability, Some(1), Some(8));
        ledger.record_face(&DieDenomination::Ability, Some(1), Some(12));
        assert_eq!(ledger.entry(&DieDenomination::Ability).unwrap().faces, 8);
    }

    #[test]
    fn snapshot_serializes_by_tag() {
        let ledger = Ledger::new();
        ledger.record_face(&DieDenomination::Setback, Some(1), Some(6));
        let json = serde_json::to_value(ledger.snapshot()).unwrap();
        assert_eq!(json["s"]["rolls"], 1);
    }

    proptest! {
        #[test]
        fn counts_match_valid_calls(
            faces in proptest::collection::vec(proptest::option::of(0u32..=7), 0..64)
        ) {
            let ledger = Ledger::new();
            for &face in &faces {
                ledger.record_face(&DieDenomination::Boost, face, Some(6));
            }
            let valid = faces.iter().flatten().count() as u64;
            match ledger.entry(&DieDenomination::Boost) {
                Some(entry) => {
                    prop_assert_eq!(entry.rolls, valid);
                    for face in 0..=7 {
                        let expected = faces.iter().flatten().filter(|&&f| f == face).count() as u64;
                        prop_assert_eq!(entry.frequency(face), expected);
                    }
                }
                None => prop_assert_eq!(valid, 0),
            }
        }
    }
}
