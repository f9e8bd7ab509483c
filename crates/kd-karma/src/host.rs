//! The host platform boundary.
//!
//! A host exposes a registry of die classes, each able to roll one die
//! asynchronously. The pipeline never rolls dice itself; it wraps the host's
//! classes and lets every roll pass through. [`StandardDie`] and
//! [`MemoryHost`] are a complete in-process host used by the CLI and tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use kd_dice::{DEFAULT_FACES, DieDenomination, DieOutcome};

use crate::config::DEFAULT_SYSTEM_ID;
use crate::error::HostResult;
use crate::tables::{ResultTable, ResultTables, SymbolRegistry, label_for};

/// Options forwarded to a die class's roll operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOptions {
    /// Force the lowest face.
    pub minimize: bool,
    /// Force the highest face.
    pub maximize: bool,
}

/// A die class that can roll one die.
#[async_trait]
pub trait DieTerm: Send + Sync {
    /// Display name of the class. Not necessarily unique.
    fn class_name(&self) -> &str;

    /// True if rolls of this class already pass through the karma pipeline.
    fn is_karmic(&self) -> bool {
        false
    }

    /// Denomination the class rolls.
    fn denomination(&self) -> DieDenomination;

    /// Faces on the die, if the class declares them.
    fn faces(&self) -> Option<u32>;

    /// Roll one die.
    async fn roll(&self, options: RollOptions) -> HostResult<DieOutcome>;
}

/// A shared handle to a die class.
pub type DieClass = Arc<dyn DieTerm>;

/// The host's ordered collection of die classes.
#[derive(Clone, Default)]
pub struct DiceRegistry {
    classes: Vec<DieClass>,
}

impl DiceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a die class.
    pub fn register(&mut self, class: DieClass) {
        self.classes.push(class);
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if no class is registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Iterate over the registered classes.
    pub fn iter(&self) -> impl Iterator<Item = &DieClass> {
        self.classes.iter()
    }

    /// Mutable access, used to substitute wrapped classes in place.
    pub fn classes_mut(&mut self) -> &mut [DieClass] {
        &mut self.classes
    }

    /// The first class rolling `denomination`.
    pub fn for_denomination(&self, denomination: &DieDenomination) -> Option<&DieClass> {
        self.classes
            .iter()
            .find(|c| &c.denomination() == denomination)
    }
}

/// What the pipeline needs from the host platform at startup.
pub trait Host {
    /// Identifier of the currently loaded ruleset.
    fn system_id(&self) -> &str;

    /// The die class registry, if the ruleset exposes one.
    fn dice_registry_mut(&mut self) -> Option<&mut DiceRegistry>;
}

/// A seeded die of one of the standard denominations.
pub struct StandardDie {
    class_name: String,
    denomination: DieDenomination,
    faces: u32,
    symbols: Option<ResultTable>,
    rng: Mutex<StdRng>,
}

impl StandardDie {
    /// A die rolling `denomination`, stamping symbols from `tables`.
    pub fn new(denomination: DieDenomination, tables: &ResultTables, seed: u64) -> Self {
        Self {
            class_name: format!("{}Die", label_for(&denomination)),
            faces: denomination.standard_faces().unwrap_or(DEFAULT_FACES),
            symbols: tables.table(&denomination).cloned(),
            denomination,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn next_face(&self, options: RollOptions) -> u32 {
        if options.minimize {
            return 1;
        }
        if options.maximize {
            return self.faces;
        }
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(1..=self.faces)
    }
}

#[async_trait]
impl DieTerm for StandardDie {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn denomination(&self) -> DieDenomination {
        self.denomination.clone()
    }

    fn faces(&self) -> Option<u32> {
        Some(self.faces)
    }

    async fn roll(&self, options: RollOptions) -> HostResult<DieOutcome> {
        let face = self.next_face(options);
        let mut outcome = DieOutcome::new(face);
        outcome.symbol = self
            .symbols
            .as_ref()
            .and_then(|table| table.get(&face))
            .cloned();
        Ok(outcome)
    }
}

/// An in-process host with the seven standard die classes.
pub struct MemoryHost {
    system_id: String,
    registry: Option<DiceRegistry>,
}

impl MemoryHost {
    /// A host running `system_id` with the given registry.
    pub fn new(system_id: impl Into<String>, registry: Option<DiceRegistry>) -> Self {
        Self {
            system_id: system_id.into(),
            registry,
        }
    }

    /// The narrative dice ruleset with one seeded class per denomination.
    pub fn standard(tables: &ResultTables, seed: u64) -> Self {
        let mut registry = DiceRegistry::new();
        for (offset, denom) in DieDenomination::STANDARD.into_iter().enumerate() {
            let seed = seed.wrapping_add(offset as u64);
            registry.register(Arc::new(StandardDie::new(denom, tables, seed)));
        }
        Self::new(DEFAULT_SYSTEM_ID, Some(registry))
    }

    /// Replace the ruleset identifier.
    pub fn with_system_id(mut self, system_id: impl Into<String>) -> Self {
        self.system_id = system_id.into();
        self
    }

    /// Read access to the registry.
    pub fn registry(&self) -> Option<&DiceRegistry> {
        self.registry.as_ref()
    }
}

impl Host for MemoryHost {
    fn system_id(&self) -> &str {
        &self.system_id
    }

    fn dice_registry_mut(&mut self) -> Option<&mut DiceRegistry> {
        self.registry.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn standard_die_rolls_in_range_with_symbols() {
        let die = StandardDie::new(DieDenomination::Boost, &ResultTables::standard(), 7);
        assert_eq!(die.class_name(), "BoostDie");
        assert_eq!(die.faces(), Some(6));
        for _ in 0..50 {
            let outcome = die.roll(RollOptions::default()).await.unwrap();
            assert!((1..=6).contains(&outcome.result));
            assert!(outcome.symbol.is_some());
            assert!(!outcome.is_adjusted());
        }
    }

    #[tokio::test]
    async fn roll_options() {
        let die = StandardDie::new(DieDenomination::Challenge, &ResultTables::new(), 1);
        let min = RollOptions {
            minimize: true,
            ..RollOptions::default()
        };
        let max = RollOptions {
            maximize: true,
            ..RollOptions::default()
        };
        assert_eq!(die.roll(min).await.unwrap().result, 1);
        let top = die.roll(max).await.unwrap();
        assert_eq!(top.result, 12);
        assert!(top.symbol.is_none());
    }

    #[tokio::test]
    async fn seeded_dice_are_deterministic() {
        let tables = ResultTables::standard();
        let a = StandardDie::new(DieDenomination::Force, &tables, 99);
        let b = StandardDie::new(DieDenomination::Force, &tables, 99);
        for _ in 0..10 {
            let ra = a.roll(RollOptions::default()).await.unwrap();
            let rb = b.roll(RollOptions::default()).await.unwrap();
            assert_eq!(ra.result, rb.result);
        }
    }

    #[test]
    fn standard_host_registry() {
        let mut host = MemoryHost::standard(&ResultTables::standard(), 42);
        assert_eq!(host.system_id(), "starwarsffg");
        let registry = host.dice_registry_mut().unwrap();
        assert_eq!(registry.len(), 7);
        let setback = registry.for_denomination(&DieDenomination::Setback).unwrap();
        assert_eq!(setback.class_name(), "SetbackDie");
    }
}
