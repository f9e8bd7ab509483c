//! End-to-end: host rolls → interception → chat annotation.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kd_dice::{DieDenomination, DieOutcome, Ledger, LedgerEntry, Roll, RollBatch, Term};
use kd_karma::{
    ChatMessageData, DiceRegistry, DieTerm, HostResult, KarmaConfig, KarmaPolicy, KarmaResult,
    KarmicDice, MemoryHost, Resolver, RollOptions,
};

struct ScriptedDie {
    denomination: DieDenomination,
    faces: u32,
    script: Mutex<Vec<u32>>,
}

impl ScriptedDie {
    fn boost(script: &[u32]) -> Self {
        Self {
            denomination: DieDenomination::Boost,
            faces: 6,
            script: Mutex::new(script.iter().rev().copied().collect()),
        }
    }
}

#[async_trait]
impl DieTerm for ScriptedDie {
    fn class_name(&self) -> &str {
        "BoostDie"
    }

    fn denomination(&self) -> DieDenomination {
        self.denomination.clone()
    }

    fn faces(&self) -> Option<u32> {
        Some(self.faces)
    }

    async fn roll(&self, _options: RollOptions) -> HostResult<DieOutcome> {
        let face = self.script.lock().unwrap().pop().unwrap();
        Ok(DieOutcome::new(face))
    }
}

/// Turns blanks into the next face up.
struct NoBlanks;

impl KarmaPolicy for NoBlanks {
    fn name(&self) -> &str {
        "no-blanks"
    }

    fn apply(
        &self,
        _denomination: &DieDenomination,
        face: u32,
        faces: u32,
        _history: Option<&LedgerEntry>,
    ) -> KarmaResult<u32> {
        Ok(if face <= 2 { 3.min(faces) } else { face })
    }
}

fn host(script: &[u32]) -> MemoryHost {
    let mut registry = DiceRegistry::new();
    registry.register(Arc::new(ScriptedDie::boost(script)));
    MemoryHost::new("starwarsffg", Some(registry))
}

async fn roll_all(host: &MemoryHost, times: usize) -> RollBatch {
    let class = host
        .registry()
        .and_then(|r| r.for_denomination(&DieDenomination::Boost))
        .unwrap()
        .clone();
    let mut results = Vec::new();
    for _ in 0..times {
        results.push(class.roll(RollOptions::default()).await.unwrap());
    }
    RollBatch::new(vec![Roll::new(vec![Term::new(
        DieDenomination::Boost,
        6,
        results,
    )])])
}

#[tokio::test]
async fn boost_scenario_with_identity_policy() {
    let mut host = host(&[2, 2, 4, 2]);
    let mut module = KarmicDice::standard(KarmaConfig::default());
    module.init();
    assert_eq!(module.ready(&mut host), 1);

    let batch = roll_all(&host, 4).await;
    assert_eq!(batch.changes().len(), 0);

    let entry = module.ledger().entry(&DieDenomination::Boost).unwrap();
    assert_eq!(entry.rolls, 4);
    let expected: BTreeMap<u32, u64> =
        [(1, 0), (2, 3), (3, 0), (4, 1), (5, 0), (6, 0)].into_iter().collect();
    assert_eq!(entry.counts, expected);

    let mut data = ChatMessageData::new("<p>4 boost dice</p>", &batch).unwrap();
    let before = data.clone();
    assert!(!module.pre_create_chat_message(&mut data));
    assert_eq!(data, before);
}

#[tokio::test]
async fn adjusted_rolls_reach_the_chat_card() {
    let mut host = host(&[1, 5, 2]);
    let ledger = Arc::new(Ledger::new());
    let mut module = KarmicDice::new(
        KarmaConfig::default(),
        Arc::clone(&ledger),
        Arc::new(NoBlanks),
        Resolver::standard(),
    );
    module.ready(&mut host);

    let batch = roll_all(&host, 3).await;
    let faces: Vec<u32> = batch.outcomes().map(|o| o.result).collect();
    assert_eq!(faces, vec![3, 5, 3]);

    // The ledger keeps what was actually rolled.
    let entry = ledger.entry(&DieDenomination::Boost).unwrap();
    assert_eq!(entry.frequency(1), 1);
    assert_eq!(entry.frequency(2), 1);
    assert_eq!(entry.frequency(3), 0);

    let mut data = ChatMessageData::new("<p>3 boost dice</p>", &batch).unwrap();
    assert!(module.pre_create_chat_message(&mut data));
    let content = data.content.unwrap();
    assert!(content.starts_with("<div class=\"karmic-dice-card\">\n<p>3 boost dice</p>"));
    assert_eq!(content.matches("<li>").count(), 2);
    assert!(content.contains("<summary>Karmic Dice Adjustments</summary>"));
    assert!(content.contains("Blank</span> &rarr;"));
    assert!(content.contains("Success</span></li>"));
}

#[tokio::test]
async fn second_module_on_the_same_host_counts_each_roll_once() {
    let mut host = host(&[4]);
    let ledger = Arc::new(Ledger::new());
    let build = || {
        KarmicDice::new(
            KarmaConfig::default(),
            Arc::clone(&ledger),
            Arc::new(kd_karma::IdentityPolicy),
            Resolver::standard(),
        )
    };
    let mut first = build();
    let mut second = build();
    assert_eq!(first.ready(&mut host), 1);
    assert_eq!(second.ready(&mut host), 0);
    assert!(second.is_active());

    roll_all(&host, 1).await;
    assert_eq!(ledger.total_rolls(), 1);
}
