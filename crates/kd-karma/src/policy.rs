//! Karma policies: the single decision point for re-mapping a rolled face.
//!
//! A policy sees the denomination, the rolled face, the number of faces, and
//! the ledger history for that denomination. The interceptor records the
//! roll before asking, so the history already includes the face being
//! judged. Policies must not mutate anything and must answer with a face in
//! `1..=faces`; the interceptor rejects anything else. A policy that cannot
//! decide returns an error, and the roll is shown as rolled.

use kd_dice::{DieDenomination, LedgerEntry};

use crate::error::KarmaResult;

/// Decides whether a rolled face should be replaced.
pub trait KarmaPolicy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Return the face to show instead of `face`.
    fn apply(
        &self,
        denomination: &DieDenomination,
        face: u32,
        faces: u32,
        history: Option<&LedgerEntry>,
    ) -> KarmaResult<u32>;
}

/// Leaves every face as rolled.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPolicy;

impl KarmaPolicy for IdentityPolicy {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(
        &self,
        _denomination: &DieDenomination,
        face: u32,
        _faces: u32,
        _history: Option<&LedgerEntry>,
    ) -> KarmaResult<u32> {
        Ok(face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kd_dice::Ledger;
    use proptest::prelude::*;

    #[test]
    fn identity_name() {
        assert_eq!(IdentityPolicy.name(), "identity");
    }

    #[test]
    fn identity_ignores_history() {
        let ledger = Ledger::new();
        for _ in 0..10 {
            ledger.record_face(&DieDenomination::Boost, Some(1), Some(6));
        }
        let history = ledger.entry(&DieDenomination::Boost);
        assert_eq!(
            IdentityPolicy
                .apply(&DieDenomination::Boost, 1, 6, history.as_ref())
                .unwrap(),
            1
        );
    }

    proptest! {
        #[test]
        fn identity_law(tag in "[abpdcsf]", faces in 1u32..=20, seed in 0u32..1000) {
            let face = seed % faces + 1;
            let denom = DieDenomination::from_tag(&tag);
            prop_assert_eq!(IdentityPolicy.apply(&denom, face, faces, None).unwrap(), face);
        }
    }
}
