//! Roll interception.
//!
//! [`KarmicTerm`] decorates a host die class: it awaits the original roll,
//! then records the face in the ledger, asks the policy for a replacement,
//! and, if the face changed, re-stamps the outcome's symbol and attaches an
//! adjustment record. Any fault in that post-processing is logged and the
//! unadjusted outcome is returned; faults from the original roll pass
//! through untouched.
//!
//! [`Interceptor`] installs the decorator on a registry, at most once per
//! class. A wrapped class says so through [`DieTerm::is_karmic`], so a second
//! installer sharing the registry leaves it alone.

use std::sync::Arc;

use async_trait::async_trait;

use kd_dice::{DieDenomination, DieOutcome, Ledger};

use crate::error::{HostResult, KarmaError, KarmaResult};
use crate::host::{DiceRegistry, DieClass, DieTerm, RollOptions};
use crate::policy::KarmaPolicy;
use crate::tables::Resolver;

/// Shared state every wrapped class reports to.
#[derive(Clone)]
pub struct Pipeline {
    /// Roll statistics.
    pub ledger: Arc<Ledger>,
    /// Adjustment decision point.
    pub policy: Arc<dyn KarmaPolicy>,
    /// Symbol lookups for re-stamping adjusted faces.
    pub resolver: Resolver,
    /// Faces assumed when a class declares none.
    pub default_faces: u32,
}

impl Pipeline {
    /// Record `outcome`, consult the policy, and adjust in place.
    ///
    /// Returns whether the outcome was changed. On error the outcome is
    /// left exactly as rolled.
    pub fn process(
        &self,
        denomination: &DieDenomination,
        declared_faces: Option<u32>,
        outcome: &mut DieOutcome,
    ) -> KarmaResult<bool> {
        let faces = declared_faces
            .filter(|&f| f > 0)
            .unwrap_or(self.default_faces);
        let original = outcome.result;

        self.ledger.record_face(denomination, Some(original), Some(faces));
        let history = self.ledger.entry(denomination);
        let adjusted = self
            .policy
            .apply(denomination, original, faces, history.as_ref())?;

        if adjusted == original {
            return Ok(false);
        }
        if !(1..=faces).contains(&adjusted) {
            return Err(KarmaError::FaceOutOfRange {
                denomination: denomination.clone(),
                face: adjusted,
                faces,
            });
        }

        let symbol = self.resolver.symbol_for(denomination, adjusted).cloned();
        Ok(outcome.adjust(denomination.clone(), adjusted, symbol))
    }
}

/// A die class whose rolls pass through the karma pipeline.
pub struct KarmicTerm {
    inner: DieClass,
    pipeline: Pipeline,
}

impl KarmicTerm {
    /// Wrap `inner`.
    pub fn new(inner: DieClass, pipeline: Pipeline) -> Self {
        Self { inner, pipeline }
    }
}

#[async_trait]
impl DieTerm for KarmicTerm {
    fn class_name(&self) -> &str {
        self.inner.class_name()
    }

    fn is_karmic(&self) -> bool {
        true
    }

    fn denomination(&self) -> DieDenomination {
        self.inner.denomination()
    }

    fn faces(&self) -> Option<u32> {
        self.inner.faces()
    }

    async fn roll(&self, options: RollOptions) -> HostResult<DieOutcome> {
        let mut outcome = self.inner.roll(options).await?;

        let denomination = self.inner.denomination();
        let mut working = outcome.clone();
        match self
            .pipeline
            .process(&denomination, self.inner.faces(), &mut working)
        {
            Ok(true) => {
                tracing::debug!(
                    class = self.inner.class_name(),
                    denomination = %denomination,
                    original = outcome.result,
                    adjusted = working.result,
                    "karmic adjustment applied"
                );
                outcome = working;
            }
            Ok(false) => {}
            Err(e) => {
                tracing::error!(
                    class = self.inner.class_name(),
                    denomination = %denomination,
                    error = %e,
                    "error applying karmic adjustment to die roll"
                );
            }
        }
        Ok(outcome)
    }
}

/// Installs [`KarmicTerm`] on die classes, once per class.
pub struct Interceptor {
    pipeline: Pipeline,
    // Originals wrapped here, compared by pointer. Held, so no address is
    // reused while listed.
    wrapped: Vec<DieClass>,
}

impl Interceptor {
    /// An interceptor feeding `pipeline`.
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            wrapped: Vec::new(),
        }
    }

    /// The shared pipeline state.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// True if `class` is a karmic wrapper, or an original this
    /// interceptor has already wrapped.
    pub fn is_wrapped(&self, class: &DieClass) -> bool {
        class.is_karmic() || self.wrapped.iter().any(|c| Arc::ptr_eq(c, class))
    }

    /// Wrap one class. A class that is already wrapped comes back as-is.
    pub fn install_on_term(&mut self, class: DieClass) -> DieClass {
        if self.is_wrapped(&class) {
            return class;
        }
        tracing::info!(
            class = class.class_name(),
            denomination = %class.denomination(),
            "installed karmic patch on die term"
        );
        self.wrapped.push(Arc::clone(&class));
        Arc::new(KarmicTerm::new(class, self.pipeline.clone()))
    }

    /// Wrap every class in `registry`. Returns how many were newly wrapped.
    ///
    /// A missing registry is reported and nothing is installed.
    pub fn install_all(&mut self, registry: Option<&mut DiceRegistry>) -> usize {
        let Some(registry) = registry else {
            tracing::warn!("die class registry not found; cannot patch dice terms");
            return 0;
        };
        let mut installed = 0;
        for slot in registry.classes_mut() {
            if self.is_wrapped(slot) {
                continue;
            }
            *slot = self.install_on_term(Arc::clone(slot));
            installed += 1;
        }
        installed
    }
}
