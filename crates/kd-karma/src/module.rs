//! Module lifecycle: the entry points a host calls.
//!
//! `init` runs once at startup and only announces the module. `ready` runs
//! once the host has loaded its ruleset: if the ruleset matches, every die
//! class is wrapped and chat annotation switches on. Until then, and for any
//! other ruleset, every entry point is a no-op.

use std::sync::Arc;

use kd_dice::Ledger;

use crate::chat::{ChatAnnotator, ChatMessageData};
use crate::config::KarmaConfig;
use crate::host::Host;
use crate::interceptor::{Interceptor, Pipeline};
use crate::policy::{IdentityPolicy, KarmaPolicy};
use crate::tables::Resolver;

/// The karmic dice module.
pub struct KarmicDice {
    config: KarmaConfig,
    interceptor: Interceptor,
    annotator: ChatAnnotator,
    active: bool,
}

impl KarmicDice {
    /// Assemble the module from its parts.
    pub fn new(
        config: KarmaConfig,
        ledger: Arc<Ledger>,
        policy: Arc<dyn KarmaPolicy>,
        resolver: Resolver,
    ) -> Self {
        let pipeline = Pipeline {
            ledger,
            policy,
            resolver: resolver.clone(),
            default_faces: config.default_faces,
        };
        Self {
            annotator: ChatAnnotator::new(resolver, config.summary_title.clone()),
            interceptor: Interceptor::new(pipeline),
            config,
            active: false,
        }
    }

    /// Identity policy, standard tables, and a fresh ledger.
    pub fn standard(config: KarmaConfig) -> Self {
        Self::new(
            config,
            Arc::new(Ledger::new()),
            Arc::new(IdentityPolicy),
            Resolver::standard(),
        )
    }

    /// The configuration in use.
    pub fn config(&self) -> &KarmaConfig {
        &self.config
    }

    /// The roll statistics ledger.
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.interceptor.pipeline().ledger
    }

    /// True once `ready` has activated the pipeline.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Startup signal. Nothing is intercepted until `ready`.
    pub fn init(&self) {
        tracing::info!(
            policy = self.interceptor.pipeline().policy.name(),
            "initializing karmic dice infrastructure"
        );
    }

    /// Readiness signal: check the ruleset and wrap the host's die classes.
    ///
    /// Returns the number of classes newly wrapped.
    pub fn ready(&mut self, host: &mut dyn Host) -> usize {
        if !self.config.enabled {
            tracing::info!("karmic dice disabled by configuration");
            return 0;
        }
        if host.system_id() != self.config.system_id {
            tracing::warn!(
                system = host.system_id(),
                expected = %self.config.system_id,
                "not running in the expected system; karmic dice will be idle"
            );
            return 0;
        }

        let installed = self.interceptor.install_all(host.dice_registry_mut());
        self.active = true;
        tracing::info!(installed, "karmic dice ready; dice rolls are now intercepted");
        installed
    }

    /// Pre-persistence signal for one chat message.
    ///
    /// Returns whether the message body was changed.
    pub fn pre_create_chat_message(&self, data: &mut ChatMessageData) -> bool {
        if !self.active {
            return false;
        }
        self.annotator.annotate(data)
    }
}
