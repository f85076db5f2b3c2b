//! Read-only collaborators of an encounter.
//!
//! [`CombatEnv`] bundles the battleground, the action catalog and the
//! configuration so the engine can reach everything it needs without hard
//! coupling to concrete content.
mod actions;

pub use actions::ActionOracle;

use crate::battleground::Battleground;
use crate::config::CombatConfig;

/// Aggregates the read-only inputs of the decision engine and encounter loop.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    battleground: &'a Battleground,
    actions: &'a dyn ActionOracle,
    config: &'a CombatConfig,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        battleground: &'a Battleground,
        actions: &'a dyn ActionOracle,
        config: &'a CombatConfig,
    ) -> Self {
        Self {
            battleground,
            actions,
            config,
        }
    }

    pub fn battleground(&self) -> &'a Battleground {
        self.battleground
    }

    pub fn actions(&self) -> &'a dyn ActionOracle {
        self.actions
    }

    pub fn config(&self) -> &'a CombatConfig {
        self.config
    }
}

impl std::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("nodes", &self.battleground.len())
            .field("actions", &self.actions.actions().len())
            .field("config", self.config)
            .finish()
    }
}
