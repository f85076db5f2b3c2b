//! Combat content and data loaders.
//!
//! This crate houses the built-in content and loaders for RON/TOML data files:
//! - The standard action catalog (an [`skirmish_core::ActionOracle`])
//! - The standard armory of weapons, armor and shields
//! - Scenarios: battleground graph plus two sides (RON)
//! - Combat configuration (TOML)
//!
//! Content is consumed by the engine through the oracle and never appears in
//! character state except as resolved equipment.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Armory, StaticActionCatalog, standard_actions};

#[cfg(feature = "loaders")]
pub use loaders::{
    ActionLoader, ArmoryLoader, ConfigLoader, LoadResult, Scenario, ScenarioLoader, ScenarioSpec,
};
