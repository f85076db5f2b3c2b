//! Content loaders for reading combat data from files.
//!
//! Actions, armories and scenarios are RON; combat configuration is TOML.
//! Every loader returns [`LoadResult`] with the offending path in context.

pub mod actions;
pub mod armory;
pub mod config;
pub mod scenario;

pub use actions::ActionLoader;
pub use armory::ArmoryLoader;
pub use config::ConfigLoader;
pub use scenario::{
    EdgeSpec, MemberSpec, NodeSpec, Scenario, ScenarioLoader, ScenarioSpec, SideSpec,
};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
