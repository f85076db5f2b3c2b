//! Combat configuration loader.

use std::path::Path;

use skirmish_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            config.utility_hp_weight > 0.0 && config.utility_resource_weight > 0.0,
            "Utility weights must be positive in {}",
            path.display()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let (_dir, path) = write("round_cap = 7\n");
        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.round_cap, 7);
        assert_eq!(
            config.fight_for_life_dc,
            CombatConfig::DEFAULT_FIGHT_FOR_LIFE_DC
        );
    }

    #[test]
    fn rejects_non_positive_weights() {
        let (_dir, path) = write("utility_hp_weight = 0.0\n");
        assert!(ConfigLoader::load(&path).is_err());
    }
}
