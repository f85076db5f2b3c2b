//! Run settings resolved from flags, environment, files and defaults.
use std::env;

use skirmish_core::CombatConfig;

/// Seed used when neither the command line, the environment nor the
/// scenario names one.
pub const DEFAULT_SEED: u64 = 0;

/// Settings for one encounter run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSettings {
    pub seed: u64,
    pub combat: CombatConfig,
}

/// Values supplied through the environment.
///
/// Environment variables:
/// - `SKIRMISH_SEED` - Master seed for the dice stream
/// - `SKIRMISH_ROUND_CAP` - Rounds before the encounter times out
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub seed: Option<u64>,
    pub round_cap: Option<u32>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            seed: read_env("SKIRMISH_SEED"),
            round_cap: read_env("SKIRMISH_ROUND_CAP"),
        }
    }
}

/// Layered inputs, strongest first within each field.
#[derive(Clone, Debug, Default)]
pub struct SettingsLayers {
    pub flag_seed: Option<u64>,
    pub flag_round_cap: Option<u32>,
    pub env: EnvOverrides,
    pub scenario_seed: Option<u64>,
    pub scenario_round_cap: Option<u32>,
    /// From `--config`, or the built-in defaults.
    pub file: CombatConfig,
}

impl SettingsLayers {
    /// Precedence: flag > environment > scenario > config file > default.
    pub fn resolve(self) -> RunSettings {
        let seed = self
            .flag_seed
            .or(self.env.seed)
            .or(self.scenario_seed)
            .unwrap_or(DEFAULT_SEED);

        let mut combat = self.file;
        if let Some(cap) = self
            .flag_round_cap
            .or(self.env.round_cap)
            .or(self.scenario_round_cap)
        {
            combat.round_cap = cap;
        }

        RunSettings { seed, combat }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}: cannot parse '{}'", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_any_layer() {
        let settings = SettingsLayers::default().resolve();
        assert_eq!(settings.seed, DEFAULT_SEED);
        assert_eq!(settings.combat, CombatConfig::default());
    }

    #[test]
    fn flags_beat_environment_beat_scenario() {
        let layers = SettingsLayers {
            flag_seed: None,
            flag_round_cap: Some(3),
            env: EnvOverrides {
                seed: Some(11),
                round_cap: Some(5),
            },
            scenario_seed: Some(99),
            scenario_round_cap: Some(8),
            file: CombatConfig::with_round_cap(12),
        };

        let settings = layers.resolve();
        assert_eq!(settings.seed, 11);
        assert_eq!(settings.combat.round_cap, 3);
    }

    #[test]
    fn config_file_applies_when_nothing_overrides() {
        let mut file = CombatConfig::with_round_cap(12);
        file.fight_for_life_dc = 15;

        let settings = SettingsLayers {
            scenario_seed: Some(99),
            file,
            ..SettingsLayers::default()
        }
        .resolve();

        assert_eq!(settings.seed, 99);
        assert_eq!(settings.combat.round_cap, 12);
        assert_eq!(settings.combat.fight_for_life_dc, 15);
    }
}
