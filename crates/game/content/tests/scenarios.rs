//! Bundled data files load and play out deterministically.

use std::path::PathBuf;

use skirmish_content::{Armory, ConfigLoader, ScenarioLoader, StaticActionCatalog};
use skirmish_core::{CombatEnv, Encounter, SeededDice};

fn data(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(path)
}

#[test]
fn bundled_config_matches_defaults() {
    let config = ConfigLoader::load(&data("config.toml")).unwrap();
    assert_eq!(config, skirmish_core::CombatConfig::default());
}

#[test]
fn bundled_scenarios_load() {
    let armory = Armory::standard();
    for name in ["crossroads.ron", "duel.ron"] {
        let scenario = ScenarioLoader::load(&data("scenarios").join(name), &armory).unwrap();
        assert!(!scenario.attackers.members.is_empty(), "{name}");
        assert!(!scenario.defenders.members.is_empty(), "{name}");
        assert!(scenario.seed.is_some(), "{name}");
    }
}

#[test]
fn crossroads_replays_identically() {
    let scenario =
        ScenarioLoader::load(&data("scenarios/crossroads.ron"), &Armory::standard()).unwrap();
    let catalog = StaticActionCatalog::standard();
    let config = skirmish_core::CombatConfig::default();
    let env = CombatEnv::new(&scenario.battleground, &catalog, &config);

    let play = || {
        let encounter = Encounter::new(
            env,
            scenario.attackers.clone(),
            scenario.defenders.clone(),
        )
        .unwrap();
        encounter.run(&mut SeededDice::new(42))
    };

    let first = play();
    let second = play();
    assert_eq!(first, second);
    assert!(first.rounds.len() as u32 <= config.round_cap);
    assert!(first.turn_count() > 0);
}
