//! Action catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use skirmish_core::ActionDef;

use crate::catalog::StaticActionCatalog;
use crate::loaders::{LoadResult, read_file};

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionCatalogSpec {
    /// Start from the built-in catalog and layer these actions over it.
    #[serde(default)]
    pub extend_standard: bool,
    pub actions: Vec<ActionDef>,
}

/// Loader for action catalogs from RON files.
pub struct ActionLoader;

impl ActionLoader {
    /// Load an action catalog from a RON file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when the resulting
    /// catalog is empty.
    pub fn load(path: &Path) -> LoadResult<StaticActionCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!("Loaded {} actions from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn parse(content: &str) -> LoadResult<StaticActionCatalog> {
        let spec: ActionCatalogSpec = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        let catalog = if spec.extend_standard {
            let mut catalog = StaticActionCatalog::standard();
            catalog.extend(spec.actions);
            catalog
        } else {
            StaticActionCatalog::new(spec.actions)
        };

        anyhow::ensure!(!catalog.is_empty(), "Action catalog is empty");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{
        ActionCategory, ActionEffect, ActionOracle, Attribute, ClassSet, Hand, TargetType,
    };

    const CATALOG: &str = r#"(
        actions: [
            (
                name: "Lunge",
                category: Weapon,
                movement: (mode: Normal, budget: 2),
                target: Enemy,
                effect: WeaponAttack(attack_bonus: 1),
            ),
            (
                name: "Spark",
                category: Spell,
                cost: 1,
                classes: "WIZARD",
                target: Enemy,
                range: 2,
                effect: SpellAttack(damage: "1d6+1", save: Dexterity),
            ),
        ],
    )"#;

    #[test]
    fn parses_actions_with_defaults() {
        let catalog = ActionLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let lunge = catalog.action("lunge").unwrap();
        assert_eq!(lunge.category, ActionCategory::Weapon);
        assert_eq!(lunge.cost, 0);
        assert_eq!(
            lunge.effect,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: 1,
                damage_multiplier: 1,
                damage_bonus: 0,
                on_hit: Vec::new(),
            }
        );

        let spark = catalog.action("Spark").unwrap();
        assert_eq!(spark.target, TargetType::Enemy);
        assert_eq!(spark.classes, ClassSet::WIZARD);
        assert!(matches!(
            spark.effect,
            ActionEffect::SpellAttack { save: Attribute::Dexterity, .. }
        ));
    }

    #[test]
    fn class_restrictions_round_trip_as_flag_names() {
        let catalog = ActionLoader::parse(
            r#"(actions: [(
                name: "Sanctify",
                classes: "WIZARD | CLERIC",
                target: Ally,
                range: 1,
                effect: Heal(amount: "1d4"),
            )])"#,
        )
        .unwrap();
        let sanctify = catalog.action("Sanctify").unwrap().clone();
        assert_eq!(sanctify.classes, ClassSet::WIZARD | ClassSet::CLERIC);

        let text = ron::to_string(&ActionCatalogSpec {
            extend_standard: false,
            actions: vec![sanctify.clone()],
        })
        .unwrap();
        assert!(text.contains(r#""WIZARD | CLERIC""#), "{text}");

        let reloaded = ActionLoader::parse(&text).unwrap();
        assert_eq!(reloaded.action("Sanctify"), Some(&sanctify));
    }

    #[test]
    fn extends_the_standard_catalog() {
        let catalog = ActionLoader::parse(
            r#"(extend_standard: true, actions: [(name: "Dash", target: SelfOnly, effect: Idle)])"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), StaticActionCatalog::standard().len());
        assert_eq!(catalog.action("dash").map(|a| a.movement.budget), Some(0));
    }

    #[test]
    fn rejects_empty_catalogs() {
        assert!(ActionLoader::parse("(actions: [])").is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actions.ron");
        std::fs::write(&path, "(actions: [oops])").unwrap();

        let err = ActionLoader::load(&path).unwrap_err().to_string();
        assert!(err.contains("actions.ron"), "{err}");
    }
}
