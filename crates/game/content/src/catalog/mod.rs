//! Built-in content: the standard action catalog and armory.
//!
//! Both can be extended or replaced by data files through the loaders.
mod actions;
mod armory;

pub use actions::standard_actions;
pub use armory::Armory;

use skirmish_core::{ActionDef, ActionOracle};

/// In-memory action catalog.
///
/// Order matters: the decision engine walks actions in catalog order and
/// keeps the first of equally good candidates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticActionCatalog {
    actions: Vec<ActionDef>,
}

impl StaticActionCatalog {
    pub fn new(actions: Vec<ActionDef>) -> Self {
        Self { actions }
    }

    pub fn standard() -> Self {
        Self::new(standard_actions())
    }

    /// Adds or replaces (by case-insensitive name) actions, keeping the
    /// position of replaced entries.
    pub fn extend(&mut self, actions: impl IntoIterator<Item = ActionDef>) {
        for action in actions {
            match self
                .actions
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(&action.name))
            {
                Some(slot) => *slot = action,
                None => self.actions.push(action),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| a.name.as_str())
    }
}

impl ActionOracle for StaticActionCatalog {
    fn actions(&self) -> &[ActionDef] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ActionEffect, ArmsRequirement, Hand, TargetType};

    #[test]
    fn standard_catalog_has_unique_names() {
        let catalog = StaticActionCatalog::standard();
        let mut names: Vec<String> = catalog.names().map(str::to_ascii_lowercase).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        assert!(catalog.action("power attack").is_some());
    }

    #[test]
    fn every_arms_requirement_gates_a_standard_action() {
        let catalog = StaticActionCatalog::standard();
        for requirement in [
            ArmsRequirement::Armed,
            ArmsRequirement::Melee,
            ArmsRequirement::Ranged,
            ArmsRequirement::Shield,
            ArmsRequirement::TwoHanded,
            ArmsRequirement::DualWield,
        ] {
            assert!(
                catalog.actions().iter().any(|action| action.arms == requirement),
                "no action requires {requirement}"
            );
        }

        let flurry = catalog.action("flurry").unwrap();
        assert!(matches!(
            flurry.effect,
            ActionEffect::WeaponAttack {
                hand: Hand::Both,
                ..
            }
        ));
    }

    #[test]
    fn extend_replaces_in_place() {
        let mut catalog = StaticActionCatalog::standard();
        let before = catalog.len();
        let position = catalog.names().position(|n| n == "Dash").unwrap();

        catalog.extend([
            ActionDef::new("dash", TargetType::SelfOnly, ActionEffect::Idle),
            ActionDef::new("Taunt", TargetType::Enemy, ActionEffect::Idle).range(1),
        ]);

        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.actions()[position].name, "dash");
        assert_eq!(catalog.names().last(), Some("Taunt"));
    }
}
