//! The legal action set for a character this turn.

use std::borrow::Cow;

use crate::action::ActionDef;
use crate::effect::ActionForcingKind;
use crate::state::CharacterState;

/// The action an action-forcing effect imposes, if any.
pub fn forced_action(state: &CharacterState) -> Option<ActionDef> {
    state.effects.forcing().map(|kind| match kind {
        ActionForcingKind::Prone => ActionDef::stand_up(),
        ActionForcingKind::Stunned => ActionDef::no_action(),
        ActionForcingKind::Dying => ActionDef::fight_for_life(),
    })
}

/// Every action `state` may take, in catalog order.
///
/// A forced action replaces the whole catalog. Otherwise an action is legal
/// when the class may use it, the character can pay for it, the arms in hand
/// satisfy it and no effect restricts its category.
pub fn legal_actions<'a>(
    state: &CharacterState,
    catalog: &'a [ActionDef],
) -> Vec<Cow<'a, ActionDef>> {
    if let Some(forced) = forced_action(state) {
        return vec![Cow::Owned(forced)];
    }

    let character = &state.character;
    let resources = state.current_resources();
    catalog
        .iter()
        .filter(|action| action.classes.allows(character.class))
        .filter(|action| action.cost <= resources)
        .filter(|action| action.arms.is_met_by(&character.inventory.arms))
        .filter(|action| !state.effects.restricts(action.category))
        .map(Cow::Borrowed)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{ActionCategory, ActionEffect, TargetType};
    use crate::battleground::NodeId;
    use crate::character::{ArmsRequirement, Character, CharacterClass, ClassSet};
    use crate::effect::Effect;
    use crate::state::{Allegiance, CharacterId};

    fn catalog() -> Vec<ActionDef> {
        vec![
            ActionDef::new("Strike", TargetType::Enemy, ActionEffect::weapon_attack())
                .category(ActionCategory::Weapon),
            ActionDef::new("Cleave", TargetType::Enemy, ActionEffect::weapon_attack())
                .category(ActionCategory::Weapon)
                .arms(ArmsRequirement::TwoHanded),
            ActionDef::new("Firebolt", TargetType::Enemy, ActionEffect::Idle)
                .category(ActionCategory::Spell)
                .classes(ClassSet::CASTERS)
                .cost(1),
            ActionDef::new("Rally", TargetType::SelfOnly, ActionEffect::Idle).cost(99),
        ]
    }

    fn state(class: CharacterClass) -> CharacterState {
        let character = Arc::new(Character::builder("Hero", class).build());
        CharacterState::new(CharacterId(0), character, Allegiance::Attacker, NodeId(0))
    }

    fn names(actions: &[Cow<'_, ActionDef>]) -> Vec<String> {
        actions.iter().map(|a| a.name.clone()).collect()
    }

    #[test]
    fn filters_by_class_cost_and_arms() {
        let catalog = catalog();
        assert_eq!(
            names(&legal_actions(&state(CharacterClass::Fighter), &catalog)),
            vec!["Strike"]
        );
        assert_eq!(
            names(&legal_actions(&state(CharacterClass::Wizard), &catalog)),
            vec!["Strike", "Firebolt"]
        );
    }

    #[test]
    fn restricting_effects_remove_categories() {
        let catalog = catalog();
        let mut wizard = state(CharacterClass::Wizard);
        wizard.effects = wizard.effects.add(Effect::silenced(2));
        assert_eq!(names(&legal_actions(&wizard, &catalog)), vec!["Strike"]);

        wizard.effects = wizard.effects.add(Effect::disarmed(2));
        assert!(legal_actions(&wizard, &catalog).is_empty());
    }

    #[test]
    fn forcing_effects_replace_the_catalog() {
        let catalog = catalog();
        let mut fighter = state(CharacterClass::Fighter);

        fighter.effects = fighter.effects.add(Effect::prone());
        assert_eq!(names(&legal_actions(&fighter, &catalog)), vec!["Stand Up"]);

        fighter.effects = fighter.effects.add(Effect::stunned(1));
        assert_eq!(names(&legal_actions(&fighter, &catalog)), vec!["No Action"]);

        fighter.effects = fighter.effects.add(Effect::dying());
        assert_eq!(
            names(&legal_actions(&fighter, &catalog)),
            vec!["Fight For Life"]
        );
    }
}
