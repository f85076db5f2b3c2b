//! Utility scoring of hypothetical rosters.
//!
//! # Formula
//!
//! ```text
//! hp  = max(current_hp / max_hp, eps)          (1 when max_hp = 0)
//! res = max(current_res / max_res, eps)        (1 when max_res = 0)
//! u   = (w_hp + w_res) / (w_hp / hp + w_res / res)
//! ```
//!
//! A dying character scores 0. From an actor's point of view the utility of
//! a roster is the sum over its side minus the sum over the opposing side.

use crate::config::CombatConfig;
use crate::state::{Allegiance, CharacterState};

fn ratio(current: u32, max: u32) -> f64 {
    if max == 0 {
        return 1.0;
    }
    (f64::from(current) / f64::from(max)).max(CombatConfig::UTILITY_EPSILON)
}

/// Weighted harmonic mean of the hit point and resource ratios, in `[0, 1]`.
pub fn character_utility(state: &CharacterState, config: &CombatConfig) -> f64 {
    if state.is_dying() {
        return 0.0;
    }

    let hp = ratio(state.current_hit_points(), state.max_hit_points());
    let resources = ratio(state.current_resources(), state.max_resources());
    let (w_hp, w_res) = (config.utility_hp_weight, config.utility_resource_weight);

    let denominator = w_hp / hp + w_res / resources;
    if denominator <= 0.0 {
        return 0.0;
    }
    ((w_hp + w_res) / denominator).clamp(0.0, 1.0)
}

/// Allies minus enemies, as seen by `perspective`.
pub fn roster_utility<'a>(
    states: impl IntoIterator<Item = &'a CharacterState>,
    perspective: Allegiance,
    config: &CombatConfig,
) -> f64 {
    states.into_iter().fold(0.0, |total, state| {
        let value = character_utility(state, config);
        if state.allegiance == perspective {
            total + value
        } else {
            total - value
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::battleground::NodeId;
    use crate::character::{Character, CharacterClass};
    use crate::effect::Effect;
    use crate::state::{CharacterId, resolve};

    fn wizard(id: u32, allegiance: Allegiance) -> CharacterState {
        let character = Arc::new(Character::builder("Wizard", CharacterClass::Wizard).build());
        CharacterState::new(CharacterId(id), character, allegiance, NodeId(0))
    }

    #[test]
    fn fresh_character_scores_one() {
        let config = CombatConfig::default();
        let value = character_utility(&wizard(0, Allegiance::Attacker), &config);
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn hit_points_weigh_more_than_resources() {
        let config = CombatConfig::default();
        let fresh = wizard(0, Allegiance::Attacker);

        // wizard: 6 hp, 6 resources
        let hurt = resolve::take_damage(&fresh, 3).state;
        let drained = resolve::spend_resources(&fresh, 3).state;

        let hurt_value = character_utility(&hurt, &config);
        let drained_value = character_utility(&drained, &config);
        assert!(hurt_value < drained_value);
        assert!((hurt_value - 4.0 / 7.0).abs() < 1e-12);
        assert!((drained_value - 0.8).abs() < 1e-12);
    }

    #[test]
    fn exhausted_ratios_stay_finite() {
        let config = CombatConfig::default();
        let drained = resolve::spend_resources(&wizard(0, Allegiance::Attacker), 99).state;
        let value = character_utility(&drained, &config);
        assert!(value.is_finite());
        assert!((0.0..=1.0).contains(&value));
        assert!(value < 1e-4);
    }

    #[test]
    fn dying_scores_zero_and_sides_subtract() {
        let config = CombatConfig::default();
        let ally = wizard(0, Allegiance::Attacker);
        let enemy = wizard(1, Allegiance::Defender);
        assert!(roster_utility([&ally, &enemy], Allegiance::Attacker, &config).abs() < 1e-12);

        let dying = resolve::apply_effect(&enemy, Effect::dying()).state;
        assert_eq!(character_utility(&dying, &config), 0.0);
        let value = roster_utility([&ally, &dying], Allegiance::Attacker, &config);
        assert!((value - 1.0).abs() < 1e-12);
        let mirrored = roster_utility([&ally, &dying], Allegiance::Defender, &config);
        assert!((mirrored + 1.0).abs() < 1e-12);
    }
}
