//! Resolution operations.
//!
//! Each operation reads the current state and returns a [`Resolved`]: the
//! updated state plus the events describing the change. Hit points and
//! resources are clamped to `[0, max]` by every operation, whatever the
//! magnitude of the input.

use crate::character::{Attribute, Hand, Weapon};
use crate::dice::{Dice, DiceExpr, RollRecord};
use crate::effect::{Effect, EffectKind};
use crate::rules;

use super::{CharacterState, Event};

/// Updated state plus the events that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub state: CharacterState,
    pub events: Vec<Event>,
}

impl Resolved {
    /// No change yet.
    pub fn unchanged(state: &CharacterState) -> Self {
        Self {
            state: state.clone(),
            events: Vec::new(),
        }
    }

    fn record(&mut self, event: Event) {
        self.state = event.subject().clone();
        self.events.push(event);
    }

    /// Chains a further operation on the updated state.
    pub fn then(mut self, op: impl FnOnce(&CharacterState) -> Resolved) -> Self {
        let next = op(&self.state);
        self.state = next.state;
        self.events.extend(next.events);
        self
    }
}

// ============================================================================
// Hit Points and Resources
// ============================================================================

pub fn spend_resources(state: &CharacterState, amount: u32) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    let spent = amount.min(state.current_resources());
    if spent > 0 {
        let subject = CharacterState {
            resources_spent: state.resources_spent + spent,
            ..state.clone()
        };
        resolved.record(Event::ResourcesSpent {
            subject,
            amount: spent,
        });
    }
    resolved
}

pub fn restore_resources(state: &CharacterState, amount: u32) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    let restored = amount.min(state.resources_spent);
    if restored > 0 {
        let subject = CharacterState {
            resources_spent: state.resources_spent - restored,
            ..state.clone()
        };
        resolved.record(Event::ResourcesRestored {
            subject,
            amount: restored,
        });
    }
    resolved
}

pub fn heal(state: &CharacterState, amount: u32) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    let healed = amount.min(state.damage_taken);
    if healed > 0 {
        let subject = CharacterState {
            damage_taken: state.damage_taken - healed,
            ..state.clone()
        };
        resolved.record(Event::Healed {
            subject,
            amount: healed,
        });
    }
    resolved
}

/// Applies damage.
///
/// Effects removed on damage are stripped first. Damage is capped at the
/// remaining hit points; damage meeting or exceeding them leaves the
/// character dying.
pub fn take_damage(state: &CharacterState, amount: u32) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    if amount == 0 {
        return resolved;
    }

    let (_, stripped) = state.effects.strip_on_damage();
    let mut current = state.clone();
    for effect in stripped {
        current.effects = current.effects.remove_effect(&effect);
        resolved.record(Event::EffectRemoved {
            subject: current.clone(),
            effect,
        });
    }

    let remaining = current.current_hit_points();
    let dealt = amount.min(remaining);
    let subject = CharacterState {
        damage_taken: current.damage_taken + dealt,
        ..current
    };
    resolved.record(Event::Damaged {
        subject,
        amount: dealt,
    });

    if amount >= remaining {
        resolved = resolved.then(|s| apply_effect(s, Effect::dying()));
    }
    resolved
}

// ============================================================================
// Effects
// ============================================================================

/// Adds an effect under the ledger's conflict policy.
///
/// Emits `EffectRemoved` for anything the new effect displaced and
/// `EffectAdded` when the effect took hold. An effect losing to a more
/// severe one changes nothing.
pub fn apply_effect(state: &CharacterState, effect: Effect) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    let ledger = state.effects.add(effect);
    if ledger == state.effects && state.effects.get(effect.kind()) != Some(effect) {
        return resolved;
    }

    let displaced: Vec<Effect> = state
        .effects
        .all()
        .into_iter()
        .filter(|old| old.kind() != effect.kind() && !ledger.has(old.kind()))
        .collect();
    let mut current = state.clone();
    for old in displaced {
        current = CharacterState {
            effects: current.effects.remove_effect(&old),
            ..current
        };
        resolved.record(Event::EffectRemoved {
            subject: current.clone(),
            effect: old,
        });
    }

    resolved.record(Event::EffectAdded {
        subject: CharacterState {
            effects: ledger,
            ..current
        },
        effect,
    });
    resolved
}

pub fn remove_effect(state: &CharacterState, kind: EffectKind) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    if let Some(effect) = state.effects.get(kind) {
        resolved.record(Event::EffectRemoved {
            subject: CharacterState {
                effects: state.effects.remove(kind),
                ..state.clone()
            },
            effect,
        });
    }
    resolved
}

// ============================================================================
// Attacks
// ============================================================================

/// Parameters of a weapon attack on top of the wielded weapons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponStrike<'a> {
    pub hand: Hand,
    pub attack_bonus: i32,
    pub damage_multiplier: u32,
    pub damage_bonus: i32,
    pub on_hit: &'a [Effect],
}

impl Default for WeaponStrike<'_> {
    fn default() -> Self {
        Self {
            hand: Hand::Main,
            attack_bonus: 0,
            damage_multiplier: 1,
            damage_bonus: 0,
            on_hit: &[],
        }
    }
}

/// Parameters of a spell attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellStrike<'a> {
    pub damage: DiceExpr,
    pub save: Attribute,
    pub dc_bonus: i32,
    pub on_hit: &'a [Effect],
}

/// Resolves a weapon attack against `defender`.
///
/// # Formula
///
/// ```text
/// offense = d20 + attribute_mod + weapon.bonus + level_mod + attack_bonus
/// hit     = offense >= defender.armor_class
/// damage  = max(0, weapon_roll * multiplier + attribute_mod + weapon.bonus + damage_bonus)
/// ```
///
/// Each weapon swung by `strike.hand` rolls separately, main hand first; a
/// defender left dying takes no further swings. On a hit, damage is applied
/// (see [`take_damage`]) and then every on-hit effect. A miss changes
/// nothing beyond the roll record.
pub fn resolve_weapon_attack(
    attacker: &CharacterState,
    defender: &CharacterState,
    strike: &WeaponStrike<'_>,
    dice: &mut impl Dice,
) -> Resolved {
    let mut resolved = Resolved::unchanged(defender);
    for weapon in attacker.character.inventory.arms.swings(strike.hand) {
        if resolved.state.is_dying() {
            break;
        }
        resolved = resolved.then(|s| swing(attacker, s, &weapon, strike, dice));
    }
    resolved
}

fn swing(
    attacker: &CharacterState,
    defender: &CharacterState,
    weapon: &Weapon,
    strike: &WeaponStrike<'_>,
    dice: &mut impl Dice,
) -> Resolved {
    let character = &attacker.character;
    let attribute_mod = character.modifier(weapon.attribute);

    let offense = attribute_mod + weapon.bonus + character.level_modifier() + strike.attack_bonus;
    let roll = DiceExpr::new(1, 20, offense).roll(dice);
    let armor_class = defender.character.armor_class();
    let hit = roll.total >= armor_class;

    let damage = hit.then(|| weapon.damage.roll(dice));
    let amount = damage.as_ref().map_or(0, |record| {
        let scaled = record.total.saturating_mul(strike.damage_multiplier as i32);
        scaled
            .saturating_add(attribute_mod + weapon.bonus + strike.damage_bonus)
            .max(0) as u32
    });

    let mut resolved = Resolved::unchanged(defender);
    resolved.record(Event::WeaponAttack {
        attacker: attacker.id,
        subject: defender.clone(),
        weapon: weapon.name.clone(),
        roll,
        armor_class,
        hit,
        damage,
    });
    if hit {
        resolved = land(resolved, amount, strike.on_hit);
    }
    resolved
}

/// Resolves a spell attack against `defender`.
///
/// # Formula
///
/// ```text
/// dc   = 8 + casting_mod + level_mod + dc_bonus
/// save = d20 + defender.save_mod + defender.level_mod
/// hit  = save < dc
/// ```
///
/// The defender resists by meeting or beating the difficulty class.
pub fn resolve_spell_attack(
    caster: &CharacterState,
    defender: &CharacterState,
    strike: &SpellStrike<'_>,
    dice: &mut impl Dice,
) -> Resolved {
    let difficulty_class = rules::spell_difficulty_class(&caster.character, strike.dc_bonus);
    let save_bonus = defender.modifier(strike.save) + defender.character.level_modifier();
    let save = DiceExpr::new(1, 20, save_bonus).roll(dice);
    let hit = save.total < difficulty_class;

    let damage = hit.then(|| strike.damage.roll(dice));
    let amount = damage.as_ref().map_or(0, |record| record.total.max(0) as u32);

    let mut resolved = Resolved::unchanged(defender);
    resolved.record(Event::SpellAttack {
        caster: caster.id,
        subject: defender.clone(),
        save,
        difficulty_class,
        hit,
        damage,
    });
    if hit {
        resolved = land(resolved, amount, strike.on_hit);
    }
    resolved
}

fn land(resolved: Resolved, amount: u32, on_hit: &[Effect]) -> Resolved {
    let lethal = amount > 0 && amount >= resolved.state.current_hit_points();
    let mut resolved = resolved.then(|s| take_damage(s, amount));
    for effect in on_hit {
        resolved = resolved.then(|s| apply_effect(s, *effect));
    }
    if lethal && !resolved.state.is_dying() {
        resolved = resolved.then(|s| apply_effect(s, Effect::dying()));
    }
    resolved
}

// ============================================================================
// Forced Actions
// ============================================================================

/// Constitution check of a dying character.
///
/// Success heals one hit point, clears Dying and leaves the character prone.
pub fn fight_for_life(
    state: &CharacterState,
    difficulty_class: i32,
    dice: &mut impl Dice,
) -> Resolved {
    let roll = DiceExpr::new(1, 20, state.modifier(Attribute::Constitution)).roll(dice);
    let success = roll.total >= difficulty_class;

    let mut resolved = Resolved::unchanged(state);
    resolved.record(Event::FoughtForLife {
        subject: state.clone(),
        roll,
        difficulty_class,
        success,
    });
    if success {
        resolved = resolved
            .then(|s| heal(s, 1))
            .then(|s| remove_effect(s, EffectKind::DYING))
            .then(|s| apply_effect(s, Effect::prone()));
    }
    resolved
}

pub fn stand_up(state: &CharacterState) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    resolved.record(Event::StoodUp {
        subject: CharacterState {
            effects: state.effects.remove(EffectKind::PRONE),
            ..state.clone()
        },
    });
    resolved
}

pub fn idle(state: &CharacterState) -> Resolved {
    let mut resolved = Resolved::unchanged(state);
    resolved.record(Event::Idled {
        subject: state.clone(),
    });
    resolved
}

// ============================================================================
// End of Turn
// ============================================================================

/// Rolls every damage and heal over time effect, applies the net change to
/// hit points, then counts every timed effect down by one round.
pub fn end_of_turn(state: &CharacterState, dice: &mut impl Dice) -> Resolved {
    let damage: u32 = state
        .effects
        .damage_over_time()
        .iter()
        .map(|e| rolled_amount(e.amount.roll(dice)))
        .sum();
    let healing: u32 = state
        .effects
        .heal_over_time()
        .iter()
        .map(|e| rolled_amount(e.amount.roll(dice)))
        .sum();

    let mut resolved = Resolved::unchanged(state);
    if healing > damage {
        resolved = resolved.then(|s| heal(s, healing - damage));
    } else if damage > healing {
        resolved = resolved.then(|s| take_damage(s, damage - healing));
    }

    let tick = resolved.state.effects.tick();
    let subject = CharacterState {
        effects: tick.ledger,
        ..resolved.state.clone()
    };
    resolved.record(Event::Ticked {
        subject,
        damage,
        healing,
        expired: tick.expired,
        active: tick.active,
    });
    resolved
}

fn rolled_amount(record: RollRecord) -> u32 {
    record.total.max(0) as u32
}
