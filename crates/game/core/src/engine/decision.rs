//! Turn decision: enumerate, simulate, score, pick.
//!
//! For the acting character the engine walks every legal action (catalog
//! order), every node reachable within the action's movement budget
//! (ascending id) and every valid target from that node (roster order). Each
//! candidate is resolved against a [`Scratch`] overlay holding only the
//! states it changed, using a dice stream forked per candidate, and scored
//! with [`roster_utility`]. The first candidate with the strictly highest
//! utility wins.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::action::{
    ActionDef, ActionEffect, MovementMode, Target, candidate_targets, legal_actions,
};
use crate::battleground::{NodeId, Reach};
use crate::dice::Dice;
use crate::env::CombatEnv;
use crate::state::resolve::{self, Resolved, SpellStrike, WeaponStrike};
use crate::state::{CharacterId, CharacterState, Event, Roster};

use super::utility::roster_utility;

// ============================================================================
// Plan
// ============================================================================

/// One (action, destination, target) triple.
#[derive(Clone, Debug, PartialEq)]
pub struct Plan<'a> {
    pub action: Cow<'a, ActionDef>,
    pub destination: NodeId,
    pub movement_cost: u32,
    pub target: Target,
}

impl Plan<'static> {
    /// Lose the turn where the actor stands.
    pub fn idle(state: &CharacterState) -> Self {
        Self {
            action: Cow::Owned(ActionDef::no_action()),
            destination: state.position,
            movement_cost: 0,
            target: Target::Myself,
        }
    }
}

/// The winning plan, its utility and how many candidates were simulated.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision<'a> {
    pub plan: Plan<'a>,
    pub utility: f64,
    pub evaluated: usize,
}

// ============================================================================
// Scratch Overlay
// ============================================================================

/// Changed states layered over an untouched roster.
#[derive(Clone, Debug)]
pub struct Scratch<'r> {
    roster: &'r Roster,
    changed: BTreeMap<CharacterId, CharacterState>,
}

impl<'r> Scratch<'r> {
    pub fn new(roster: &'r Roster) -> Self {
        Self {
            roster,
            changed: BTreeMap::new(),
        }
    }

    pub fn get(&self, id: CharacterId) -> Option<&CharacterState> {
        self.changed.get(&id).or_else(|| self.roster.get(id))
    }

    fn absorb(&mut self, resolved: Resolved, events: &mut Vec<Event>) {
        self.changed.insert(resolved.state.id, resolved.state);
        events.extend(resolved.events);
    }

    /// Every state in roster order, overlay first.
    pub fn states(&self) -> impl Iterator<Item = &CharacterState> {
        self.roster
            .iter()
            .map(|state| self.changed.get(&state.id).unwrap_or(state))
    }

    /// Number of characters the overlay has touched.
    pub fn touched(&self) -> usize {
        self.changed.len()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves `plan` for `actor` on `scratch` and returns the events in order.
///
/// The same routine runs hypothetical candidates and the real turn, so a
/// simulation with the same dice reproduces the real outcome exactly.
pub fn perform<D: Dice>(
    env: &CombatEnv<'_>,
    scratch: &mut Scratch<'_>,
    actor: CharacterId,
    plan: &Plan<'_>,
    dice: &mut D,
) -> Vec<Event> {
    let mut events = Vec::new();
    let Some(state) = scratch.get(actor).cloned() else {
        return events;
    };

    if plan.destination != state.position {
        let moved = CharacterState {
            position: plan.destination,
            ..state.clone()
        };
        scratch.absorb(
            Resolved {
                state: moved.clone(),
                events: vec![Event::Moved {
                    subject: moved,
                    from: state.position,
                    to: plan.destination,
                    cost: plan.movement_cost,
                }],
            },
            &mut events,
        );
    }

    if plan.action.cost > 0 {
        if let Some(current) = scratch.get(actor) {
            let spent = resolve::spend_resources(current, plan.action.cost);
            scratch.absorb(spent, &mut events);
        }
    }

    let config = env.config();
    let members = plan.target.members(actor);
    match &plan.action.effect {
        ActionEffect::Idle => on_self(scratch, actor, &mut events, resolve::idle),
        ActionEffect::StandUp => on_self(scratch, actor, &mut events, resolve::stand_up),
        ActionEffect::FightForLife => on_self(scratch, actor, &mut events, |s| {
            resolve::fight_for_life(s, config.fight_for_life_dc, dice)
        }),
        ActionEffect::WeaponAttack {
            hand,
            attack_bonus,
            damage_multiplier,
            damage_bonus,
            on_hit,
        } => {
            let strike = WeaponStrike {
                hand: *hand,
                attack_bonus: *attack_bonus,
                damage_multiplier: *damage_multiplier,
                damage_bonus: *damage_bonus,
                on_hit,
            };
            for id in members {
                let (Some(attacker), Some(defender)) = (scratch.get(actor), scratch.get(id)) else {
                    continue;
                };
                let resolved = resolve::resolve_weapon_attack(attacker, defender, &strike, dice);
                scratch.absorb(resolved, &mut events);
            }
        }
        ActionEffect::SpellAttack {
            damage,
            save,
            dc_bonus,
            on_hit,
        } => {
            let strike = SpellStrike {
                damage: *damage,
                save: *save,
                dc_bonus: *dc_bonus,
                on_hit,
            };
            for id in members {
                let (Some(caster), Some(defender)) = (scratch.get(actor), scratch.get(id)) else {
                    continue;
                };
                let resolved = resolve::resolve_spell_attack(caster, defender, &strike, dice);
                scratch.absorb(resolved, &mut events);
            }
        }
        ActionEffect::Heal { amount } => {
            for id in members {
                let healed = amount.roll(dice).total.max(0) as u32;
                on_member(scratch, id, &mut events, |s| resolve::heal(s, healed));
            }
        }
        ActionEffect::Restore { amount } => {
            for id in members {
                let restored = amount.roll(dice).total.max(0) as u32;
                on_member(scratch, id, &mut events, |s| {
                    resolve::restore_resources(s, restored)
                });
            }
        }
        ActionEffect::Bestow { effects } => {
            for id in members {
                for effect in effects {
                    on_member(scratch, id, &mut events, |s| resolve::apply_effect(s, *effect));
                }
            }
        }
    }

    events
}

fn on_member(
    scratch: &mut Scratch<'_>,
    id: CharacterId,
    events: &mut Vec<Event>,
    op: impl FnOnce(&CharacterState) -> Resolved,
) {
    if let Some(current) = scratch.get(id) {
        let resolved = op(current);
        scratch.absorb(resolved, events);
    }
}

fn on_self(
    scratch: &mut Scratch<'_>,
    actor: CharacterId,
    events: &mut Vec<Event>,
    op: impl FnOnce(&CharacterState) -> Resolved,
) {
    on_member(scratch, actor, events, op);
}

// ============================================================================
// Search
// ============================================================================

/// Chooses the best plan for `actor`.
///
/// Returns `None` when no candidate exists at all: no legal action, no
/// reachable node or no valid target anywhere. `dice` is only forked, never
/// advanced.
pub fn decide<'a, D: Dice>(
    env: &CombatEnv<'a>,
    roster: &Roster,
    actor: CharacterId,
    dice: &D,
) -> Option<Decision<'a>> {
    let state = roster.get(actor)?;
    let ground = env.battleground();
    let occupancy = roster.occupancy(state.allegiance);

    let mut normal: Option<Reach> = None;
    let mut special: Option<Reach> = None;
    let mut best: Option<(Plan<'a>, f64)> = None;
    let mut evaluated = 0usize;

    for action in legal_actions(state, env.actions().actions()) {
        let budget = state.effects.movement_budget(action.movement.budget);
        let reach = match action.movement.mode {
            MovementMode::Normal => {
                normal.get_or_insert_with(|| ground.normal_reach(state.position, &occupancy))
            }
            MovementMode::Special => {
                special.get_or_insert_with(|| ground.special_reach(state.position, &occupancy))
            }
        };
        let range = action.reach(&state.character);

        for (destination, movement_cost) in reach.within(budget) {
            for target in
                candidate_targets(action.target, range, state, destination, roster, ground)
            {
                let plan = Plan {
                    action: action.clone(),
                    destination,
                    movement_cost,
                    target,
                };

                let mut scratch = Scratch::new(roster);
                let mut fork = dice.fork(evaluated as u32);
                perform(env, &mut scratch, actor, &plan, &mut fork);
                let utility = roster_utility(scratch.states(), state.allegiance, env.config());
                evaluated += 1;

                tracing::trace!(
                    "candidate {} for {}: {} -> {} {:?} scores {:.6}",
                    evaluated,
                    actor,
                    plan.action.name,
                    destination,
                    plan.target,
                    utility
                );

                if best.as_ref().is_none_or(|(_, score)| utility > *score) {
                    best = Some((plan, utility));
                }
            }
        }
    }

    let (plan, utility) = best?;
    tracing::debug!(
        "{} chose {} at {} targeting {:?} (utility {:.6}, {} candidates)",
        actor,
        plan.action.name,
        plan.destination,
        plan.target,
        utility,
        evaluated
    );
    Some(Decision {
        plan,
        utility,
        evaluated,
    })
}
