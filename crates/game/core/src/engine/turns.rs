use crate::dice::{Dice, DiceExpr};
use crate::rules;
use crate::state::{CharacterId, resolve};

use super::decision::{Plan, Scratch, decide, perform};
use super::utility::roster_utility;
use super::{Encounter, InitiativeRoll, Round, Turn};

/// Round and turn sequencing for Encounter.
impl Encounter<'_> {
    /// Rolls `d20 + dex_mod + level_mod` for everyone, highest first.
    ///
    /// Ties keep roster order (attackers before defenders, then declaration
    /// order).
    pub fn roll_initiative<D: Dice>(&self, dice: &mut D) -> Vec<InitiativeRoll> {
        let mut order: Vec<InitiativeRoll> = self
            .roster
            .iter()
            .map(|state| InitiativeRoll {
                character: state.id,
                roll: DiceExpr::new(1, 20, rules::initiative_bonus(&state.character)).roll(dice),
            })
            .collect();
        order.sort_by(|a, b| b.total().cmp(&a.total()));
        order
    }

    /// Plays one round.
    ///
    /// Stops early when the encounter is decided or a turn degenerates.
    pub fn play_round<D: Dice>(&mut self, number: u32, dice: &mut D) -> Round {
        let initiative = self.roll_initiative(dice);
        tracing::debug!(
            "round {}: order {:?}",
            number,
            initiative.iter().map(|r| r.character).collect::<Vec<_>>()
        );

        let mut turns = Vec::new();
        for roll in &initiative {
            if self.roster.standing().is_decided() {
                break;
            }
            let Some(turn) = self.take_turn(roll.character, dice) else {
                continue;
            };
            let degenerate = turn.is_degenerate();
            turns.push(turn);
            if degenerate {
                tracing::debug!("round {} ends on a turn with no candidates", number);
                break;
            }
        }

        Round {
            number,
            initiative,
            turns,
        }
    }

    /// Decides, resolves and ticks one character's turn.
    ///
    /// Without any candidate the actor idles where it stands. `None` for an
    /// id outside the roster.
    pub fn take_turn<D: Dice>(&mut self, actor: CharacterId, dice: &mut D) -> Option<Turn> {
        let env = self.env;
        let state = self.roster.get(actor)?.clone();

        let (plan, utility, evaluated) = match decide(&env, &self.roster, actor, &*dice) {
            Some(decision) => (decision.plan, decision.utility, decision.evaluated),
            None => {
                let baseline =
                    roster_utility(self.roster.iter(), state.allegiance, env.config());
                (Plan::idle(&state), baseline, 0)
            }
        };

        let mut events = {
            let mut scratch = Scratch::new(&self.roster);
            perform(&env, &mut scratch, actor, &plan, dice)
        };
        for event in &events {
            self.roster.apply(event);
        }

        if let Some(resolved) = self
            .roster
            .get(actor)
            .map(|current| resolve::end_of_turn(current, dice))
        {
            for event in &resolved.events {
                self.roster.apply(event);
            }
            events.extend(resolved.events);
        }

        tracing::debug!(
            "{} ({}) used {} from {} to {}, {} events",
            state.name(),
            actor,
            plan.action.name,
            state.position,
            plan.destination,
            events.len()
        );

        Some(Turn {
            actor,
            action: plan.action.name.clone(),
            from: state.position,
            destination: plan.destination,
            movement_cost: plan.movement_cost,
            target: plan.target,
            utility,
            evaluated,
            events,
        })
    }
}
