//! Encounter orchestration.
//!
//! An [`Encounter`] owns the roster and folds rounds over it. Each round
//! rolls initiative and folds turns in that order; each turn asks the
//! [`decision`] engine for a plan, resolves it for real and ticks the
//! actor's effects. The win condition is checked before every turn, so an
//! encounter stops the moment one side has no member left standing.
pub mod decision;
mod errors;
mod turns;
pub mod utility;

pub use decision::{Decision, Plan, Scratch, decide, perform};
pub use errors::EncounterError;
pub use utility::{character_utility, roster_utility};

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::action::Target;
use crate::battleground::NodeId;
use crate::character::Character;
use crate::config::CombatConfig;
use crate::dice::{Dice, RollRecord};
use crate::env::CombatEnv;
use crate::state::{Allegiance, CharacterId, Event, Roster};

// ============================================================================
// Records
// ============================================================================

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// Exactly one side still has a member standing.
    Victory(Allegiance),
    /// Both sides went down together.
    Draw,
    /// The round cap was reached.
    Timeout,
    /// A round ended without a single effective turn.
    Stalemate,
}

impl Outcome {
    pub const fn winner(&self) -> Option<Allegiance> {
        match self {
            Self::Victory(side) => Some(*side),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitiativeRoll {
    pub character: CharacterId,
    pub roll: RollRecord,
}

impl InitiativeRoll {
    pub fn total(&self) -> i32 {
        self.roll.total
    }
}

/// One character's turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn {
    pub actor: CharacterId,
    pub action: String,
    pub from: NodeId,
    pub destination: NodeId,
    pub movement_cost: u32,
    pub target: Target,
    /// Utility of the chosen candidate as simulated.
    pub utility: f64,
    /// Candidates simulated; zero marks a degenerate no-op turn.
    pub evaluated: usize,
    pub events: Vec<Event>,
}

impl Turn {
    pub fn is_degenerate(&self) -> bool {
        self.evaluated == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round {
    pub number: u32,
    /// Turn order, highest first.
    pub initiative: Vec<InitiativeRoll>,
    pub turns: Vec<Turn>,
}

impl Round {
    /// At least one turn simulated a candidate.
    pub fn is_effective(&self) -> bool {
        self.turns.iter().any(|t| !t.is_degenerate())
    }
}

/// Full replay of an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncounterReport {
    pub rounds: Vec<Round>,
    pub outcome: Outcome,
    /// Final states.
    pub roster: Roster,
}

impl EncounterReport {
    pub fn turn_count(&self) -> usize {
        self.rounds.iter().map(|r| r.turns.len()).sum()
    }

    /// SHA-256 of the bincode encoding; equal reports share a fingerprint.
    ///
    /// # Errors
    ///
    /// Propagates bincode serialization failures.
    #[cfg(feature = "serde")]
    pub fn fingerprint(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

// ============================================================================
// Encounter
// ============================================================================

/// One side's characters and the node they start on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Side {
    pub start: NodeId,
    pub members: Vec<Character>,
}

impl Side {
    pub fn new(start: NodeId, members: impl IntoIterator<Item = Character>) -> Self {
        Self {
            start,
            members: members.into_iter().collect(),
        }
    }
}

/// A running encounter.
#[derive(Debug)]
pub struct Encounter<'a> {
    env: CombatEnv<'a>,
    roster: Roster,
}

impl<'a> Encounter<'a> {
    /// Places both sides on their starting nodes, attackers first.
    ///
    /// # Errors
    ///
    /// Fails when a side is empty, starts on an unknown node, the roster is
    /// too large or a starting node cannot hold everyone placed on it.
    pub fn new(
        env: CombatEnv<'a>,
        attackers: Side,
        defenders: Side,
    ) -> Result<Self, EncounterError> {
        let ground = env.battleground();
        let count = attackers.members.len() + defenders.members.len();
        if count > CombatConfig::MAX_ROSTER {
            return Err(EncounterError::RosterTooLarge {
                count,
                limit: CombatConfig::MAX_ROSTER,
            });
        }

        let mut roster = Roster::new();
        let mut placed: BTreeMap<NodeId, u32> = BTreeMap::new();
        for (allegiance, side) in [
            (Allegiance::Attacker, attackers),
            (Allegiance::Defender, defenders),
        ] {
            if side.members.is_empty() {
                return Err(EncounterError::EmptySide(allegiance));
            }
            if !ground.contains(side.start) {
                return Err(EncounterError::UnknownStartNode {
                    side: allegiance,
                    node: side.start,
                });
            }
            *placed.entry(side.start).or_default() += side.members.len() as u32;
            for member in side.members {
                roster.push(Arc::new(member), allegiance, side.start);
            }
        }

        for (&node, &count) in &placed {
            let capacity = ground.capacity(node);
            if count > capacity {
                return Err(EncounterError::Overcrowded {
                    node,
                    count,
                    capacity,
                });
            }
        }

        Ok(Self { env, roster })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Direct roster access for scripted openings (pre-applied effects).
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Folds rounds until a side wins, a round stalls or the cap is hit.
    pub fn run<D: Dice>(mut self, dice: &mut D) -> EncounterReport {
        let cap = self.env.config().round_cap;
        let mut rounds = Vec::new();
        let mut stalled = false;

        for number in 1..=cap {
            let round = self.play_round(number, dice);
            let effective = round.is_effective();
            rounds.push(round);

            if self.roster.standing().is_decided() {
                break;
            }
            if !effective {
                stalled = true;
                break;
            }
        }

        let standing = self.roster.standing();
        let outcome = if standing.is_decided() {
            standing.winner().map_or(Outcome::Draw, Outcome::Victory)
        } else if stalled {
            Outcome::Stalemate
        } else {
            Outcome::Timeout
        };
        tracing::debug!(
            "encounter ended after {} rounds: {}",
            rounds.len(),
            outcome
        );

        EncounterReport {
            rounds,
            outcome,
            roster: self.roster,
        }
    }
}
