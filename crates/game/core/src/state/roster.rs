//! Every character of an encounter, in declaration order.

use std::sync::Arc;

use crate::battleground::{NodeId, Occupancy};
use crate::character::Character;

use super::{Allegiance, CharacterId, CharacterState, Event};

/// Non-dying members per side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Standing {
    pub attackers: u32,
    pub defenders: u32,
}

impl Standing {
    pub const fn of(&self, side: Allegiance) -> u32 {
        match side {
            Allegiance::Attacker => self.attackers,
            Allegiance::Defender => self.defenders,
        }
    }

    /// At least one side has no member left standing.
    pub const fn is_decided(&self) -> bool {
        self.attackers == 0 || self.defenders == 0
    }

    /// The only side still standing, if exactly one is.
    pub const fn winner(&self) -> Option<Allegiance> {
        match (self.attackers, self.defenders) {
            (0, 0) => None,
            (_, 0) => Some(Allegiance::Attacker),
            (0, _) => Some(Allegiance::Defender),
            _ => None,
        }
    }
}

/// Character states indexed by [`CharacterId`].
///
/// Characters are never removed; a dying character keeps its slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    states: Vec<CharacterState>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fresh character and returns its id.
    pub fn push(
        &mut self,
        character: Arc<Character>,
        allegiance: Allegiance,
        position: NodeId,
    ) -> CharacterId {
        let id = CharacterId(self.states.len() as u32);
        self.states
            .push(CharacterState::new(id, character, allegiance, position));
        id
    }

    pub fn get(&self, id: CharacterId) -> Option<&CharacterState> {
        self.states.get(id.0 as usize)
    }

    /// Substitutes the stored state with the same id. Unknown ids are ignored.
    pub fn replace(&mut self, state: CharacterState) {
        if let Some(slot) = self.states.get_mut(state.id.0 as usize) {
            *slot = state;
        }
    }

    /// Adopts the updated state an event carries.
    pub fn apply(&mut self, event: &Event) {
        self.replace(event.subject().clone());
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterState> {
        self.states.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.states.iter().map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn side(&self, allegiance: Allegiance) -> impl Iterator<Item = &CharacterState> {
        self.states
            .iter()
            .filter(move |s| s.allegiance == allegiance)
    }

    /// Party counts per node as seen by `perspective`'s side.
    pub fn occupancy(&self, perspective: Allegiance) -> Occupancy {
        let mut occupancy = Occupancy::new();
        for state in &self.states {
            if state.allegiance == perspective {
                occupancy.add_ally(state.position);
            } else {
                occupancy.add_enemy(state.position);
            }
        }
        occupancy
    }

    pub fn standing(&self) -> Standing {
        let mut standing = Standing::default();
        for state in self.states.iter().filter(|s| !s.is_dying()) {
            match state.allegiance {
                Allegiance::Attacker => standing.attackers += 1,
                Allegiance::Defender => standing.defenders += 1,
            }
        }
        standing
    }
}
