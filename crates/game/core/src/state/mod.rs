//! Mutable combat state.
//!
//! [`CharacterState`] wraps an immutable [`Character`] with everything that
//! changes during an encounter. States are never modified in place by the
//! resolution operations in [`resolve`]: each returns the updated state and
//! the [`Event`] records describing the change.
mod event;
pub mod resolve;
mod roster;

pub use event::Event;
pub use resolve::Resolved;
pub use roster::{Roster, Standing};

use std::fmt;
use std::sync::Arc;

use crate::battleground::NodeId;
use crate::character::{Attribute, Character};
use crate::effect::EffectLedger;

/// Roster index of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterId(pub u32);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Side membership.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Allegiance {
    Attacker,
    Defender,
}

impl Allegiance {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Attacker => Self::Defender,
            Self::Defender => Self::Attacker,
        }
    }
}

/// Per-encounter state of one character.
///
/// `damage_taken` never exceeds the maximum hit points and
/// `resources_spent` never exceeds the maximum resources.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterState {
    pub id: CharacterId,
    pub character: Arc<Character>,
    pub allegiance: Allegiance,
    pub position: NodeId,
    pub damage_taken: u32,
    pub resources_spent: u32,
    pub effects: EffectLedger,
}

impl CharacterState {
    /// Fresh state: unhurt, full resources, no effects.
    pub fn new(
        id: CharacterId,
        character: Arc<Character>,
        allegiance: Allegiance,
        position: NodeId,
    ) -> Self {
        Self {
            id,
            character,
            allegiance,
            position,
            damage_taken: 0,
            resources_spent: 0,
            effects: EffectLedger::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.character.name
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.character.modifier(attribute)
    }

    pub fn max_hit_points(&self) -> u32 {
        self.character.max_hit_points()
    }

    pub fn current_hit_points(&self) -> u32 {
        self.max_hit_points().saturating_sub(self.damage_taken)
    }

    pub fn max_resources(&self) -> u32 {
        self.character.max_resources()
    }

    pub fn current_resources(&self) -> u32 {
        self.max_resources().saturating_sub(self.resources_spent)
    }

    /// Dying characters stay on the battleground but no longer count for
    /// their side.
    pub fn is_dying(&self) -> bool {
        self.effects.is_dying()
    }

    pub fn is_ally_of(&self, other: &Self) -> bool {
        self.allegiance == other.allegiance
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) hp {}/{} res {}/{} at {}",
            self.name(),
            self.id,
            self.current_hit_points(),
            self.max_hit_points(),
            self.current_resources(),
            self.max_resources(),
            self.position
        )
    }
}
