//! Resolution records.
//!
//! Every event carries the subject's state *after* the change, so replaying
//! the events of a turn in order reproduces the roster exactly.

use crate::battleground::NodeId;
use crate::dice::RollRecord;
use crate::effect::Effect;

use super::{CharacterId, CharacterState};

/// One resolution step.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Event {
    Moved {
        subject: CharacterState,
        from: NodeId,
        to: NodeId,
        cost: u32,
    },
    ResourcesSpent {
        subject: CharacterState,
        amount: u32,
    },
    ResourcesRestored {
        subject: CharacterState,
        amount: u32,
    },
    Healed {
        subject: CharacterState,
        amount: u32,
    },
    Damaged {
        subject: CharacterState,
        amount: u32,
    },
    EffectAdded {
        subject: CharacterState,
        effect: Effect,
    },
    EffectRemoved {
        subject: CharacterState,
        effect: Effect,
    },
    /// Attack roll against armor class. `damage` is rolled only on a hit.
    WeaponAttack {
        attacker: CharacterId,
        subject: CharacterState,
        weapon: String,
        roll: RollRecord,
        armor_class: i32,
        hit: bool,
        damage: Option<RollRecord>,
    },
    /// Defender's save against the caster's difficulty class.
    SpellAttack {
        caster: CharacterId,
        subject: CharacterState,
        save: RollRecord,
        difficulty_class: i32,
        hit: bool,
        damage: Option<RollRecord>,
    },
    FoughtForLife {
        subject: CharacterState,
        roll: RollRecord,
        difficulty_class: i32,
        success: bool,
    },
    StoodUp {
        subject: CharacterState,
    },
    Idled {
        subject: CharacterState,
    },
    /// End-of-turn over-time effects and duration countdown.
    Ticked {
        subject: CharacterState,
        damage: u32,
        healing: u32,
        expired: Vec<Effect>,
        active: Vec<Effect>,
    },
}

impl Event {
    /// The updated state of the character this event changed.
    pub fn subject(&self) -> &CharacterState {
        match self {
            Self::Moved { subject, .. }
            | Self::ResourcesSpent { subject, .. }
            | Self::ResourcesRestored { subject, .. }
            | Self::Healed { subject, .. }
            | Self::Damaged { subject, .. }
            | Self::EffectAdded { subject, .. }
            | Self::EffectRemoved { subject, .. }
            | Self::WeaponAttack { subject, .. }
            | Self::SpellAttack { subject, .. }
            | Self::FoughtForLife { subject, .. }
            | Self::StoodUp { subject }
            | Self::Idled { subject }
            | Self::Ticked { subject, .. } => subject,
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }
}
