//! Action definitions consumed from the content catalog.
//!
//! The core never hard-codes a named ability. It only understands the shape
//! of an [`ActionDef`]: who may use it, what it costs, how far the user may
//! move first, whom it may target and which [`ActionEffect`] it resolves to.
//!
//! # Module Structure
//!
//! - `targeting`: target contracts and target enumeration from a node
//! - `available`: the legal action set for a character this turn
mod available;
mod targeting;

pub use available::{forced_action, legal_actions};
pub use targeting::{Target, TargetType, candidate_targets};

use crate::character::{ArmsRequirement, Attribute, Character, ClassSet, Hand};
use crate::dice::DiceExpr;
use crate::effect::Effect;

/// Broad action category; status effects restrict by category.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionCategory {
    /// Uses the equipped weapon; blocked while disarmed.
    Weapon,
    /// Blocked while silenced.
    Spell,
    /// Everything else (stances, maneuvers, forced actions).
    #[default]
    Support,
}

/// How the user moves before resolving the action.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementMode {
    /// Walk the path graph.
    #[default]
    Normal,
    /// Jump along a single line of sight.
    Special,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movement {
    pub mode: MovementMode,
    /// Base budget before movement effects.
    pub budget: u32,
}

impl Movement {
    pub const fn stay() -> Self {
        Self {
            mode: MovementMode::Normal,
            budget: 0,
        }
    }

    pub const fn normal(budget: u32) -> Self {
        Self {
            mode: MovementMode::Normal,
            budget,
        }
    }

    pub const fn special(budget: u32) -> Self {
        Self {
            mode: MovementMode::Special,
            budget,
        }
    }
}

/// What an action does to its targets once the user has moved.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionEffect {
    /// Nothing happens.
    Idle,
    /// Clears Prone.
    StandUp,
    /// Constitution check against the configured difficulty class.
    FightForLife,
    /// Attack roll with the wielded weapons against armor class.
    WeaponAttack {
        #[cfg_attr(feature = "serde", serde(default))]
        hand: Hand,
        #[cfg_attr(feature = "serde", serde(default))]
        attack_bonus: i32,
        #[cfg_attr(feature = "serde", serde(default = "one"))]
        damage_multiplier: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        damage_bonus: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        on_hit: Vec<Effect>,
    },
    /// Target saves with `save` against the caster's difficulty class.
    SpellAttack {
        damage: DiceExpr,
        save: Attribute,
        #[cfg_attr(feature = "serde", serde(default))]
        dc_bonus: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        on_hit: Vec<Effect>,
    },
    Heal {
        amount: DiceExpr,
    },
    /// Gives resources back.
    Restore {
        amount: DiceExpr,
    },
    /// Applies effects without a roll.
    Bestow {
        effects: Vec<Effect>,
    },
}

#[cfg(feature = "serde")]
const fn one() -> u32 {
    1
}

impl ActionEffect {
    pub fn weapon_attack() -> Self {
        Self::WeaponAttack {
            hand: Hand::Main,
            attack_bonus: 0,
            damage_multiplier: 1,
            damage_bonus: 0,
            on_hit: Vec::new(),
        }
    }

    /// Whether the effect is hostile, i.e. rolls against a defender.
    pub const fn is_attack(&self) -> bool {
        matches!(self, Self::WeaponAttack { .. } | Self::SpellAttack { .. })
    }
}

/// A catalog action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: ActionCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub movement: Movement,
    /// Resources spent on use.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub classes: ClassSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arms: ArmsRequirement,
    pub target: TargetType,
    /// Targeting range; weapon actions use the weapon's range instead.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: u32,
    pub effect: ActionEffect,
}

impl ActionDef {
    /// A support action usable by everyone, free, with no movement.
    pub fn new(name: impl Into<String>, target: TargetType, effect: ActionEffect) -> Self {
        Self {
            name: name.into(),
            category: ActionCategory::Support,
            movement: Movement::stay(),
            cost: 0,
            classes: ClassSet::all(),
            arms: ArmsRequirement::Any,
            target,
            range: 0,
            effect,
        }
    }

    pub fn category(mut self, category: ActionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn movement(mut self, movement: Movement) -> Self {
        self.movement = movement;
        self
    }

    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn classes(mut self, classes: ClassSet) -> Self {
        self.classes = classes;
        self
    }

    pub fn arms(mut self, arms: ArmsRequirement) -> Self {
        self.arms = arms;
        self
    }

    pub fn range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    /// Targeting range for `character`: the shortest range among the
    /// swung weapons for weapon attacks, the action's own otherwise.
    pub fn reach(&self, character: &Character) -> u32 {
        match self.effect {
            ActionEffect::WeaponAttack { hand, .. } => character.inventory.arms.range(hand),
            _ => self.range,
        }
    }

    /// Forced: the turn is lost.
    pub fn no_action() -> Self {
        Self::new("No Action", TargetType::SelfOnly, ActionEffect::Idle)
    }

    /// Forced while prone.
    pub fn stand_up() -> Self {
        Self::new("Stand Up", TargetType::SelfOnly, ActionEffect::StandUp)
    }

    /// Forced while dying.
    pub fn fight_for_life() -> Self {
        Self::new("Fight For Life", TargetType::SelfOnly, ActionEffect::FightForLife)
    }
}
