//! Status effects.
//!
//! Effects come in six families. Two of them (action forcing, movement
//! restricting) are *severity-exclusive*: a character holds at most one
//! effect of the family. The other four are *category lists*: several kinds
//! coexist, one instance per kind. [`EffectLedger`] enforces both policies.
//!
//! # Round-based Duration
//!
//! Every instance carries `rounds_left` (`None` for permanent effects). The
//! ledger's tick decrements timed effects and drops them when the counter
//! runs out.
mod ledger;

pub use ledger::{EffectLedger, LedgerTick, resolve_exclusive, resolve_listed};

use std::fmt;

use crate::dice::DiceExpr;

/// Ordering used by severity-exclusive families.
pub trait Severity {
    fn severity(&self) -> u8;
}

/// An effect instance that knows its kind and its remaining duration.
pub trait Timed: Sized {
    type Kind: Copy + PartialEq;

    fn kind(&self) -> Self::Kind;

    fn rounds_left(&self) -> Option<u32>;

    fn with_rounds_left(self, rounds: u32) -> Self;

    /// Advance one round. `None` once the effect has run out.
    fn ticked(self) -> Option<Self> {
        match self.rounds_left() {
            None => Some(self),
            Some(rounds) if rounds > 1 => Some(self.with_rounds_left(rounds - 1)),
            Some(_) => None,
        }
    }
}

// ============================================================================
// Kinds
// ============================================================================

/// Effects that dictate the only action a character may take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionForcingKind {
    /// Must stand up.
    Prone,
    /// Loses the turn.
    Stunned,
    /// Must fight for life.
    Dying,
}

impl Severity for ActionForcingKind {
    fn severity(&self) -> u8 {
        match self {
            Self::Prone => 1,
            Self::Stunned => 2,
            Self::Dying => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementRestrictingKind {
    /// Halves movement; torn free by any damage.
    Entangled,
    /// No movement at all.
    Held,
}

impl Severity for MovementRestrictingKind {
    fn severity(&self) -> u8 {
        match self {
            Self::Entangled => 1,
            Self::Held => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MovementAlteringKind {
    /// Halves movement.
    Slowed,
    /// Doubles movement.
    Hasted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionRestrictingKind {
    /// No weapon actions.
    Disarmed,
    /// No spell actions.
    Silenced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageOverTimeKind {
    Bleeding,
    Poisoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HealOverTimeKind {
    Regenerating,
}

// ============================================================================
// Instances
// ============================================================================

/// A timed condition with no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition<K> {
    pub kind: K,
    pub rounds_left: Option<u32>,
}

impl<K> Condition<K> {
    pub const fn new(kind: K, rounds_left: Option<u32>) -> Self {
        Self { kind, rounds_left }
    }
}

impl<K: Copy + PartialEq> Timed for Condition<K> {
    type Kind = K;

    fn kind(&self) -> K {
        self.kind
    }

    fn rounds_left(&self) -> Option<u32> {
        self.rounds_left
    }

    fn with_rounds_left(mut self, rounds: u32) -> Self {
        self.rounds_left = Some(rounds);
        self
    }
}

/// An effect rolled every round (damage or healing over time).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodic<K> {
    pub kind: K,
    pub rounds_left: Option<u32>,
    pub amount: DiceExpr,
}

impl<K> Periodic<K> {
    pub const fn new(kind: K, rounds_left: Option<u32>, amount: DiceExpr) -> Self {
        Self {
            kind,
            rounds_left,
            amount,
        }
    }
}

impl<K: Copy + PartialEq> Timed for Periodic<K> {
    type Kind = K;

    fn kind(&self) -> K {
        self.kind
    }

    fn rounds_left(&self) -> Option<u32> {
        self.rounds_left
    }

    fn with_rounds_left(mut self, rounds: u32) -> Self {
        self.rounds_left = Some(rounds);
        self
    }
}

/// Effect family; decides the conflict policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectFamily {
    ActionForcing,
    MovementRestricting,
    MovementAltering,
    ActionRestricting,
    DamageOverTime,
    HealOverTime,
}

impl EffectFamily {
    pub const fn is_exclusive(self) -> bool {
        matches!(self, Self::ActionForcing | Self::MovementRestricting)
    }
}

/// Identity of an effect, ignoring duration and payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    ActionForcing(ActionForcingKind),
    MovementRestricting(MovementRestrictingKind),
    MovementAltering(MovementAlteringKind),
    ActionRestricting(ActionRestrictingKind),
    DamageOverTime(DamageOverTimeKind),
    HealOverTime(HealOverTimeKind),
}

impl EffectKind {
    pub const PRONE: Self = Self::ActionForcing(ActionForcingKind::Prone);
    pub const STUNNED: Self = Self::ActionForcing(ActionForcingKind::Stunned);
    pub const DYING: Self = Self::ActionForcing(ActionForcingKind::Dying);

    pub const fn family(self) -> EffectFamily {
        match self {
            Self::ActionForcing(_) => EffectFamily::ActionForcing,
            Self::MovementRestricting(_) => EffectFamily::MovementRestricting,
            Self::MovementAltering(_) => EffectFamily::MovementAltering,
            Self::ActionRestricting(_) => EffectFamily::ActionRestricting,
            Self::DamageOverTime(_) => EffectFamily::DamageOverTime,
            Self::HealOverTime(_) => EffectFamily::HealOverTime,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActionForcing(kind) => fmt::Display::fmt(kind, f),
            Self::MovementRestricting(kind) => fmt::Display::fmt(kind, f),
            Self::MovementAltering(kind) => fmt::Display::fmt(kind, f),
            Self::ActionRestricting(kind) => fmt::Display::fmt(kind, f),
            Self::DamageOverTime(kind) => fmt::Display::fmt(kind, f),
            Self::HealOverTime(kind) => fmt::Display::fmt(kind, f),
        }
    }
}

/// A status effect instance, tagged by family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    ActionForcing(Condition<ActionForcingKind>),
    MovementRestricting(Condition<MovementRestrictingKind>),
    MovementAltering(Condition<MovementAlteringKind>),
    ActionRestricting(Condition<ActionRestrictingKind>),
    DamageOverTime(Periodic<DamageOverTimeKind>),
    HealOverTime(Periodic<HealOverTimeKind>),
}

impl Effect {
    pub const fn prone() -> Self {
        Self::ActionForcing(Condition::new(ActionForcingKind::Prone, None))
    }

    pub const fn stunned(rounds: u32) -> Self {
        Self::ActionForcing(Condition::new(ActionForcingKind::Stunned, Some(rounds)))
    }

    pub const fn dying() -> Self {
        Self::ActionForcing(Condition::new(ActionForcingKind::Dying, None))
    }

    pub const fn entangled(rounds: u32) -> Self {
        Self::MovementRestricting(Condition::new(
            MovementRestrictingKind::Entangled,
            Some(rounds),
        ))
    }

    pub const fn held(rounds: u32) -> Self {
        Self::MovementRestricting(Condition::new(MovementRestrictingKind::Held, Some(rounds)))
    }

    pub const fn slowed(rounds: u32) -> Self {
        Self::MovementAltering(Condition::new(MovementAlteringKind::Slowed, Some(rounds)))
    }

    pub const fn hasted(rounds: u32) -> Self {
        Self::MovementAltering(Condition::new(MovementAlteringKind::Hasted, Some(rounds)))
    }

    pub const fn disarmed(rounds: u32) -> Self {
        Self::ActionRestricting(Condition::new(ActionRestrictingKind::Disarmed, Some(rounds)))
    }

    pub const fn silenced(rounds: u32) -> Self {
        Self::ActionRestricting(Condition::new(ActionRestrictingKind::Silenced, Some(rounds)))
    }

    pub const fn bleeding(rounds: u32, amount: DiceExpr) -> Self {
        Self::DamageOverTime(Periodic::new(
            DamageOverTimeKind::Bleeding,
            Some(rounds),
            amount,
        ))
    }

    pub const fn poisoned(rounds: u32, amount: DiceExpr) -> Self {
        Self::DamageOverTime(Periodic::new(
            DamageOverTimeKind::Poisoned,
            Some(rounds),
            amount,
        ))
    }

    pub const fn regenerating(rounds: u32, amount: DiceExpr) -> Self {
        Self::HealOverTime(Periodic::new(
            HealOverTimeKind::Regenerating,
            Some(rounds),
            amount,
        ))
    }

    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::ActionForcing(e) => EffectKind::ActionForcing(e.kind),
            Self::MovementRestricting(e) => EffectKind::MovementRestricting(e.kind),
            Self::MovementAltering(e) => EffectKind::MovementAltering(e.kind),
            Self::ActionRestricting(e) => EffectKind::ActionRestricting(e.kind),
            Self::DamageOverTime(e) => EffectKind::DamageOverTime(e.kind),
            Self::HealOverTime(e) => EffectKind::HealOverTime(e.kind),
        }
    }

    pub const fn family(&self) -> EffectFamily {
        self.kind().family()
    }

    pub const fn rounds_left(&self) -> Option<u32> {
        match self {
            Self::ActionForcing(e) => e.rounds_left,
            Self::MovementRestricting(e) => e.rounds_left,
            Self::MovementAltering(e) => e.rounds_left,
            Self::ActionRestricting(e) => e.rounds_left,
            Self::DamageOverTime(e) => e.rounds_left,
            Self::HealOverTime(e) => e.rounds_left,
        }
    }

    pub const fn is_permanent(&self) -> bool {
        self.rounds_left().is_none()
    }

    /// Effects stripped whenever the bearer takes damage.
    pub const fn removed_on_damage_taken(&self) -> bool {
        matches!(
            self.kind(),
            EffectKind::MovementRestricting(MovementRestrictingKind::Entangled)
        )
    }
}

impl From<Condition<ActionForcingKind>> for Effect {
    fn from(value: Condition<ActionForcingKind>) -> Self {
        Self::ActionForcing(value)
    }
}

impl From<Condition<MovementRestrictingKind>> for Effect {
    fn from(value: Condition<MovementRestrictingKind>) -> Self {
        Self::MovementRestricting(value)
    }
}

impl From<Condition<MovementAlteringKind>> for Effect {
    fn from(value: Condition<MovementAlteringKind>) -> Self {
        Self::MovementAltering(value)
    }
}

impl From<Condition<ActionRestrictingKind>> for Effect {
    fn from(value: Condition<ActionRestrictingKind>) -> Self {
        Self::ActionRestricting(value)
    }
}

impl From<Periodic<DamageOverTimeKind>> for Effect {
    fn from(value: Periodic<DamageOverTimeKind>) -> Self {
        Self::DamageOverTime(value)
    }
}

impl From<Periodic<HealOverTimeKind>> for Effect {
    fn from(value: Periodic<HealOverTimeKind>) -> Self {
        Self::HealOverTime(value)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rounds_left() {
            Some(rounds) => write!(f, "{} ({rounds} rounds)", self.kind()),
            None => write!(f, "{}", self.kind()),
        }
    }
}
