//! Per-character effect ledger.

use arrayvec::ArrayVec;

use crate::action::ActionCategory;
use crate::config::CombatConfig;

use super::{
    ActionForcingKind, ActionRestrictingKind, Condition, DamageOverTimeKind, Effect, EffectKind,
    HealOverTimeKind, MovementAlteringKind, MovementRestrictingKind, Periodic, Severity, Timed,
};

type Listed<T> = ArrayVec<T, { CombatConfig::MAX_EFFECTS_PER_FAMILY }>;

/// Severity-exclusive policy.
///
/// The same kind always replaces (refreshing duration). Different kinds keep
/// whichever is more severe; the incoming effect wins a tie.
pub fn resolve_exclusive<K>(
    existing: Option<Condition<K>>,
    incoming: Condition<K>,
) -> Option<Condition<K>>
where
    K: Severity + Copy + PartialEq,
{
    match existing {
        Some(current)
            if current.kind != incoming.kind
                && current.kind.severity() > incoming.kind.severity() =>
        {
            Some(current)
        }
        _ => Some(incoming),
    }
}

/// Category-list policy: one instance per kind, duplicates replaced in place.
pub fn resolve_listed<T, const N: usize>(existing: &ArrayVec<T, N>, incoming: T) -> ArrayVec<T, N>
where
    T: Timed + Clone,
{
    let mut next = existing.clone();
    match next.iter_mut().find(|e| e.kind() == incoming.kind()) {
        Some(slot) => *slot = incoming,
        None => {
            // One slot per kind, so a list never fills up.
            let pushed = next.try_push(incoming).is_ok();
            debug_assert!(pushed, "effect list full: capacity below kind count");
        }
    }
    next
}

fn tick_slot<T>(
    slot: Option<T>,
    expired: &mut Vec<Effect>,
    active: &mut Vec<Effect>,
) -> Option<T>
where
    T: Timed + Copy + Into<Effect>,
{
    let effect = slot?;
    match effect.ticked() {
        Some(next) => {
            active.push(next.into());
            Some(next)
        }
        None => {
            expired.push(effect.into());
            None
        }
    }
}

fn tick_list<T, const N: usize>(
    list: &ArrayVec<T, N>,
    expired: &mut Vec<Effect>,
    active: &mut Vec<Effect>,
) -> ArrayVec<T, N>
where
    T: Timed + Copy + Into<Effect>,
{
    list.iter()
        .filter_map(|&effect| tick_slot(Some(effect), expired, active))
        .collect()
}

/// Result of advancing a ledger by one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerTick {
    pub ledger: EffectLedger,
    /// Effects that ran out this tick.
    pub expired: Vec<Effect>,
    /// Effects still active, with updated counters.
    pub active: Vec<Effect>,
}

/// Active status effects on one character.
///
/// Every operation returns a new ledger; the receiver is never modified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectLedger {
    action_forcing: Option<Condition<ActionForcingKind>>,
    movement_restricting: Option<Condition<MovementRestrictingKind>>,
    movement_altering: Listed<Condition<MovementAlteringKind>>,
    action_restricting: Listed<Condition<ActionRestrictingKind>>,
    damage_over_time: Listed<Periodic<DamageOverTimeKind>>,
    heal_over_time: Listed<Periodic<HealOverTimeKind>>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_effects(effects: impl IntoIterator<Item = Effect>) -> Self {
        effects
            .into_iter()
            .fold(Self::new(), |ledger, effect| ledger.add(effect))
    }

    /// Adds an effect under its family's conflict policy.
    pub fn add(&self, effect: Effect) -> Self {
        let mut next = self.clone();
        match effect {
            Effect::ActionForcing(e) => {
                next.action_forcing = resolve_exclusive(next.action_forcing, e);
            }
            Effect::MovementRestricting(e) => {
                next.movement_restricting = resolve_exclusive(next.movement_restricting, e);
            }
            Effect::MovementAltering(e) => {
                next.movement_altering = resolve_listed(&self.movement_altering, e);
            }
            Effect::ActionRestricting(e) => {
                next.action_restricting = resolve_listed(&self.action_restricting, e);
            }
            Effect::DamageOverTime(e) => {
                next.damage_over_time = resolve_listed(&self.damage_over_time, e);
            }
            Effect::HealOverTime(e) => {
                next.heal_over_time = resolve_listed(&self.heal_over_time, e);
            }
        }
        next
    }

    /// Removes the effect of the given kind, if present.
    ///
    /// An exclusive slot is cleared only when it holds exactly that kind.
    pub fn remove(&self, kind: EffectKind) -> Self {
        let mut next = self.clone();
        match kind {
            EffectKind::ActionForcing(k) => {
                if next.action_forcing.is_some_and(|e| e.kind == k) {
                    next.action_forcing = None;
                }
            }
            EffectKind::MovementRestricting(k) => {
                if next.movement_restricting.is_some_and(|e| e.kind == k) {
                    next.movement_restricting = None;
                }
            }
            EffectKind::MovementAltering(k) => next.movement_altering.retain(|e| e.kind != k),
            EffectKind::ActionRestricting(k) => next.action_restricting.retain(|e| e.kind != k),
            EffectKind::DamageOverTime(k) => next.damage_over_time.retain(|e| e.kind != k),
            EffectKind::HealOverTime(k) => next.heal_over_time.retain(|e| e.kind != k),
        }
        next
    }

    /// Removes the instance's kind.
    pub fn remove_effect(&self, effect: &Effect) -> Self {
        self.remove(effect.kind())
    }

    /// Advances every timed effect by one round.
    pub fn tick(&self) -> LedgerTick {
        let mut expired = Vec::new();
        let mut active = Vec::new();

        let ledger = Self {
            action_forcing: tick_slot(self.action_forcing, &mut expired, &mut active),
            movement_restricting: tick_slot(self.movement_restricting, &mut expired, &mut active),
            movement_altering: tick_list(&self.movement_altering, &mut expired, &mut active),
            action_restricting: tick_list(&self.action_restricting, &mut expired, &mut active),
            damage_over_time: tick_list(&self.damage_over_time, &mut expired, &mut active),
            heal_over_time: tick_list(&self.heal_over_time, &mut expired, &mut active),
        };

        LedgerTick {
            ledger,
            expired,
            active,
        }
    }

    /// Strips every effect removed on damage. Returns the stripped effects.
    pub fn strip_on_damage(&self) -> (Self, Vec<Effect>) {
        let stripped: Vec<Effect> = self
            .all()
            .into_iter()
            .filter(Effect::removed_on_damage_taken)
            .collect();
        let ledger = stripped
            .iter()
            .fold(self.clone(), |ledger, effect| ledger.remove_effect(effect));
        (ledger, stripped)
    }

    /// All active effects, family by family.
    pub fn all(&self) -> Vec<Effect> {
        let mut effects = Vec::new();
        effects.extend(self.action_forcing.map(Effect::from));
        effects.extend(self.movement_restricting.map(Effect::from));
        effects.extend(self.movement_altering.iter().copied().map(Effect::from));
        effects.extend(self.action_restricting.iter().copied().map(Effect::from));
        effects.extend(self.damage_over_time.iter().copied().map(Effect::from));
        effects.extend(self.heal_over_time.iter().copied().map(Effect::from));
        effects
    }

    pub fn len(&self) -> usize {
        usize::from(self.action_forcing.is_some())
            + usize::from(self.movement_restricting.is_some())
            + self.movement_altering.len()
            + self.action_restricting.len()
            + self.damage_over_time.len()
            + self.heal_over_time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, kind: EffectKind) -> Option<Effect> {
        self.all().into_iter().find(|e| e.kind() == kind)
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// The action-forcing effect, if any.
    pub fn forcing(&self) -> Option<ActionForcingKind> {
        self.action_forcing.map(|e| e.kind)
    }

    pub fn is_dying(&self) -> bool {
        self.forcing() == Some(ActionForcingKind::Dying)
    }

    /// Movement budget after restriction, then alteration.
    ///
    /// A full block stays blocked whatever alters movement afterwards.
    pub fn movement_budget(&self, base: u32) -> u32 {
        let restricted = match self.movement_restricting.map(|e| e.kind) {
            Some(MovementRestrictingKind::Held) => return 0,
            Some(MovementRestrictingKind::Entangled) => base / 2,
            None => base,
        };

        let hasted = self
            .movement_altering
            .iter()
            .filter(|e| e.kind == MovementAlteringKind::Hasted)
            .count() as u32;
        let slowed = self
            .movement_altering
            .iter()
            .filter(|e| e.kind == MovementAlteringKind::Slowed)
            .count() as u32;

        (restricted << hasted) >> slowed
    }

    /// Whether an action restriction forbids this category.
    pub fn restricts(&self, category: ActionCategory) -> bool {
        self.action_restricting.iter().any(|e| match e.kind {
            ActionRestrictingKind::Disarmed => category == ActionCategory::Weapon,
            ActionRestrictingKind::Silenced => category == ActionCategory::Spell,
        })
    }

    pub fn damage_over_time(&self) -> &[Periodic<DamageOverTimeKind>] {
        &self.damage_over_time
    }

    pub fn heal_over_time(&self) -> &[Periodic<HealOverTimeKind>] {
        &self.heal_over_time
    }
}
