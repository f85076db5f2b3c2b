//! Deterministic turn-based tactical combat.
//!
//! `skirmish-core` simulates two rosters fighting over a node-graph
//! battleground: dice and rules arithmetic, the status effect ledger,
//! capacity-aware movement, resolution operations, the utility-driven turn
//! decision engine and the round/encounter loop. Every roll is drawn from an
//! injected [`Dice`], so a seed fully determines an encounter. All state
//! transitions are reported as [`Event`] records carrying the updated state.
pub mod action;
pub mod battleground;
pub mod character;
pub mod config;
pub mod dice;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod rules;
pub mod state;

pub use action::{
    ActionCategory, ActionDef, ActionEffect, Movement, MovementMode, Target, TargetType,
};
pub use battleground::{
    Battleground, BattlegroundBuilder, BattlegroundError, LineOfSight, Node, NodeId, Occupancy,
    Path, Reach, UNREACHABLE,
};
pub use character::{
    Armor, ArmorWeight, Arms, ArmsRequirement, Attribute, Attributes, Character, CharacterClass,
    ClassSet, Hand, Inventory, Shield, Weapon, WeaponReach,
};
pub use config::CombatConfig;
pub use dice::{Dice, DiceExpr, DiceParseError, LoadedDice, RollRecord, ScriptedDice, SeededDice};
pub use effect::{Effect, EffectFamily, EffectKind, EffectLedger};
pub use engine::{
    Decision, Encounter, EncounterError, EncounterReport, InitiativeRoll, Outcome, Plan, Round,
    Side, Turn, decide,
};
pub use env::{ActionOracle, CombatEnv};
pub use error::{CombatError, ErrorSeverity};
pub use state::{Allegiance, CharacterId, CharacterState, Event, Roster, Standing};
