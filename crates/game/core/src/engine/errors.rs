//! Encounter setup errors.

use crate::battleground::{BattlegroundError, NodeId};
use crate::error::{CombatError, ErrorSeverity};
use crate::state::Allegiance;

/// Errors surfaced while setting up an encounter.
///
/// Everything is checked before the first roll; a running encounter cannot
/// fail.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncounterError {
    #[error("{side} side starts on unknown node {node}")]
    UnknownStartNode { side: Allegiance, node: NodeId },

    #[error("{0} side has no members")]
    EmptySide(Allegiance),

    #[error("roster of {count} exceeds the limit of {limit}")]
    RosterTooLarge { count: usize, limit: usize },

    #[error("node {node} holds {count} starting characters but has capacity {capacity}")]
    Overcrowded {
        node: NodeId,
        count: u32,
        capacity: u32,
    },

    #[error(transparent)]
    Battleground(#[from] BattlegroundError),
}

impl CombatError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptySide(_) | Self::RosterTooLarge { .. } => ErrorSeverity::Validation,
            Self::UnknownStartNode { .. } | Self::Overcrowded { .. } | Self::Battleground(_) => {
                ErrorSeverity::Fatal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStartNode { .. } => "ENCOUNTER_UNKNOWN_START_NODE",
            Self::EmptySide(_) => "ENCOUNTER_EMPTY_SIDE",
            Self::RosterTooLarge { .. } => "ENCOUNTER_ROSTER_TOO_LARGE",
            Self::Overcrowded { .. } => "ENCOUNTER_OVERCROWDED",
            Self::Battleground(inner) => inner.error_code(),
        }
    }
}
