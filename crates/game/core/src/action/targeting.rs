//! Target contracts and target enumeration.
//!
//! Range is measured with [`Battleground::range`] from the node the user
//! will stand on after moving. Dying characters are never valid targets,
//! not even for healing allies: a dying character only recovers through
//! its own Fight For Life.

use crate::battleground::{Battleground, NodeId};
use crate::state::{CharacterId, CharacterState, Roster};

// ============================================================================
// Target Type
// ============================================================================

/// Which characters an action may be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TargetType {
    /// The user only.
    SelfOnly,
    /// One member of the user's side, the user included.
    Ally,
    Enemy,
    /// Two distinct allies; a lone ally in range is offered on its own.
    TwoAllies,
    /// Two distinct enemies; a lone enemy in range is offered on its own.
    TwoEnemies,
    /// Every ally standing on one node in range.
    AlliesAtNode,
    /// Every enemy standing on one node in range.
    EnemiesAtNode,
    /// Everyone standing on one node in range.
    EveryoneAtNode,
}

impl TargetType {
    fn admits(self, actor: &CharacterState, other: &CharacterState) -> bool {
        match self {
            Self::SelfOnly => other.id == actor.id,
            Self::Ally | Self::TwoAllies | Self::AlliesAtNode => {
                other.allegiance == actor.allegiance
            }
            Self::Enemy | Self::TwoEnemies | Self::EnemiesAtNode => {
                other.allegiance != actor.allegiance
            }
            Self::EveryoneAtNode => true,
        }
    }
}

// ============================================================================
// Target
// ============================================================================

/// A concrete choice of targets.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    Myself,
    Single(CharacterId),
    Pair(CharacterId, CharacterId),
    Node {
        node: NodeId,
        members: Vec<CharacterId>,
    },
}

impl Target {
    /// Affected characters in resolution order.
    pub fn members(&self, actor: CharacterId) -> Vec<CharacterId> {
        match self {
            Self::Myself => vec![actor],
            Self::Single(id) => vec![*id],
            Self::Pair(first, second) => vec![*first, *second],
            Self::Node { members, .. } => members.clone(),
        }
    }
}

/// Enumerates every valid target for an action used from `node`.
///
/// Order is deterministic: roster order for characters, ascending node id
/// for node-scoped targets, lexicographic roster order for pairs.
pub fn candidate_targets(
    target: TargetType,
    range: u32,
    actor: &CharacterState,
    node: NodeId,
    roster: &Roster,
    ground: &Battleground,
) -> Vec<Target> {
    if target == TargetType::SelfOnly {
        return vec![Target::Myself];
    }

    let position = |state: &CharacterState| {
        if state.id == actor.id {
            node
        } else {
            state.position
        }
    };
    let in_range = |at: NodeId| ground.range(node, at).is_some_and(|r| r <= range);
    // Dying allies stay out of Heal targets too.
    let eligible = |state: &&CharacterState| !state.is_dying() && target.admits(actor, state);

    match target {
        TargetType::SelfOnly => vec![Target::Myself],
        TargetType::Ally | TargetType::Enemy => roster
            .iter()
            .filter(eligible)
            .filter(|s| in_range(position(*s)))
            .map(|s| Target::Single(s.id))
            .collect(),
        TargetType::TwoAllies | TargetType::TwoEnemies => {
            let ids: Vec<CharacterId> = roster
                .iter()
                .filter(eligible)
                .filter(|s| in_range(position(*s)))
                .map(|s| s.id)
                .collect();
            if let [only] = ids.as_slice() {
                return vec![Target::Single(*only)];
            }
            let mut pairs = Vec::new();
            for (i, first) in ids.iter().enumerate() {
                for second in &ids[i + 1..] {
                    pairs.push(Target::Pair(*first, *second));
                }
            }
            pairs
        }
        TargetType::AlliesAtNode | TargetType::EnemiesAtNode | TargetType::EveryoneAtNode => {
            ground
                .node_ids()
                .filter(|&at| in_range(at))
                .filter_map(|at| {
                    let members: Vec<CharacterId> = roster
                        .iter()
                        .filter(eligible)
                        .filter(|s| position(*s) == at)
                        .map(|s| s.id)
                        .collect();
                    (!members.is_empty()).then_some(Target::Node { node: at, members })
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::character::{Character, CharacterClass};
    use crate::effect::Effect;
    use crate::state::Allegiance;

    fn ground() -> Battleground {
        Battleground::builder()
            .node(0, 4)
            .node(1, 4)
            .node(2, 4)
            .road(0, 1, 1)
            .road(1, 2, 1)
            .mutual_sight(0, 1, 1)
            .mutual_sight(1, 2, 1)
            .mutual_sight(0, 2, 2)
            .build()
            .unwrap()
    }

    fn roster() -> Roster {
        let fighter = Arc::new(Character::builder("Fighter", CharacterClass::Fighter).build());
        let mut roster = Roster::new();
        roster.push(fighter.clone(), Allegiance::Attacker, NodeId(0));
        roster.push(fighter.clone(), Allegiance::Attacker, NodeId(0));
        roster.push(fighter.clone(), Allegiance::Defender, NodeId(1));
        roster.push(fighter.clone(), Allegiance::Defender, NodeId(2));
        roster.push(fighter, Allegiance::Defender, NodeId(2));
        roster
    }

    #[test]
    fn self_only_is_always_available() {
        let roster = roster();
        let actor = roster.get(CharacterId(0)).unwrap();
        let targets =
            candidate_targets(TargetType::SelfOnly, 0, actor, NodeId(2), &roster, &ground());
        assert_eq!(targets, vec![Target::Myself]);
    }

    #[test]
    fn single_enemies_respect_range_from_destination() {
        let roster = roster();
        let actor = roster.get(CharacterId(0)).unwrap();

        let melee = candidate_targets(TargetType::Enemy, 0, actor, NodeId(1), &roster, &ground());
        assert_eq!(melee, vec![Target::Single(CharacterId(2))]);

        let ranged = candidate_targets(TargetType::Enemy, 1, actor, NodeId(0), &roster, &ground());
        assert_eq!(ranged, vec![Target::Single(CharacterId(2))]);

        let long = candidate_targets(TargetType::Enemy, 2, actor, NodeId(0), &roster, &ground());
        assert_eq!(long.len(), 3);
    }

    #[test]
    fn allies_follow_the_actor_to_its_destination() {
        let roster = roster();
        let actor = roster.get(CharacterId(0)).unwrap();
        let targets = candidate_targets(TargetType::Ally, 0, actor, NodeId(1), &roster, &ground());
        assert_eq!(targets, vec![Target::Single(CharacterId(0))]);
    }

    #[test]
    fn pairs_are_unordered_and_skip_the_dying() {
        let mut roster = roster();
        let dying = roster.get(CharacterId(2)).unwrap().clone();
        roster.replace(CharacterState {
            effects: dying.effects.add(Effect::dying()),
            ..dying
        });

        let actor = roster.get(CharacterId(0)).unwrap();
        let targets =
            candidate_targets(TargetType::TwoEnemies, 2, actor, NodeId(0), &roster, &ground());
        assert_eq!(targets, vec![Target::Pair(CharacterId(3), CharacterId(4))]);
    }

    #[test]
    fn dying_allies_cannot_be_healed() {
        let mut roster = roster();
        let dying = roster.get(CharacterId(1)).unwrap().clone();
        roster.replace(CharacterState {
            effects: dying.effects.add(Effect::dying()),
            ..dying
        });

        let actor = roster.get(CharacterId(0)).unwrap();
        let targets = candidate_targets(TargetType::Ally, 0, actor, NodeId(0), &roster, &ground());
        assert_eq!(targets, vec![Target::Single(CharacterId(0))]);
    }

    #[test]
    fn node_targets_group_members() {
        let roster = roster();
        let actor = roster.get(CharacterId(0)).unwrap();
        let targets = candidate_targets(
            TargetType::EveryoneAtNode,
            1,
            actor,
            NodeId(1),
            &roster,
            &ground(),
        );
        assert_eq!(
            targets,
            vec![
                Target::Node {
                    node: NodeId(0),
                    members: vec![CharacterId(1)],
                },
                Target::Node {
                    node: NodeId(1),
                    members: vec![CharacterId(0), CharacterId(2)],
                },
                Target::Node {
                    node: NodeId(2),
                    members: vec![CharacterId(3), CharacterId(4)],
                },
            ]
        );
    }
}
