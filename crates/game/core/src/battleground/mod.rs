//! Battleground graph.
//!
//! A battleground is a set of [`Node`]s. Each node holds a limited number of
//! characters, weighted [`Path`]s for normal movement, and [`LineOfSight`]
//! entries used both for special movement and as the range metric for
//! targeting. See [`movement`] for the reachability queries.
pub mod movement;

pub use movement::{Occupancy, PartyCount, Reach, UNREACHABLE};

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CombatError, ErrorSeverity};

/// Node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// A weighted edge for normal movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    pub cost: u32,
    pub destination: NodeId,
}

/// A direct sight line for special movement and targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineOfSight {
    pub destination: NodeId,
    pub range: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    /// Maximum occupants.
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub paths: Vec<Path>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub sight: Vec<LineOfSight>,
}

impl Node {
    pub fn new(id: NodeId, capacity: u32) -> Self {
        Self {
            id,
            capacity,
            paths: Vec::new(),
            sight: Vec::new(),
        }
    }
}

/// Configuration errors in a battleground definition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattlegroundError {
    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),

    #[error("node {0} has zero capacity")]
    ZeroCapacity(NodeId),

    #[error("node {from} references unknown node {to}")]
    UnknownNode { from: NodeId, to: NodeId },

    #[error("battleground has no nodes")]
    Empty,
}

impl CombatError for BattlegroundError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateNode(_) => "BATTLEGROUND_DUPLICATE_NODE",
            Self::ZeroCapacity(_) => "BATTLEGROUND_ZERO_CAPACITY",
            Self::UnknownNode { .. } => "BATTLEGROUND_UNKNOWN_NODE",
            Self::Empty => "BATTLEGROUND_EMPTY",
        }
    }
}

/// Validated node graph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Battleground {
    nodes: BTreeMap<NodeId, Node>,
}

impl Battleground {
    /// Validates and builds a battleground.
    ///
    /// # Errors
    ///
    /// Fails on duplicate ids, zero capacities and dangling references.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Result<Self, BattlegroundError> {
        let mut map = BTreeMap::new();
        for node in nodes {
            if node.capacity == 0 {
                return Err(BattlegroundError::ZeroCapacity(node.id));
            }
            if let Some(previous) = map.insert(node.id, node) {
                return Err(BattlegroundError::DuplicateNode(previous.id));
            }
        }
        if map.is_empty() {
            return Err(BattlegroundError::Empty);
        }

        for node in map.values() {
            let targets = node
                .paths
                .iter()
                .map(|p| p.destination)
                .chain(node.sight.iter().map(|s| s.destination));
            for to in targets {
                if !map.contains_key(&to) {
                    return Err(BattlegroundError::UnknownNode { from: node.id, to });
                }
            }
        }

        Ok(Self { nodes: map })
    }

    pub fn builder() -> BattlegroundBuilder {
        BattlegroundBuilder::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self, id: NodeId) -> u32 {
        self.nodes.get(&id).map_or(0, |n| n.capacity)
    }

    /// Targeting range between two nodes.
    ///
    /// Zero within a node, the shortest sight line otherwise, `None` when
    /// there is no line of sight.
    pub fn range(&self, from: NodeId, to: NodeId) -> Option<u32> {
        if from == to {
            return Some(0);
        }
        self.nodes
            .get(&from)?
            .sight
            .iter()
            .filter(|s| s.destination == to)
            .map(|s| s.range)
            .min()
    }
}

/// Incremental battleground construction.
#[derive(Clone, Debug, Default)]
pub struct BattlegroundBuilder {
    nodes: Vec<Node>,
}

impl BattlegroundBuilder {
    pub fn node(mut self, id: u32, capacity: u32) -> Self {
        self.nodes.push(Node::new(NodeId(id), capacity));
        self
    }

    /// One-way path.
    pub fn path(mut self, from: u32, to: u32, cost: u32) -> Self {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == NodeId(from)) {
            node.paths.push(Path {
                cost,
                destination: NodeId(to),
            });
        }
        self
    }

    /// Path in both directions.
    pub fn road(self, a: u32, b: u32, cost: u32) -> Self {
        self.path(a, b, cost).path(b, a, cost)
    }

    /// One-way sight line.
    pub fn sight(mut self, from: u32, to: u32, range: u32) -> Self {
        if let Some(node) = self.nodes.iter_mut().find(|n| n.id == NodeId(from)) {
            node.sight.push(LineOfSight {
                destination: NodeId(to),
                range,
            });
        }
        self
    }

    /// Sight line in both directions.
    pub fn mutual_sight(self, a: u32, b: u32, range: u32) -> Self {
        self.sight(a, b, range).sight(b, a, range)
    }

    /// # Errors
    ///
    /// See [`Battleground::new`].
    pub fn build(self) -> Result<Battleground, BattlegroundError> {
        Battleground::new(self.nodes)
    }
}
