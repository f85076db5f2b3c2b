//! Capacity-aware reachability.
//!
//! Two metrics decide where a character may go this turn:
//!
//! - **Normal movement**: Dijkstra over the weighted path graph. Full nodes
//!   cannot be entered, and the start node cannot be left while the mover's
//!   side does not outnumber the enemies standing there.
//! - **Special movement**: a single hop along a line of sight, costing the
//!   recorded range, into any node with free capacity.
//!
//! Both report [`UNREACHABLE`] for nodes that cannot be reached.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use super::{Battleground, NodeId};

/// Cost reported for unreachable nodes.
pub const UNREACHABLE: u32 = u32::MAX;

/// Occupants of one node, counted from the mover's side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartyCount {
    pub allies: u32,
    pub enemies: u32,
}

impl PartyCount {
    pub const fn total(&self) -> u32 {
        self.allies + self.enemies
    }

    /// The mover's side may leave only while it outnumbers the enemies.
    pub const fn can_disengage(&self) -> bool {
        self.allies > self.enemies
    }
}

/// Party counts per node, snapshot from one side's point of view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Occupancy {
    counts: BTreeMap<NodeId, PartyCount>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_ally(&mut self, node: NodeId) {
        self.counts.entry(node).or_default().allies += 1;
    }

    pub fn add_enemy(&mut self, node: NodeId) {
        self.counts.entry(node).or_default().enemies += 1;
    }

    pub fn at(&self, node: NodeId) -> PartyCount {
        self.counts.get(&node).copied().unwrap_or_default()
    }

    pub fn has_room(&self, ground: &Battleground, node: NodeId) -> bool {
        self.at(node).total() < ground.capacity(node)
    }
}

/// Movement cost from one start node to every node of a battleground.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reach {
    start: NodeId,
    costs: BTreeMap<NodeId, u32>,
}

impl Reach {
    fn unreachable_from(ground: &Battleground, start: NodeId) -> Self {
        let costs = ground.node_ids().map(|id| (id, UNREACHABLE)).collect();
        Self { start, costs }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Cost to reach `node`; [`UNREACHABLE`] if it cannot be reached.
    pub fn cost(&self, node: NodeId) -> u32 {
        self.costs.get(&node).copied().unwrap_or(UNREACHABLE)
    }

    /// Reachable nodes within `budget`, ascending by id, with their cost.
    pub fn within(&self, budget: u32) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.costs
            .iter()
            .filter(move |&(_, &cost)| cost != UNREACHABLE && cost <= budget)
            .map(|(&node, &cost)| (node, cost))
    }
}

impl Battleground {
    /// Shortest normal-movement cost from `start` to every node.
    pub fn normal_reach(&self, start: NodeId, occupancy: &Occupancy) -> Reach {
        let mut reach = Reach::unreachable_from(self, start);
        if !self.contains(start) {
            return reach;
        }
        reach.costs.insert(start, 0);

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse((0u32, start)));

        while let Some(Reverse((cost, node))) = frontier.pop() {
            if cost > reach.cost(node) {
                continue;
            }
            if node == start && !occupancy.at(start).can_disengage() {
                continue;
            }
            let Some(current) = self.node(node) else {
                continue;
            };

            for path in &current.paths {
                if path.destination == start || !occupancy.has_room(self, path.destination) {
                    continue;
                }
                let next = cost.saturating_add(path.cost);
                if next < reach.cost(path.destination) {
                    reach.costs.insert(path.destination, next);
                    frontier.push(Reverse((next, path.destination)));
                }
            }
        }

        reach
    }

    /// Single-hop line-of-sight cost from `start` to every node.
    pub fn special_reach(&self, start: NodeId, occupancy: &Occupancy) -> Reach {
        let mut reach = Reach::unreachable_from(self, start);
        let Some(origin) = self.node(start) else {
            return reach;
        };
        reach.costs.insert(start, 0);

        for line in &origin.sight {
            if line.destination == start || !occupancy.has_room(self, line.destination) {
                continue;
            }
            let entry = reach.costs.entry(line.destination).or_insert(UNREACHABLE);
            *entry = (*entry).min(line.range);
        }

        reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// ```text
    /// 0 -1- 1 -1- 2
    /// |           |
    /// 2           1
    /// |           |
    /// 3 ----2---- 4
    /// ```
    fn pentagon() -> Battleground {
        Battleground::builder()
            .node(0, 2)
            .node(1, 2)
            .node(2, 1)
            .node(3, 2)
            .node(4, 2)
            .road(0, 1, 1)
            .road(1, 2, 1)
            .road(0, 3, 2)
            .road(3, 4, 2)
            .road(2, 4, 1)
            .mutual_sight(0, 4, 3)
            .mutual_sight(0, 2, 2)
            .build()
            .unwrap()
    }

    fn alone_at(node: u32) -> Occupancy {
        let mut occupancy = Occupancy::new();
        occupancy.add_ally(NodeId(node));
        occupancy
    }

    #[test]
    fn shortest_paths_on_an_open_graph() {
        let reach = pentagon().normal_reach(NodeId(0), &alone_at(0));
        assert_eq!(reach.cost(NodeId(0)), 0);
        assert_eq!(reach.cost(NodeId(1)), 1);
        assert_eq!(reach.cost(NodeId(2)), 2);
        assert_eq!(reach.cost(NodeId(3)), 2);
        assert_eq!(reach.cost(NodeId(4)), 3);
    }

    #[test]
    fn full_nodes_are_unreachable() {
        let mut occupancy = alone_at(0);
        occupancy.add_enemy(NodeId(2));

        let reach = pentagon().normal_reach(NodeId(0), &occupancy);
        assert_eq!(reach.cost(NodeId(2)), UNREACHABLE);
        assert_eq!(reach.cost(NodeId(1)), 1);
        assert_eq!(reach.cost(NodeId(3)), 2);
        // 0 -> 3 -> 4 now that 2 is blocked
        assert_eq!(reach.cost(NodeId(4)), 4);

        let within: Vec<NodeId> = reach.within(2).map(|(n, _)| n).collect();
        assert_eq!(within, vec![NodeId(0), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn cannot_disengage_when_matched() {
        let mut occupancy = alone_at(0);
        occupancy.add_enemy(NodeId(0));

        let reach = pentagon().normal_reach(NodeId(0), &occupancy);
        assert_eq!(reach.cost(NodeId(0)), 0);
        assert_eq!(reach.within(u32::MAX - 1).count(), 1);

        occupancy.add_ally(NodeId(0));
        let reach = pentagon().normal_reach(NodeId(0), &occupancy);
        assert_eq!(reach.cost(NodeId(1)), 1);
    }

    #[test]
    fn special_movement_follows_sight_lines() {
        let ground = pentagon();
        let reach = ground.special_reach(NodeId(0), &alone_at(0));
        assert_eq!(reach.cost(NodeId(0)), 0);
        assert_eq!(reach.cost(NodeId(4)), 3);
        assert_eq!(reach.cost(NodeId(2)), 2);
        assert_eq!(reach.cost(NodeId(1)), UNREACHABLE);

        let mut crowded = alone_at(0);
        crowded.add_ally(NodeId(2));
        let reach = ground.special_reach(NodeId(0), &crowded);
        assert_eq!(reach.cost(NodeId(2)), UNREACHABLE);
    }

    #[test]
    fn unknown_start_reaches_nothing() {
        let reach = pentagon().normal_reach(NodeId(42), &Occupancy::new());
        assert_eq!(reach.within(u32::MAX - 1).count(), 0);
    }
}
