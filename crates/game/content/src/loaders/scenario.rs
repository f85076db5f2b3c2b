//! Scenario loader.
//!
//! A scenario names a battleground and two sides. Equipment is referenced
//! by name and resolved against an [`Armory`] when the scenario is built.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use skirmish_core::{
    Arms, Attributes, Battleground, Character, CharacterClass, Inventory, LineOfSight, Node,
    NodeId, Path as Road, Side,
};

use crate::catalog::Armory;
use crate::loaders::{LoadResult, read_file};

/// A weighted path or a sight line from the enclosing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub to: u32,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: u32,
    pub capacity: u32,
    #[serde(default)]
    pub paths: Vec<EdgeSpec>,
    /// Sight lines; `cost` is the range.
    #[serde(default)]
    pub sight: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    pub class: CharacterClass,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub shield: Option<String>,
    #[serde(default)]
    pub off_hand: Option<String>,
    #[serde(default)]
    pub two_handed: bool,
}

fn first_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideSpec {
    pub start: u32,
    pub members: Vec<MemberSpec>,
}

/// Scenario file structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub name: String,
    /// Default seed when none is given on the command line.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub round_cap: Option<u32>,
    pub nodes: Vec<NodeSpec>,
    pub attackers: SideSpec,
    pub defenders: SideSpec,
}

/// A scenario ready to run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub seed: Option<u64>,
    pub round_cap: Option<u32>,
    pub battleground: Battleground,
    pub attackers: Side,
    pub defenders: Side,
}

impl ScenarioSpec {
    /// Validates the graph and resolves equipment names.
    ///
    /// # Errors
    ///
    /// Fails on an invalid battleground or an unknown piece of equipment,
    /// naming the member that referenced it.
    pub fn build(self, armory: &Armory) -> LoadResult<Scenario> {
        let battleground = Battleground::new(self.nodes.into_iter().map(NodeSpec::into_node))
            .context("Invalid battleground")?;

        let attackers = build_side(self.attackers, armory).context("Invalid attackers")?;
        let defenders = build_side(self.defenders, armory).context("Invalid defenders")?;

        Ok(Scenario {
            name: self.name,
            seed: self.seed,
            round_cap: self.round_cap,
            battleground,
            attackers,
            defenders,
        })
    }
}

impl NodeSpec {
    fn into_node(self) -> Node {
        let mut node = Node::new(NodeId(self.id), self.capacity);
        node.paths = self
            .paths
            .into_iter()
            .map(|edge| Road {
                cost: edge.cost,
                destination: NodeId(edge.to),
            })
            .collect();
        node.sight = self
            .sight
            .into_iter()
            .map(|edge| LineOfSight {
                destination: NodeId(edge.to),
                range: edge.cost,
            })
            .collect();
        node
    }
}

fn build_side(spec: SideSpec, armory: &Armory) -> LoadResult<Side> {
    let members = spec
        .members
        .into_iter()
        .map(|member| {
            let name = member.name.clone();
            build_member(member, armory).with_context(|| format!("Invalid member '{}'", name))
        })
        .collect::<LoadResult<Vec<_>>>()?;
    Ok(Side::new(NodeId(spec.start), members))
}

fn build_member(spec: MemberSpec, armory: &Armory) -> LoadResult<Character> {
    let armor = spec
        .armor
        .as_deref()
        .map(|name| {
            armory
                .armor(name)
                .cloned()
                .with_context(|| format!("Unknown armor '{}'", name))
        })
        .transpose()?;

    let weapon = |name: &str| {
        armory
            .weapon(name)
            .cloned()
            .with_context(|| format!("Unknown weapon '{}'", name))
    };

    let arms = match (spec.weapon.as_deref(), spec.off_hand.as_deref()) {
        (None, None) => {
            anyhow::ensure!(spec.shield.is_none(), "A shield needs a weapon hand");
            Arms::Unarmed
        }
        (None, Some(_)) => anyhow::bail!("An off-hand weapon needs a main weapon"),
        (Some(main), Some(off)) => {
            anyhow::ensure!(
                spec.shield.is_none() && !spec.two_handed,
                "Dual wielding leaves no hand for a shield or a two-handed grip"
            );
            Arms::DualWield {
                main: weapon(main)?,
                off: weapon(off)?,
            }
        }
        (Some(main), None) if spec.two_handed => {
            anyhow::ensure!(
                spec.shield.is_none(),
                "A two-handed grip leaves no hand for a shield"
            );
            Arms::TwoHanded {
                weapon: weapon(main)?,
            }
        }
        (Some(main), None) => Arms::OneHanded {
            weapon: weapon(main)?,
            shield: spec
                .shield
                .as_deref()
                .map(|name| {
                    armory
                        .shield(name)
                        .cloned()
                        .with_context(|| format!("Unknown shield '{}'", name))
                })
                .transpose()?,
        },
    };

    Ok(Character::new(
        spec.name,
        spec.class,
        spec.level,
        spec.attributes,
        Inventory { armor, arms },
    ))
}

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load the raw scenario description from a RON file.
    pub fn load_spec(path: &Path) -> LoadResult<ScenarioSpec> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON {}: {}", path.display(), e))
    }

    /// Load a scenario and resolve its equipment against `armory`.
    pub fn load(path: &Path, armory: &Armory) -> LoadResult<Scenario> {
        let scenario = Self::load_spec(path)?
            .build(armory)
            .with_context(|| format!("Invalid scenario {}", path.display()))?;

        tracing::debug!(
            "Loaded scenario '{}' with {} nodes, {} attackers, {} defenders",
            scenario.name,
            scenario.battleground.len(),
            scenario.attackers.members.len(),
            scenario.defenders.members.len()
        );
        Ok(scenario)
    }
}
