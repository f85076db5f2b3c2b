//! Standard weapons, armor and shields.

use std::collections::BTreeMap;

use skirmish_core::{Armor, ArmorWeight, Attribute, DiceExpr, Shield, Weapon, WeaponReach};

/// Named equipment, looked up case-insensitively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armory {
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<Weapon>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armors: Vec<Armor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shields: Vec<Shield>,
}

impl Armory {
    pub fn standard() -> Self {
        Self {
            weapons: standard_weapons(),
            armors: standard_armors(),
            shields: vec![shield("Buckler", 1), shield("Shield", 2)],
        }
    }

    pub fn weapon(&self, name: &str) -> Option<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
    }

    pub fn armor(&self, name: &str) -> Option<&Armor> {
        self.armors.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn shield(&self, name: &str) -> Option<&Shield> {
        self.shields
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Merges `other` into this armory; entries with a known name replace
    /// the existing one.
    pub fn extend(&mut self, other: Armory) {
        merge(&mut self.weapons, other.weapons, |w| &w.name);
        merge(&mut self.armors, other.armors, |a| &a.name);
        merge(&mut self.shields, other.shields, |s| &s.name);
    }
}

fn merge<T>(into: &mut Vec<T>, from: Vec<T>, name: impl Fn(&T) -> &String) {
    let mut index: BTreeMap<String, usize> = into
        .iter()
        .enumerate()
        .map(|(i, item)| (name(item).to_ascii_lowercase(), i))
        .collect();
    for item in from {
        let key = name(&item).to_ascii_lowercase();
        match index.get(&key) {
            Some(&i) => into[i] = item,
            None => {
                index.insert(key, into.len());
                into.push(item);
            }
        }
    }
}

fn weapon(
    name: &str,
    damage: DiceExpr,
    attribute: Attribute,
    reach: WeaponReach,
    range: u32,
) -> Weapon {
    Weapon {
        name: name.to_string(),
        damage,
        attribute,
        reach,
        range,
        bonus: 0,
    }
}

fn armor(name: &str, weight: ArmorWeight, base: i32, max_dex: Option<i32>) -> Armor {
    Armor {
        name: name.to_string(),
        weight,
        base,
        max_dex,
    }
}

fn shield(name: &str, bonus: i32) -> Shield {
    Shield {
        name: name.to_string(),
        bonus,
    }
}

fn standard_weapons() -> Vec<Weapon> {
    use Attribute::{Dexterity, Strength};
    use WeaponReach::{Melee, Ranged};

    vec![
        weapon("Dagger", DiceExpr::new(1, 4, 0), Dexterity, Melee, 0),
        weapon("Shortsword", DiceExpr::new(1, 6, 0), Dexterity, Melee, 0),
        weapon("Longsword", DiceExpr::new(1, 8, 0), Strength, Melee, 0),
        weapon("Greatsword", DiceExpr::new(2, 6, 0), Strength, Melee, 0),
        weapon("Mace", DiceExpr::new(1, 6, 0), Strength, Melee, 0),
        weapon("Quarterstaff", DiceExpr::new(1, 6, 0), Strength, Melee, 0),
        weapon("Spear", DiceExpr::new(1, 6, 0), Strength, Melee, 1),
        weapon("Shortbow", DiceExpr::new(1, 6, 0), Dexterity, Ranged, 3),
        weapon("Longbow", DiceExpr::new(1, 8, 0), Dexterity, Ranged, 4),
    ]
}

fn standard_armors() -> Vec<Armor> {
    use ArmorWeight::{Heavy, Light, Medium};

    vec![
        armor("Padded", Light, 1, None),
        armor("Leather", Light, 1, None),
        armor("Studded Leather", Light, 2, None),
        armor("Chain Shirt", Medium, 3, Some(2)),
        armor("Scale Mail", Medium, 4, Some(2)),
        armor("Chain Mail", Heavy, 6, Some(0)),
        armor("Plate", Heavy, 8, Some(0)),
    ]
}
