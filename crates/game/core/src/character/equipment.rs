//! Armor and arms configuration.

use crate::dice::DiceExpr;

use super::Attribute;

/// Armor weight category, ordered light to heavy.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArmorWeight {
    Light,
    Medium,
    Heavy,
}

/// Worn armor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub weight: ArmorWeight,
    /// Armor bonus added to the base armor class of 10.
    pub base: i32,
    /// Cap on the dexterity modifier counted toward armor class.
    pub max_dex: Option<i32>,
}

/// How a weapon reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WeaponReach {
    Melee,
    Ranged,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub damage: DiceExpr,
    /// Attribute feeding attack and damage rolls.
    pub attribute: Attribute,
    pub reach: WeaponReach,
    /// Maximum line-of-sight range to a target (0: same node only).
    pub range: u32,
    /// Enchantment bonus to attack and damage.
    pub bonus: i32,
}

impl Weapon {
    /// Bare fists, used when nothing is wielded.
    pub fn unarmed() -> Self {
        Self {
            name: "Fists".to_string(),
            damage: DiceExpr::new(1, 2, 0),
            attribute: Attribute::Strength,
            reach: WeaponReach::Melee,
            range: 0,
            bonus: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub name: String,
    pub bonus: i32,
}

/// What a character holds in their hands.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arms {
    #[default]
    Unarmed,
    OneHanded {
        weapon: Weapon,
        shield: Option<Shield>,
    },
    TwoHanded {
        weapon: Weapon,
    },
    DualWield {
        main: Weapon,
        off: Weapon,
    },
}

/// Which wielded weapon a weapon action swings.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Hand {
    #[default]
    Main,
    /// The off-hand weapon; the main weapon when there is none.
    Off,
    /// Main weapon, then the off-hand weapon if one is wielded.
    Both,
}

impl Arms {
    /// Weapon used by weapon actions; fists when unarmed.
    pub fn primary(&self) -> Weapon {
        match self {
            Self::Unarmed => Weapon::unarmed(),
            Self::OneHanded { weapon, .. } | Self::TwoHanded { weapon } => weapon.clone(),
            Self::DualWield { main, .. } => main.clone(),
        }
    }

    pub fn off_hand(&self) -> Option<Weapon> {
        match self {
            Self::DualWield { off, .. } => Some(off.clone()),
            _ => None,
        }
    }

    /// Weapons swung by an attack with `hand`, in swing order.
    pub fn swings(&self, hand: Hand) -> Vec<Weapon> {
        match hand {
            Hand::Main => vec![self.primary()],
            Hand::Off => vec![self.off_hand().unwrap_or_else(|| self.primary())],
            Hand::Both => std::iter::once(self.primary())
                .chain(self.off_hand())
                .collect(),
        }
    }

    /// Targeting range of an attack with `hand`: the shortest swung range.
    pub fn range(&self, hand: Hand) -> u32 {
        self.swings(hand)
            .iter()
            .map(|weapon| weapon.range)
            .min()
            .unwrap_or(0)
    }

    pub fn shield_bonus(&self) -> i32 {
        match self {
            Self::OneHanded {
                shield: Some(shield),
                ..
            } => shield.bonus,
            _ => 0,
        }
    }
}

/// Arms configuration a weapon action demands.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ArmsRequirement {
    #[default]
    Any,
    Armed,
    Melee,
    Ranged,
    Shield,
    TwoHanded,
    DualWield,
}

impl ArmsRequirement {
    pub fn is_met_by(self, arms: &Arms) -> bool {
        match self {
            Self::Any => true,
            Self::Armed => !matches!(arms, Arms::Unarmed),
            Self::Melee => arms.primary().reach == WeaponReach::Melee,
            Self::Ranged => arms.primary().reach == WeaponReach::Ranged,
            Self::Shield => arms.shield_bonus() > 0,
            Self::TwoHanded => matches!(arms, Arms::TwoHanded { .. }),
            Self::DualWield => matches!(arms, Arms::DualWield { .. }),
        }
    }
}

/// Armor plus arms.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    pub armor: Option<Armor>,
    pub arms: Arms,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bow() -> Weapon {
        Weapon {
            name: "Longbow".to_string(),
            damage: DiceExpr::new(1, 8, 0),
            attribute: Attribute::Dexterity,
            reach: WeaponReach::Ranged,
            range: 6,
            bonus: 0,
        }
    }

    #[test]
    fn requirements_follow_the_arms() {
        let archer = Arms::TwoHanded { weapon: bow() };
        assert!(ArmsRequirement::Ranged.is_met_by(&archer));
        assert!(ArmsRequirement::TwoHanded.is_met_by(&archer));
        assert!(!ArmsRequirement::Melee.is_met_by(&archer));
        assert!(!ArmsRequirement::Shield.is_met_by(&archer));

        assert!(ArmsRequirement::Melee.is_met_by(&Arms::Unarmed));
        assert!(!ArmsRequirement::Armed.is_met_by(&Arms::Unarmed));
    }

    #[test]
    fn shield_bonus_only_with_a_shield() {
        let arms = Arms::OneHanded {
            weapon: Weapon::unarmed(),
            shield: Some(Shield {
                name: "Buckler".to_string(),
                bonus: 1,
            }),
        };
        assert_eq!(arms.shield_bonus(), 1);
        assert_eq!(arms.off_hand(), None);
        assert!(ArmsRequirement::Shield.is_met_by(&arms));
        assert_eq!(Arms::Unarmed.shield_bonus(), 0);
    }

    #[test]
    fn swings_follow_the_hand() {
        let dagger = Weapon {
            name: "Dagger".to_string(),
            damage: DiceExpr::new(1, 4, 0),
            attribute: Attribute::Dexterity,
            reach: WeaponReach::Melee,
            range: 0,
            bonus: 0,
        };
        let arms = Arms::DualWield {
            main: bow(),
            off: dagger.clone(),
        };
        assert_eq!(arms.swings(Hand::Main), vec![bow()]);
        assert_eq!(arms.swings(Hand::Off), vec![dagger.clone()]);
        assert_eq!(arms.swings(Hand::Both), vec![bow(), dagger]);
        assert_eq!(arms.range(Hand::Main), 6);
        assert_eq!(arms.range(Hand::Both), 0);
        assert!(ArmsRequirement::DualWield.is_met_by(&arms));

        let single = Arms::TwoHanded { weapon: bow() };
        assert_eq!(single.swings(Hand::Off), vec![bow()]);
        assert_eq!(single.swings(Hand::Both), vec![bow()]);
    }
}
