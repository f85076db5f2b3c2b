//! Character classes and class restriction sets.

use bitflags::bitflags;

use super::{ArmorWeight, Attribute};

/// Character class.
///
/// The class fixes the hit die, the base resource pool, the attribute used
/// for spell difficulty classes and the heaviest armor worn with proficiency.
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
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CharacterClass {
    Fighter,
    Rogue,
    Ranger,
    Wizard,
    Cleric,
}

impl CharacterClass {
    pub const fn hit_die(self) -> u32 {
        match self {
            Self::Fighter | Self::Ranger => 10,
            Self::Rogue | Self::Cleric => 8,
            Self::Wizard => 6,
        }
    }

    pub const fn base_resources(self) -> u32 {
        match self {
            Self::Fighter => 2,
            Self::Rogue | Self::Ranger => 3,
            Self::Cleric => 5,
            Self::Wizard => 6,
        }
    }

    pub const fn casting_attribute(self) -> Attribute {
        match self {
            Self::Fighter => Attribute::Strength,
            Self::Rogue => Attribute::Dexterity,
            Self::Ranger | Self::Cleric => Attribute::Wisdom,
            Self::Wizard => Attribute::Intelligence,
        }
    }

    /// Heaviest armor this class wears with proficiency (`None`: no armor).
    pub const fn armor_proficiency(self) -> Option<ArmorWeight> {
        match self {
            Self::Fighter => Some(ArmorWeight::Heavy),
            Self::Ranger | Self::Cleric => Some(ArmorWeight::Medium),
            Self::Rogue => Some(ArmorWeight::Light),
            Self::Wizard => None,
        }
    }

    pub fn is_proficient_with(self, weight: ArmorWeight) -> bool {
        self.armor_proficiency().is_some_and(|max| weight <= max)
    }
}

bitflags! {
    /// Set of classes allowed to use an action.
    ///
    /// Human-readable formats write the flag names, e.g. `"WIZARD | CLERIC"`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ClassSet: u8 {
        const FIGHTER = 1 << 0;
        const ROGUE   = 1 << 1;
        const RANGER  = 1 << 2;
        const WIZARD  = 1 << 3;
        const CLERIC  = 1 << 4;

        const MARTIAL = Self::FIGHTER.bits() | Self::ROGUE.bits() | Self::RANGER.bits();
        const CASTERS = Self::WIZARD.bits() | Self::CLERIC.bits();
    }
}

impl ClassSet {
    pub const fn of(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Fighter => Self::FIGHTER,
            CharacterClass::Rogue => Self::ROGUE,
            CharacterClass::Ranger => Self::RANGER,
            CharacterClass::Wizard => Self::WIZARD,
            CharacterClass::Cleric => Self::CLERIC,
        }
    }

    pub fn allows(&self, class: CharacterClass) -> bool {
        self.contains(Self::of(class))
    }
}

impl Default for ClassSet {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClassSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClassSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_class_has_a_flag() {
        for class in CharacterClass::iter() {
            assert!(ClassSet::all().allows(class));
            assert_eq!(ClassSet::of(class).bits().count_ones(), 1);
        }
        assert!(ClassSet::CASTERS.allows(CharacterClass::Cleric));
        assert!(!ClassSet::MARTIAL.allows(CharacterClass::Wizard));
    }

    #[test]
    fn armor_proficiency_is_a_ceiling() {
        assert!(CharacterClass::Fighter.is_proficient_with(ArmorWeight::Heavy));
        assert!(CharacterClass::Cleric.is_proficient_with(ArmorWeight::Light));
        assert!(!CharacterClass::Rogue.is_proficient_with(ArmorWeight::Medium));
        assert!(!CharacterClass::Wizard.is_proficient_with(ArmorWeight::Light));
    }

    #[test]
    fn parses_class_names() {
        assert_eq!("wizard".parse(), Ok(CharacterClass::Wizard));
        assert_eq!("Cleric".parse(), Ok(CharacterClass::Cleric));
    }
}
