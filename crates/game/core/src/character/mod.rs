//! Immutable character definitions.
//!
//! A [`Character`] never changes during an encounter; everything that does
//! change lives in [`crate::state::CharacterState`].
mod class;
mod equipment;

pub use class::{CharacterClass, ClassSet};
pub use equipment::{
    Armor, ArmorWeight, Arms, ArmsRequirement, Hand, Inventory, Shield, Weapon, WeaponReach,
};

use crate::rules;

/// One of the six attributes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

/// Attribute scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Attributes {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// All scores at 10 (every modifier 0).
    pub const fn average() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }

    pub const fn score(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Constitution => self.constitution,
            Attribute::Intelligence => self.intelligence,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub const fn modifier(&self, attribute: Attribute) -> i32 {
        rules::attribute_modifier(self.score(attribute))
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::average()
    }
}

/// Immutable character definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub attributes: Attributes,
    pub inventory: Inventory,
}

impl Character {
    pub fn new(
        name: impl Into<String>,
        class: CharacterClass,
        level: u32,
        attributes: Attributes,
        inventory: Inventory,
    ) -> Self {
        Self {
            name: name.into(),
            class,
            level: level.max(1),
            attributes,
            inventory,
        }
    }

    pub fn builder(name: impl Into<String>, class: CharacterClass) -> CharacterBuilder {
        CharacterBuilder::new(name, class)
    }

    pub fn modifier(&self, attribute: Attribute) -> i32 {
        self.attributes.modifier(attribute)
    }

    pub fn level_modifier(&self) -> i32 {
        rules::level_modifier(self.level)
    }

    pub fn max_hit_points(&self) -> u32 {
        rules::max_hit_points(self)
    }

    pub fn max_resources(&self) -> u32 {
        rules::max_resources(self)
    }

    pub fn armor_class(&self) -> i32 {
        rules::armor_class(self)
    }
}

/// Builder for [`Character`].
#[derive(Clone, Debug)]
pub struct CharacterBuilder {
    character: Character,
}

impl CharacterBuilder {
    pub fn new(name: impl Into<String>, class: CharacterClass) -> Self {
        Self {
            character: Character::new(name, class, 1, Attributes::average(), Inventory::default()),
        }
    }

    pub fn level(mut self, level: u32) -> Self {
        self.character.level = level.max(1);
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.character.attributes = attributes;
        self
    }

    pub fn armor(mut self, armor: Armor) -> Self {
        self.character.inventory.armor = Some(armor);
        self
    }

    pub fn arms(mut self, arms: Arms) -> Self {
        self.character.inventory.arms = arms;
        self
    }

    pub fn build(self) -> Character {
        self.character
    }
}
