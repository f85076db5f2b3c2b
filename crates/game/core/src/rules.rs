//! Stateless rules arithmetic: modifiers, armor class, difficulty classes
//! and derived pools.

use crate::character::{Attribute, Character};

/// Attribute modifier: `(score - 10) / 2`, truncated toward zero.
pub const fn attribute_modifier(score: i32) -> i32 {
    (score - 10) / 2
}

/// Level modifier: `level / 2`.
pub const fn level_modifier(level: u32) -> i32 {
    (level / 2) as i32
}

/// Armor class: 10 + armor + capped dexterity + shield.
///
/// Armor the class is not proficient with grants nothing.
pub fn armor_class(character: &Character) -> i32 {
    let dex = character.modifier(Attribute::Dexterity);
    let worn = character
        .inventory
        .armor
        .as_ref()
        .filter(|armor| character.class.is_proficient_with(armor.weight));

    let armor_part = match worn {
        Some(armor) => armor.base + armor.max_dex.map_or(dex, |cap| dex.min(cap)),
        None => dex,
    };

    10 + armor_part + character.inventory.arms.shield_bonus()
}

/// Spell difficulty class: 8 + casting modifier + level modifier + bonus.
pub fn spell_difficulty_class(character: &Character, dc_bonus: i32) -> i32 {
    8 + character.modifier(character.class.casting_attribute())
        + character.level_modifier()
        + dc_bonus
}

/// Flat initiative bonus, added to a d20.
pub fn initiative_bonus(character: &Character) -> i32 {
    character.modifier(Attribute::Dexterity) + character.level_modifier()
}

/// Maximum hit points.
///
/// `hit_die + con + (level - 1) * (hit_die / 2 + 1 + con)`, at least 1.
pub fn max_hit_points(character: &Character) -> u32 {
    let die = character.class.hit_die() as i32;
    let con = character.modifier(Attribute::Constitution);
    let levels = character.level.saturating_sub(1) as i32;
    let hp = die + con + levels * (die / 2 + 1 + con);
    hp.max(1) as u32
}

/// Maximum resources: class pool + level modifier.
pub fn max_resources(character: &Character) -> u32 {
    character.class.base_resources() + level_modifier(character.level) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{
        Armor, ArmorWeight, Arms, Attributes, CharacterClass, Shield, Weapon,
    };

    #[test]
    fn modifiers_truncate() {
        assert_eq!(attribute_modifier(10), 0);
        assert_eq!(attribute_modifier(18), 4);
        assert_eq!(attribute_modifier(7), -1);
        assert_eq!(level_modifier(1), 0);
        assert_eq!(level_modifier(5), 2);
    }

    #[test]
    fn armor_class_caps_dexterity() {
        let plate = Armor {
            name: "Plate".to_string(),
            weight: ArmorWeight::Heavy,
            base: 8,
            max_dex: Some(0),
        };
        let fighter = Character::builder("Bram", CharacterClass::Fighter)
            .attributes(Attributes::new(16, 14, 14, 10, 10, 10))
            .armor(plate.clone())
            .arms(Arms::OneHanded {
                weapon: Weapon::unarmed(),
                shield: Some(Shield {
                    name: "Kite".to_string(),
                    bonus: 2,
                }),
            })
            .build();
        assert_eq!(armor_class(&fighter), 20);

        // Wizards gain nothing from plate.
        let wizard = Character::builder("Ilse", CharacterClass::Wizard)
            .attributes(Attributes::new(8, 14, 10, 16, 10, 10))
            .armor(plate)
            .build();
        assert_eq!(armor_class(&wizard), 12);
    }

    #[test]
    fn hit_points_scale_with_level() {
        let fighter = Character::builder("Bram", CharacterClass::Fighter)
            .attributes(Attributes::new(16, 10, 14, 10, 10, 10))
            .level(3)
            .build();
        // 10 + 2 + 2 * (5 + 1 + 2)
        assert_eq!(max_hit_points(&fighter), 28);
        assert_eq!(max_resources(&fighter), 3);

        let frail = Character::builder("Pip", CharacterClass::Wizard)
            .attributes(Attributes::new(3, 3, 1, 3, 3, 3))
            .build();
        assert_eq!(max_hit_points(&frail), 2);
    }

    #[test]
    fn difficulty_class_uses_casting_attribute() {
        let cleric = Character::builder("Oda", CharacterClass::Cleric)
            .attributes(Attributes::new(10, 10, 10, 10, 16, 10))
            .level(4)
            .build();
        assert_eq!(spell_difficulty_class(&cleric, 1), 8 + 3 + 2 + 1);
    }
}
