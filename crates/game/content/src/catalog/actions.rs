//! Standard actions.

use skirmish_core::{
    ActionCategory, ActionDef, ActionEffect, ArmsRequirement, Attribute, ClassSet, DiceExpr,
    Effect, Hand, Movement, TargetType,
};

fn weapon(name: &str, target: TargetType, effect: ActionEffect) -> ActionDef {
    ActionDef::new(name, target, effect).category(ActionCategory::Weapon)
}

fn spell(name: &str, target: TargetType, effect: ActionEffect) -> ActionDef {
    ActionDef::new(name, target, effect).category(ActionCategory::Spell)
}

fn save(damage: DiceExpr, save: Attribute, on_hit: Vec<Effect>) -> ActionEffect {
    ActionEffect::SpellAttack {
        damage,
        save,
        dc_bonus: 0,
        on_hit,
    }
}

/// The standard catalog, in decision order.
pub fn standard_actions() -> Vec<ActionDef> {
    vec![
        // ===== weapon =====
        weapon("Strike", TargetType::Enemy, ActionEffect::weapon_attack())
            .movement(Movement::normal(2)),
        weapon(
            "Power Attack",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: -2,
                damage_multiplier: 2,
                damage_bonus: 0,
                on_hit: Vec::new(),
            },
        )
        .movement(Movement::normal(1))
        .arms(ArmsRequirement::Melee)
        .classes(ClassSet::MARTIAL)
        .cost(1),
        weapon("Shoot", TargetType::Enemy, ActionEffect::weapon_attack())
            .movement(Movement::normal(1))
            .arms(ArmsRequirement::Ranged),
        weapon(
            "Shield Bash",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: 0,
                damage_multiplier: 1,
                damage_bonus: -1,
                on_hit: vec![Effect::prone()],
            },
        )
        .movement(Movement::normal(1))
        .arms(ArmsRequirement::Shield)
        .classes(ClassSet::MARTIAL | ClassSet::CLERIC)
        .cost(1),
        weapon(
            "Flurry",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Both,
                attack_bonus: 0,
                damage_multiplier: 1,
                damage_bonus: 0,
                on_hit: Vec::new(),
            },
        )
        .movement(Movement::normal(1))
        .arms(ArmsRequirement::DualWield)
        .classes(ClassSet::MARTIAL)
        .cost(1),
        weapon(
            "Disarming Strike",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: -2,
                damage_multiplier: 1,
                damage_bonus: 0,
                on_hit: vec![Effect::disarmed(1)],
            },
        )
        .movement(Movement::normal(1))
        .arms(ArmsRequirement::Armed)
        .classes(ClassSet::FIGHTER | ClassSet::ROGUE)
        .cost(1),
        weapon(
            "Cleave",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: -1,
                damage_multiplier: 1,
                damage_bonus: 2,
                on_hit: Vec::new(),
            },
        )
        .movement(Movement::normal(1))
        .arms(ArmsRequirement::TwoHanded)
        .classes(ClassSet::MARTIAL)
        .cost(1),
        // ===== maneuvers =====
        ActionDef::new("Dash", TargetType::SelfOnly, ActionEffect::Idle)
            .movement(Movement::normal(4)),
        ActionDef::new("Vault", TargetType::SelfOnly, ActionEffect::Idle)
            .movement(Movement::special(2))
            .classes(ClassSet::ROGUE | ClassSet::RANGER),
        ActionDef::new(
            "Second Wind",
            TargetType::SelfOnly,
            ActionEffect::Heal {
                amount: DiceExpr::new(1, 10, 1),
            },
        )
        .classes(ClassSet::FIGHTER)
        .cost(1),
        ActionDef::new(
            "Meditate",
            TargetType::SelfOnly,
            ActionEffect::Restore {
                amount: DiceExpr::new(1, 4, 0),
            },
        )
        .classes(ClassSet::CASTERS),
        // ===== offensive spells =====
        spell(
            "Firebolt",
            TargetType::Enemy,
            save(DiceExpr::new(2, 6, 0), Attribute::Dexterity, Vec::new()),
        )
        .movement(Movement::normal(1))
        .classes(ClassSet::WIZARD)
        .range(3)
        .cost(1),
        spell(
            "Frost Ray",
            TargetType::Enemy,
            save(
                DiceExpr::new(1, 6, 0),
                Attribute::Constitution,
                vec![Effect::slowed(2)],
            ),
        )
        .movement(Movement::normal(1))
        .classes(ClassSet::WIZARD)
        .range(3)
        .cost(1),
        spell(
            "Entangle",
            TargetType::EnemiesAtNode,
            save(DiceExpr::flat(0), Attribute::Strength, vec![Effect::entangled(2)]),
        )
        .classes(ClassSet::WIZARD | ClassSet::RANGER)
        .range(2)
        .cost(2),
        spell(
            "Poison Spray",
            TargetType::Enemy,
            save(
                DiceExpr::new(1, 4, 0),
                Attribute::Constitution,
                vec![Effect::poisoned(3, DiceExpr::new(1, 4, 0))],
            ),
        )
        .classes(ClassSet::CASTERS)
        .range(1)
        .cost(1),
        spell(
            "Hold Person",
            TargetType::Enemy,
            save(DiceExpr::flat(0), Attribute::Wisdom, vec![Effect::held(1)]),
        )
        .classes(ClassSet::CASTERS)
        .range(2)
        .cost(2),
        spell(
            "Silence",
            TargetType::TwoEnemies,
            save(DiceExpr::flat(0), Attribute::Wisdom, vec![Effect::silenced(2)]),
        )
        .classes(ClassSet::CLERIC)
        .range(2)
        .cost(2),
        // ===== support spells =====
        spell(
            "Heal",
            TargetType::Ally,
            ActionEffect::Heal {
                amount: DiceExpr::new(2, 4, 2),
            },
        )
        .movement(Movement::normal(1))
        .classes(ClassSet::CLERIC)
        .range(1)
        .cost(1),
        spell(
            "Mass Heal",
            TargetType::AlliesAtNode,
            ActionEffect::Heal {
                amount: DiceExpr::new(1, 4, 1),
            },
        )
        .classes(ClassSet::CLERIC)
        .range(1)
        .cost(3),
        spell(
            "Regenerate",
            TargetType::Ally,
            ActionEffect::Bestow {
                effects: vec![Effect::regenerating(3, DiceExpr::new(1, 4, 0))],
            },
        )
        .classes(ClassSet::CLERIC)
        .range(1)
        .cost(2),
        spell(
            "Haste",
            TargetType::Ally,
            ActionEffect::Bestow {
                effects: vec![Effect::hasted(2)],
            },
        )
        .classes(ClassSet::WIZARD)
        .range(1)
        .cost(2),
    ]
}
