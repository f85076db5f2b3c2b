use skirmish_core::{
    ActionCategory, ActionDef, ActionEffect, Allegiance, Arms, Attribute, Battleground,
    Character, CharacterClass, CharacterId, ClassSet, CombatConfig, CombatEnv, CombatError,
    DiceExpr, Effect, Encounter, EncounterError, ErrorSeverity, Event, Hand, NodeId, Outcome,
    SeededDice, Side, TargetType, Weapon, WeaponReach,
};

fn two_nodes() -> Battleground {
    Battleground::builder()
        .node(0, 2)
        .node(1, 2)
        .road(0, 1, 1)
        .mutual_sight(0, 1, 1)
        .build()
        .unwrap()
}

fn spear() -> Weapon {
    Weapon {
        name: "Spear".to_string(),
        damage: DiceExpr::new(1, 6, 0),
        attribute: Attribute::Strength,
        reach: WeaponReach::Melee,
        range: 1,
        bonus: 0,
    }
}

fn champion() -> Character {
    Character::builder("Champion", CharacterClass::Fighter)
        .arms(Arms::TwoHanded { weapon: spear() })
        .build()
}

fn apprentice() -> Character {
    Character::builder("Apprentice", CharacterClass::Wizard).build()
}

fn catalog() -> Vec<ActionDef> {
    vec![
        ActionDef::new("Wait", TargetType::SelfOnly, ActionEffect::Idle),
        ActionDef::new(
            "Execute",
            TargetType::Enemy,
            ActionEffect::WeaponAttack {
                hand: Hand::Main,
                attack_bonus: 100,
                damage_multiplier: 1,
                damage_bonus: 100,
                on_hit: Vec::new(),
            },
        )
        .category(ActionCategory::Weapon)
        .classes(ClassSet::FIGHTER),
    ]
}

#[test]
fn guaranteed_hit_wins_in_one_round() {
    let ground = two_nodes();
    let actions = catalog();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&ground, &actions, &config);

    let encounter = Encounter::new(
        env,
        Side::new(NodeId(0), [champion()]),
        Side::new(NodeId(1), [apprentice()]),
    )
    .unwrap();
    let report = encounter.run(&mut SeededDice::new(42));

    assert_eq!(report.outcome, Outcome::Victory(Allegiance::Attacker));
    assert_eq!(report.rounds.len(), 1);

    let defender = report.roster.get(CharacterId(1)).unwrap();
    assert!(defender.is_dying());
    assert_eq!(defender.current_hit_points(), 0);

    let attack = report.rounds[0]
        .turns
        .iter()
        .find(|t| t.actor == CharacterId(0))
        .unwrap();
    assert_eq!(attack.action, "Execute");
    assert!(attack.events.iter().any(|e| matches!(
        e,
        Event::WeaponAttack { hit: true, .. }
    )));
}

#[test]
fn pre_decided_encounter_plays_no_turns() {
    let ground = two_nodes();
    let actions = catalog();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&ground, &actions, &config);

    let mut encounter = Encounter::new(
        env,
        Side::new(NodeId(0), [champion()]),
        Side::new(NodeId(1), [apprentice(), apprentice()]),
    )
    .unwrap();
    for id in [CharacterId(1), CharacterId(2)] {
        let mut state = encounter.roster().get(id).unwrap().clone();
        state.effects = state.effects.add(Effect::dying());
        encounter.roster_mut().replace(state);
    }

    let report = encounter.run(&mut SeededDice::new(1));
    assert_eq!(report.outcome, Outcome::Victory(Allegiance::Attacker));
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.turn_count(), 0);
}

#[test]
fn same_seed_same_replay() {
    let ground = two_nodes();
    let actions = catalog();
    let config = CombatConfig::default();

    let run = |seed| {
        let env = CombatEnv::new(&ground, &actions, &config);
        Encounter::new(
            env,
            Side::new(NodeId(0), [champion(), apprentice()]),
            Side::new(NodeId(1), [champion()]),
        )
        .unwrap()
        .run(&mut SeededDice::new(seed))
    };

    let first = run(9);
    let second = run(9);
    assert_eq!(first, second);

    #[cfg(feature = "serde")]
    {
        let digest = hex::encode(first.fingerprint().unwrap());
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hex::encode(second.fingerprint().unwrap()));
    }
}

#[test]
fn mutual_wipe_is_a_draw() {
    let ground = two_nodes();
    let actions = vec![
        ActionDef::new(
            "Cataclysm",
            TargetType::EveryoneAtNode,
            ActionEffect::SpellAttack {
                damage: DiceExpr::flat(100),
                save: Attribute::Dexterity,
                dc_bonus: 100,
                on_hit: Vec::new(),
            },
        )
        .category(ActionCategory::Spell),
    ];
    let config = CombatConfig::default();
    let env = CombatEnv::new(&ground, &actions, &config);

    let report = Encounter::new(
        env,
        Side::new(NodeId(0), [apprentice()]),
        Side::new(NodeId(0), [apprentice()]),
    )
    .unwrap()
    .run(&mut SeededDice::new(3));

    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(report.rounds.len(), 1);
    assert_eq!(report.turn_count(), 1);
    assert!(report.roster.iter().all(|state| state.is_dying()));
}

#[test]
fn idle_sides_time_out_at_the_cap() {
    let ground = two_nodes();
    let actions = vec![ActionDef::new("Wait", TargetType::SelfOnly, ActionEffect::Idle)];
    let config = CombatConfig::with_round_cap(3);
    let env = CombatEnv::new(&ground, &actions, &config);

    let report = Encounter::new(
        env,
        Side::new(NodeId(0), [apprentice()]),
        Side::new(NodeId(1), [apprentice()]),
    )
    .unwrap()
    .run(&mut SeededDice::new(5));

    assert_eq!(report.outcome, Outcome::Timeout);
    assert_eq!(report.rounds.len(), 3);
    assert_eq!(report.turn_count(), 6);
}

#[test]
fn round_without_candidates_stalls() {
    let ground = two_nodes();
    let actions = vec![
        ActionDef::new("Ritual", TargetType::SelfOnly, ActionEffect::Idle).cost(1_000),
    ];
    let config = CombatConfig::default();
    let env = CombatEnv::new(&ground, &actions, &config);

    let report = Encounter::new(
        env,
        Side::new(NodeId(0), [apprentice()]),
        Side::new(NodeId(1), [apprentice()]),
    )
    .unwrap()
    .run(&mut SeededDice::new(5));

    assert_eq!(report.outcome, Outcome::Stalemate);
    assert_eq!(report.rounds.len(), 1);
    let turns = &report.rounds[0].turns;
    assert_eq!(turns.len(), 1);
    assert!(turns[0].is_degenerate());
    assert_eq!(turns[0].action, "No Action");
}

#[test]
fn setup_errors_fail_fast() {
    let ground = two_nodes();
    let actions = catalog();
    let config = CombatConfig::default();
    let env = CombatEnv::new(&ground, &actions, &config);

    let unknown = Encounter::new(
        env,
        Side::new(NodeId(7), [champion()]),
        Side::new(NodeId(1), [apprentice()]),
    )
    .unwrap_err();
    assert_eq!(
        unknown,
        EncounterError::UnknownStartNode {
            side: Allegiance::Attacker,
            node: NodeId(7),
        }
    );
    assert_eq!(unknown.severity(), ErrorSeverity::Fatal);

    let empty = Encounter::new(
        env,
        Side::new(NodeId(0), [champion()]),
        Side::new(NodeId(1), Vec::new()),
    )
    .unwrap_err();
    assert_eq!(empty, EncounterError::EmptySide(Allegiance::Defender));
    assert!(empty.severity().is_validation());

    let crowded = Encounter::new(
        env,
        Side::new(NodeId(0), [champion(), champion()]),
        Side::new(NodeId(0), [apprentice()]),
    )
    .unwrap_err();
    assert_eq!(crowded.error_code(), "ENCOUNTER_OVERCROWDED");
}
