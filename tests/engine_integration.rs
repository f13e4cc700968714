//! Engine integration tests: movement, battle groups and battle
//! resolution through the world facade.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexfront::core::config::EngineConfig;
use hexfront::core::error::EngineError;
use hexfront::core::types::{BattleGroupId, Faction, ForceId, UnitTypeId};
use hexfront::engine::battle::{predict_assault, resolve_assault, BattleOutcome};
use hexfront::engine::movement::{execute_movement, plan_movement};
use hexfront::forces::force::{Force, ForceComposition};
use hexfront::forces::unit_type::{UnitCatalog, UnitCategory, UnitType};
use hexfront::log::LogRecord;
use hexfront::map::grid::{HexCell, HexGrid};
use hexfront::map::hex::HexCoord;
use hexfront::map::terrain::Terrain;
use hexfront::world::WorldState;

fn rifle_catalog() -> UnitCatalog {
    let mut catalog = UnitCatalog::new();
    catalog.insert(UnitType::new(
        UnitTypeId(1),
        "Rifle Battalion",
        UnitCategory::Infantry,
        10.0,
    ));
    catalog
}

fn flat_world(rows: i32, cols: i32) -> WorldState {
    let mut grid = HexGrid::new();
    for row in 0..rows {
        for col in 0..cols {
            grid.insert(HexCell::new(HexCoord::new(row, col), Terrain::Plain));
        }
    }
    WorldState::new(grid, rifle_catalog())
}

#[test]
fn assault_end_to_end() {
    let mut world = flat_world(6, 6);

    // 500 base power at 80 morale and 0.1 fatigue: 500 * 0.8 * 0.9 = 360.
    world.insert_force(
        Force::new(ForceId(1), "Attacker", Faction(1), HexCoord::new(0, 0))
            .with_morale(80.0)
            .with_fatigue(0.1),
    );
    world
        .set_composition(ForceId(1), vec![ForceComposition::new(UnitTypeId(1), 50)])
        .unwrap();

    world.insert_force(Force::new(ForceId(2), "Defender", Faction(2), HexCoord::new(1, 0)));
    world
        .set_composition(ForceId(2), vec![ForceComposition::new(UnitTypeId(1), 10)])
        .unwrap();

    let breakdown = world.force_power(ForceId(1)).unwrap();
    assert!((breakdown.final_power - 360.0).abs() < 1e-9);

    let config = EngineConfig::default();
    let prediction = predict_assault(&world, ForceId(1), HexCoord::new(1, 0), &config).unwrap();
    assert_eq!(prediction.outcome, BattleOutcome::DecisiveVictory);
    assert!((prediction.final_ratio - 3.6).abs() < 1e-9);
    assert_eq!(prediction.attacker_base_rate, 0.05);
    assert_eq!(prediction.defender_base_rate, 0.5);

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let report = resolve_assault(&world, ForceId(1), HexCoord::new(1, 0), &config, &mut rng).unwrap();
    assert_eq!(report.outcome, BattleOutcome::DecisiveVictory);

    world.apply_battle(&report).unwrap();

    // Attacker loss rate is 0.05 +/- 0.05 clamped below at 0.01.
    let attacker = world.force(ForceId(1)).unwrap();
    assert!(attacker.troop_strength >= 900.0);
    assert!(attacker.troop_strength <= 990.0);
    assert_eq!(attacker.remaining_combat_times, 0);

    // Defender loss rate is 0.5 +/- 0.05.
    let defender = world.force(ForceId(2)).unwrap();
    assert!(defender.troop_strength >= 450.0);
    assert!(defender.troop_strength <= 550.0);
    assert_eq!(defender.remaining_combat_times, 0);

    assert_eq!(world.logs().len(), 1);
    match &world.logs()[0] {
        LogRecord::Battle(record) => {
            assert_eq!(record.outcome, BattleOutcome::DecisiveVictory);
            assert_eq!(record.attackers, vec![ForceId(1)]);
            assert_eq!(record.defenders, vec![ForceId(2)]);
        }
        other => panic!("expected a battle record, got {other:?}"),
    }
}

#[test]
fn spent_forces_cannot_attack_again() {
    let mut world = flat_world(6, 6);
    world.insert_force(Force::new(ForceId(1), "Attacker", Faction(1), HexCoord::new(0, 0)));
    world
        .set_composition(ForceId(1), vec![ForceComposition::new(UnitTypeId(1), 50)])
        .unwrap();
    world.insert_force(Force::new(ForceId(2), "Defender", Faction(2), HexCoord::new(1, 0)));
    world
        .set_composition(ForceId(2), vec![ForceComposition::new(UnitTypeId(1), 10)])
        .unwrap();

    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let report =
        resolve_assault(&world, ForceId(1), HexCoord::new(1, 0), &config, &mut rng).unwrap();
    world.apply_battle(&report).unwrap();

    let err = resolve_assault(&world, ForceId(1), HexCoord::new(1, 0), &config, &mut rng)
        .unwrap_err();
    assert_eq!(err, EngineError::NoCombatCapacity);
}

#[test]
fn march_then_strike() {
    let mut world = flat_world(6, 6);
    world.insert_force(
        Force::new(ForceId(1), "Column", Faction(1), HexCoord::new(0, 0)).with_action_points(6),
    );
    world
        .set_composition(ForceId(1), vec![ForceComposition::new(UnitTypeId(1), 50)])
        .unwrap();
    world.insert_force(Force::new(ForceId(2), "Picket", Faction(2), HexCoord::new(3, 0)));
    world
        .set_composition(ForceId(2), vec![ForceComposition::new(UnitTypeId(1), 10)])
        .unwrap();

    // Two plain steps cost 1 each.
    let path = vec![HexCoord::new(0, 0), HexCoord::new(1, 0), HexCoord::new(2, 0)];
    let force = world.force(ForceId(1)).unwrap();
    let plan = plan_movement(&world.grid, force, &path).unwrap();
    assert!(!plan.truncated);
    assert_eq!(plan.cost, 2);

    let proposal = execute_movement(&world.grid, force, &plan.path).unwrap();
    world.apply_movement(&proposal).unwrap();

    let force = world.force(ForceId(1)).unwrap();
    assert_eq!(force.position, HexCoord::new(2, 0));
    assert_eq!(force.action_points, 4);

    let config = EngineConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let report =
        resolve_assault(&world, ForceId(1), HexCoord::new(3, 0), &config, &mut rng).unwrap();
    world.apply_battle(&report).unwrap();

    assert_eq!(world.logs().len(), 2);
    assert!(matches!(world.logs()[0], LogRecord::Movement(_)));
    assert!(matches!(world.logs()[1], LogRecord::Battle(_)));
}

#[test]
fn terrain_shields_the_defender() {
    let mut world = flat_world(6, 6);
    // Defender dug into mountains: 0.7 ratio modifier.
    if let Some(cell) = world.grid.get_mut(&HexCoord::new(1, 0)) {
        cell.terrain = Terrain::Mountain;
    }
    world.insert_force(Force::new(ForceId(1), "Attacker", Faction(1), HexCoord::new(0, 0)));
    world
        .set_composition(ForceId(1), vec![ForceComposition::new(UnitTypeId(1), 20)])
        .unwrap();
    world.insert_force(Force::new(ForceId(2), "Defender", Faction(2), HexCoord::new(1, 0)));
    world
        .set_composition(ForceId(2), vec![ForceComposition::new(UnitTypeId(1), 10)])
        .unwrap();

    let config = EngineConfig::default();
    let prediction = predict_assault(&world, ForceId(1), HexCoord::new(1, 0), &config).unwrap();
    // Raw ratio 2.0 becomes 1.4 in the mountains: down a tier.
    assert!((prediction.final_ratio - 1.4).abs() < 1e-9);
    assert_eq!(prediction.outcome, BattleOutcome::Draw);
}

#[test]
fn group_survives_a_failed_commander_removal() {
    let mut world = flat_world(6, 6);
    let fp = hexfront::forces::firepower::Firepower::new(12.0, 0.0, 0.0, 0.0);
    world.insert_force(
        Force::new(ForceId(1), "Lead", Faction(1), HexCoord::new(0, 0)).with_firepower(fp, fp),
    );
    world.insert_force(
        Force::new(ForceId(2), "Wing", Faction(1), HexCoord::new(0, 1)).with_firepower(fp, fp),
    );
    world
        .create_group(
            BattleGroupId(1),
            Faction(1),
            ForceId(1),
            vec![ForceId(1), ForceId(2)],
        )
        .unwrap();
    assert_eq!(world.group(BattleGroupId(1)).unwrap().joint_attack.infantry, 24.0);

    let err = world.remove_from_group(BattleGroupId(1), ForceId(1)).unwrap_err();
    assert_eq!(err, EngineError::CommanderRemoval(ForceId(1)));

    // Membership and joint firepower are untouched by the rejection.
    let group = world.group(BattleGroupId(1)).unwrap();
    assert_eq!(group.members.len(), 2);
    assert_eq!(group.joint_attack.infantry, 24.0);

    // Handing off command first makes the removal legal.
    world.set_group_commander(BattleGroupId(1), ForceId(2)).unwrap();
    world.remove_from_group(BattleGroupId(1), ForceId(1)).unwrap();
    let group = world.group(BattleGroupId(1)).unwrap();
    assert_eq!(group.members, vec![ForceId(2)]);
    assert_eq!(group.joint_attack.infantry, 12.0);
}
