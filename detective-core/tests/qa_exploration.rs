//! QA tests for walking the mansion using the headless API.
//!
//! These tests verify exploration works end to end:
//! - Movement and dead ends
//! - Clue collection and ordering
//! - Leaving the mansion
//! - The three built-in scenarios and scenario files
//!
//! Run with: `cargo test -p detective-core --test qa_exploration`

use detective_core::headless::{HeadlessConfig, HeadlessGame, ScenarioSource};
use detective_core::testing::{assert_clues, assert_exited, assert_in_room, MansionBuilder, TestHarness};
use detective_core::{Direction, DuplicatePolicy, LeafPolicy, RoomSpec, Scenario, StepOutcome};
use tempfile::TempDir;

// =============================================================================
// MOVEMENT
// =============================================================================

#[test]
fn test_walk_to_the_pantry() {
    let mut harness = TestHarness::new();
    harness.script("e d e");
    assert_in_room(&harness, "Despensa");
    assert_clues(
        &harness,
        &["Cigarro estranho", "Faca suja", "Pegada de lama", "Pegada de sapato"],
    );
}

#[test]
fn test_dead_end_reports_no_path() {
    let mut harness = TestHarness::new();
    harness.script("e d e");

    assert_eq!(harness.input("e"), StepOutcome::NoPath(Direction::Left));
    assert_eq!(harness.input("d"), StepOutcome::NoPath(Direction::Right));
    assert_in_room(&harness, "Despensa");
    assert_eq!(harness.clues().len(), 4);
}

#[test]
fn test_invalid_choices_reprompt() {
    let mut harness = TestHarness::new();
    for input in ["E", "esquerda", "x", "S"] {
        assert!(matches!(harness.input(input), StepOutcome::Invalid(_)));
    }
    assert_in_room(&harness, "Hall de Entrada");
    assert!(!harness.session.is_over());
}

#[test]
fn test_long_command_names() {
    let mut harness = TestHarness::new();
    harness.script("left right exit");
    assert_exited(&harness);
    assert_clues(&harness, &["Cigarro estranho", "Faca suja", "Pegada de lama"]);
}

// =============================================================================
// EXIT
// =============================================================================

#[test]
fn test_exit_from_any_room() {
    for script in ["s", "e s", "d d s", "e e d s"] {
        let mut harness = TestHarness::new();
        harness.script(script);
        assert_exited(&harness);
        assert_eq!(harness.room(), None);

        let collected = harness.clues().len();
        assert_eq!(harness.input("e"), StepOutcome::AlreadyExited);
        assert_eq!(harness.input("s"), StepOutcome::AlreadyExited);
        assert_eq!(harness.input("zzz"), StepOutcome::AlreadyExited);
        assert_eq!(harness.clues().len(), collected);
    }
}

#[test]
fn test_leaf_is_not_terminal_in_mansion() {
    let mut game = HeadlessGame::new(HeadlessConfig::preset("mansion")).unwrap();
    let outcomes = game.send_all(["d", "d"]);
    let StepOutcome::Moved(arrival) = &outcomes[1] else {
        panic!("expected to reach the office");
    };
    assert_eq!(arrival.room_name, "Escritório");
    assert!(!arrival.dead_end);
    assert!(!game.is_over());
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_basic_scenario_ends_at_dead_end() {
    let mut game = HeadlessGame::new(HeadlessConfig::preset("basic")).unwrap();
    game.send("e");
    let outcome = game.send("d");

    assert!(outcome.is_terminal());
    assert!(game.is_over());
    assert!(game.clues().is_empty());
    assert!(game.roster().is_empty());
    assert_eq!(game.rooms_visited(), vec!["Hall de Entrada", "Sala de Estar", "Jardim"]);
}

#[test]
fn test_adventurer_scenario_skips_empty_rooms() {
    let mut game = HeadlessGame::new(HeadlessConfig::preset("adventurer")).unwrap();
    let StepOutcome::Moved(kitchen) = game.send_all(["e", "e"]).pop().unwrap() else {
        panic!("expected to reach the kitchen");
    };
    assert_eq!(kitchen.room_name, "Cozinha");
    assert_eq!(kitchen.discovery, None);

    assert_eq!(
        game.clues(),
        vec![
            "Bilhete rasgado: 'O culpado esta proximo'.",
            "Chave encontrada no tapete.",
        ]
    );
}

#[test]
fn test_policy_override_from_config() {
    let config = HeadlessConfig::preset("mansion").with_leaf_policy(LeafPolicy::AutoTerminal);
    let mut game = HeadlessGame::new(config).unwrap();
    game.send_all(["d", "d", "s"]);
    assert!(game.is_over());
    // The exit was never sent; the office ended the game.
    assert_eq!(game.transcript().len(), 2);
}

#[test]
fn test_same_clue_in_two_rooms() {
    let rooms = || {
        MansionBuilder::new()
            .room(RoomSpec::new("Hall").with_clue("Ash").with_left("Den"))
            .room(RoomSpec::new("Den").with_clue("Ash"))
            .rule("Ash", "Smoker")
    };

    let mut dedup = TestHarness::with_scenario(rooms().build()).unwrap();
    let StepOutcome::Moved(arrival) = dedup.input("e") else {
        panic!("expected to reach the den");
    };
    assert!(!arrival.discovery.unwrap().newly_collected);
    assert_clues(&dedup, &["Ash"]);
    assert_eq!(dedup.accuse("Smoker").count, 1);

    let scenario = rooms().duplicates(DuplicatePolicy::AllowDuplicates).build();
    let mut counted = TestHarness::with_scenario(scenario).unwrap();
    counted.input("e");
    assert_clues(&counted, &["Ash", "Ash"]);
    assert_eq!(counted.accuse("Smoker").count, 2);
}

#[test]
fn test_scenario_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("shed.json");

    let scenario = MansionBuilder::new()
        .room(RoomSpec::new("Shed").with_clue("Rake").with_left("Loft"))
        .room(RoomSpec::new("Loft").with_clue("Seeds"))
        .rule("Rake", "Gardener")
        .rule("Seeds", "Gardener")
        .build();
    std::fs::write(&path, scenario.to_json().unwrap()).unwrap();

    let config = HeadlessConfig::from_file(&path);
    assert_eq!(config.source, ScenarioSource::File(path.clone()));

    let mut game = HeadlessGame::new(config).unwrap();
    game.send_all(["e", "s"]);
    assert_eq!(game.clues(), vec!["Rake", "Seeds"]);
    assert!(game.accuse("Gardener").convicted);

    assert_eq!(Scenario::load(&path).unwrap(), scenario);
}

#[test]
fn test_missing_scenario_file() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let result = HeadlessGame::new(HeadlessConfig::from_file(dir.path().join("nope.json")));
    assert!(result.is_err());
}
