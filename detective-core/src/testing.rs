//! Testing utilities for Detective Quest.
//!
//! This module provides tools for integration testing:
//! - `TestHarness` for scripted playthroughs on small custom mansions
//! - `MansionBuilder` for describing those mansions inline
//! - Assertion helpers for verifying game state

use crate::clues::DuplicatePolicy;
use crate::judge::AccusationResult;
use crate::navigator::{LeafPolicy, StepOutcome};
use crate::scenario::{ClueRule, ClueRules, Scenario};
use crate::session::{GameSession, SessionConfig, SessionError};
use crate::world::RoomSpec;

/// Builds a throwaway scenario for tests.
#[derive(Debug, Clone, Default)]
pub struct MansionBuilder {
    rooms: Vec<RoomSpec>,
    rules: Vec<ClueRule>,
    roster: Vec<String>,
    duplicates: DuplicatePolicy,
    leaf_policy: LeafPolicy,
}

impl MansionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a room. The first room added is the entrance.
    pub fn room(mut self, room: RoomSpec) -> Self {
        self.rooms.push(room);
        self
    }

    /// Link a clue to an actor and add the actor to the roster.
    pub fn rule(mut self, clue: &str, actor: &str) -> Self {
        self.rules.push(ClueRule::new(clue, actor));
        if !self.roster.iter().any(|a| a == actor) {
            self.roster.push(actor.to_string());
        }
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn leaf_policy(mut self, policy: LeafPolicy) -> Self {
        self.leaf_policy = policy;
        self
    }

    pub fn build(self) -> Scenario {
        Scenario {
            name: "test mansion".to_string(),
            intro: String::new(),
            rooms: self.rooms,
            rules: ClueRules::new(self.rules),
            roster: self.roster,
            duplicates: self.duplicates,
            leaf_policy: self.leaf_policy,
            buckets: crate::index::DEFAULT_BUCKETS,
        }
    }
}

/// Test harness for running game scenarios.
pub struct TestHarness {
    /// The session under test.
    pub session: GameSession,
    /// Every outcome produced so far.
    pub outcomes: Vec<StepOutcome>,
}

impl TestHarness {
    /// Create a new test harness on the full mansion.
    pub fn new() -> Self {
        Self::with_scenario(Scenario::mansion()).expect("built-in mansion is a valid tree")
    }

    /// Create a test harness on a custom scenario.
    pub fn with_scenario(scenario: Scenario) -> Result<Self, SessionError> {
        let session = GameSession::new(SessionConfig::new(scenario))?;
        Ok(Self {
            session,
            outcomes: Vec::new(),
        })
    }

    /// Send one input and record the outcome.
    pub fn input(&mut self, text: &str) -> StepOutcome {
        let outcome = self.session.command(text);
        self.outcomes.push(outcome.clone());
        outcome
    }

    /// Send a whitespace-separated script of inputs, e.g. `"e d s"`.
    pub fn script(&mut self, script: &str) -> &mut Self {
        for input in script.split_whitespace() {
            self.input(input);
        }
        self
    }

    /// Get the current room name.
    pub fn room(&self) -> Option<&str> {
        self.session.current_room()
    }

    /// Collected clues in order.
    pub fn clues(&self) -> Vec<&str> {
        self.session.collected_clues()
    }

    pub fn accuse(&self, actor: &str) -> AccusationResult {
        self.session.accuse(actor)
    }

    /// Get the last outcome.
    pub fn last_outcome(&self) -> Option<&StepOutcome> {
        self.outcomes.last()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert the player is in the named room.
#[track_caller]
pub fn assert_in_room(harness: &TestHarness, name: &str) {
    assert_eq!(
        harness.room(),
        Some(name),
        "Expected to be in '{name}', got {:?}",
        harness.room()
    );
}

/// Assert exploration is over.
#[track_caller]
pub fn assert_exited(harness: &TestHarness) {
    assert!(harness.session.is_over(), "Expected exploration to be over");
}

/// Assert the collected clues, in order.
#[track_caller]
pub fn assert_clues(harness: &TestHarness, expected: &[&str]) {
    let actual = harness.clues();
    assert_eq!(actual, expected, "Expected clues {expected:?}, got {actual:?}");
}

/// Assert the number of clues against an actor and the verdict.
#[track_caller]
pub fn assert_verdict(harness: &TestHarness, actor: &str, count: usize, convicted: bool) {
    let result = harness.accuse(actor);
    assert_eq!(
        (result.count, result.convicted),
        (count, convicted),
        "Expected {count} clues (convicted: {convicted}) against '{actor}', got {result}"
    );
}
