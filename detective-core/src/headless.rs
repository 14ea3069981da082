//! Headless game interface for programmatic use.
//!
//! This module provides a simplified interface for running Detective Quest
//! without a terminal prompt. It's designed for:
//! - Automated testing of whole games
//! - Scripted playthroughs
//! - Drivers that render the narration themselves
//!
//! # Example
//!
//! ```
//! use detective_core::headless::{HeadlessConfig, HeadlessGame};
//!
//! let mut game = HeadlessGame::new(HeadlessConfig::preset("mansion")).unwrap();
//! game.send("d");
//! game.send("e");
//! game.send("s");
//!
//! let verdict = game.accuse("Jardineiro");
//! assert_eq!(verdict.count, 2);
//! assert!(verdict.convicted);
//! ```

use crate::clues::DuplicatePolicy;
use crate::judge::AccusationResult;
use crate::navigator::{LeafPolicy, StepOutcome};
use crate::scenario::Scenario;
use crate::session::{GameSession, SessionConfig, SessionError};
use std::path::PathBuf;

/// Where the scenario comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioSource {
    Preset(String),
    File(PathBuf),
}

/// Configuration for a headless game session.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    /// Scenario to load.
    pub source: ScenarioSource,
    /// Duplicate clue policy override.
    pub duplicates: Option<DuplicatePolicy>,
    /// Leaf policy override.
    pub leaf_policy: Option<LeafPolicy>,
    /// Bucket count override.
    pub buckets: Option<usize>,
}

impl HeadlessConfig {
    /// Use one of the built-in scenarios.
    pub fn preset(name: impl Into<String>) -> Self {
        Self {
            source: ScenarioSource::Preset(name.into()),
            duplicates: None,
            leaf_policy: None,
            buckets: None,
        }
    }

    /// Load the scenario from a JSON file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: ScenarioSource::File(path.into()),
            ..Self::preset("mansion")
        }
    }

    /// Set the duplicate clue policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = Some(policy);
        self
    }

    /// Set the leaf policy.
    pub fn with_leaf_policy(mut self, policy: LeafPolicy) -> Self {
        self.leaf_policy = Some(policy);
        self
    }

    /// Set the number of index buckets.
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = Some(buckets);
        self
    }

    /// Resolve the scenario and apply overrides.
    pub fn session_config(&self) -> Result<SessionConfig, SessionError> {
        let scenario = match &self.source {
            ScenarioSource::Preset(name) => Scenario::preset(name)?,
            ScenarioSource::File(path) => Scenario::load(path)?,
        };

        let mut config = SessionConfig::new(scenario);
        config.duplicates = self.duplicates;
        config.leaf_policy = self.leaf_policy;
        config.buckets = self.buckets;
        Ok(config)
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self::preset("mansion")
    }
}

/// An entry in the game transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Player input.
    pub player_input: String,
    /// What the navigator did with it.
    pub outcome: StepOutcome,
    /// Turn number.
    pub turn: usize,
}

/// A game that can be controlled programmatically.
///
/// This wraps `GameSession` and records every exchange.
pub struct HeadlessGame {
    session: GameSession,
    /// Transcript of all exchanges.
    transcript: Vec<TranscriptEntry>,
}

impl HeadlessGame {
    /// Create a new headless game with the given configuration.
    pub fn new(config: HeadlessConfig) -> Result<Self, SessionError> {
        let session = GameSession::new(config.session_config()?)?;
        Ok(Self::from_session(session))
    }

    /// Wrap an existing session.
    pub fn from_session(session: GameSession) -> Self {
        Self {
            session,
            transcript: Vec::new(),
        }
    }

    /// Send one line of player input.
    pub fn send(&mut self, input: &str) -> StepOutcome {
        let outcome = self.session.command(input);

        // Record in transcript
        self.transcript.push(TranscriptEntry {
            player_input: input.to_string(),
            outcome: outcome.clone(),
            turn: self.transcript.len() + 1,
        });

        outcome
    }

    /// Send several inputs, stopping early once exploration is over.
    pub fn send_all<'a>(&mut self, inputs: impl IntoIterator<Item = &'a str>) -> Vec<StepOutcome> {
        let mut outcomes = Vec::new();
        for input in inputs {
            if self.is_over() {
                break;
            }
            outcomes.push(self.send(input));
        }
        outcomes
    }

    /// Accuse an actor using the clues collected so far.
    pub fn accuse(&self, actor: &str) -> AccusationResult {
        self.session.accuse(actor)
    }

    // ========================================================================
    // Game State Queries
    // ========================================================================

    /// Get the current room name.
    pub fn current_room(&self) -> Option<&str> {
        self.session.current_room()
    }

    /// Check if exploration has finished.
    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    /// Collected clues in alphabetical order.
    pub fn clues(&self) -> Vec<&str> {
        self.session.collected_clues()
    }

    /// Suspects offered for accusation.
    pub fn roster(&self) -> &[String] {
        self.session.roster()
    }

    /// Get the transcript of all exchanges.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Rooms visited, entrance included, in order.
    pub fn rooms_visited(&self) -> Vec<&str> {
        std::iter::once(self.session.opening().room_name.as_str())
            .chain(self.transcript.iter().filter_map(|e| match &e.outcome {
                StepOutcome::Moved(arrival) => Some(arrival.room_name.as_str()),
                _ => None,
            }))
            .collect()
    }

    /// Get the underlying session for advanced use.
    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
