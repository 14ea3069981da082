//! Detective Quest game engine.
//!
//! This crate provides:
//! - The mansion: a fixed binary tree of rooms, some hiding clues
//! - An alphabetically ordered clue set (binary search tree)
//! - A hash-bucketed clue → suspect index with chained collisions
//! - A navigator that collects clues as the player walks the mansion
//! - Judging an accusation by counting corroborating clues
//!
//! # Quick Start
//!
//! ```
//! use detective_core::{GameSession, Scenario, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::new(Scenario::mansion())).unwrap();
//!
//! session.command("e");
//! session.command("s");
//!
//! for clue in session.collected_clues() {
//!     println!("- {clue}");
//! }
//!
//! let verdict = session.accuse("Cozinheiro");
//! assert_eq!(verdict.count, 1);
//! assert!(!verdict.convicted);
//! ```

pub mod clues;
pub mod headless;
pub mod index;
pub mod judge;
pub mod navigator;
pub mod scenario;
pub mod session;
pub mod testing;
pub mod world;

// Primary public API
pub use clues::{ClueSet, DuplicatePolicy};
pub use headless::{HeadlessConfig, HeadlessGame};
pub use index::ClueIndex;
pub use judge::{judge, AccusationResult, VERDICT_THRESHOLD};
pub use navigator::{Arrival, Command, Discovery, LeafPolicy, NavState, Navigator, StepOutcome};
pub use scenario::{ClueRule, ClueRules, Scenario, ScenarioError};
pub use session::{GameSession, SessionConfig, SessionError};
pub use testing::TestHarness;
pub use world::{Direction, GraphError, LocationGraph, Room, RoomId, RoomSpec};
