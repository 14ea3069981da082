//! GameSession - the primary public API for playing a case.
//!
//! A session owns one instance of every structure: the mansion graph, the
//! clue set, the clue index and the navigator. Nothing is shared between
//! sessions, so several can run side by side.

use crate::clues::{ClueSet, DuplicatePolicy};
use crate::index::ClueIndex;
use crate::judge::{judge, AccusationResult};
use crate::navigator::{Arrival, Command, Investigation, LeafPolicy, NavState, Navigator, StepOutcome};
use crate::scenario::{Scenario, ScenarioError};
use crate::world::LocationGraph;
use thiserror::Error;
use tracing::info;

/// Errors from GameSession operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),
}

/// Configuration for creating a new game session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// The case to play.
    pub scenario: Scenario,

    /// Overrides the scenario's duplicate policy.
    pub duplicates: Option<DuplicatePolicy>,

    /// Overrides the scenario's leaf policy.
    pub leaf_policy: Option<LeafPolicy>,

    /// Overrides the scenario's bucket count.
    pub buckets: Option<usize>,
}

impl SessionConfig {
    /// Create a new session config for a scenario.
    pub fn new(scenario: Scenario) -> Self {
        Self {
            scenario,
            duplicates: None,
            leaf_policy: None,
            buckets: None,
        }
    }

    /// Set the duplicate clue policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = Some(policy);
        self
    }

    /// Set whether dead ends finish the exploration.
    pub fn with_leaf_policy(mut self, policy: LeafPolicy) -> Self {
        self.leaf_policy = Some(policy);
        self
    }

    /// Set the number of index buckets.
    pub fn with_buckets(mut self, buckets: usize) -> Self {
        self.buckets = Some(buckets);
        self
    }
}

/// The evidence side of a session: everything the navigator reads or fills.
struct CaseFile {
    scenario: Scenario,
    graph: LocationGraph,
    clues: ClueSet,
    index: ClueIndex,
}

impl CaseFile {
    fn investigation(&mut self) -> Investigation<'_> {
        Investigation {
            graph: &self.graph,
            rules: &self.scenario.rules,
            clues: &mut self.clues,
            index: &mut self.index,
        }
    }
}

/// A single game of Detective Quest.
pub struct GameSession {
    case: CaseFile,
    navigator: Navigator,
    opening: Arrival,
    leaf_policy: LeafPolicy,
}

impl GameSession {
    /// Build the mansion and place the player in the entrance.
    ///
    /// The entrance's clue is collected immediately.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let SessionConfig {
            scenario,
            duplicates,
            leaf_policy,
            buckets,
        } = config;

        let graph = scenario.build_graph()?;
        let duplicates = duplicates.unwrap_or(scenario.duplicates);
        let leaf_policy = leaf_policy.unwrap_or(scenario.leaf_policy);
        let buckets = buckets.unwrap_or(scenario.buckets);

        info!(
            scenario = %scenario.name,
            rooms = graph.len(),
            ?duplicates,
            ?leaf_policy,
            buckets,
            "starting session"
        );

        let mut case = CaseFile {
            scenario,
            graph,
            clues: ClueSet::with_policy(duplicates),
            index: ClueIndex::with_buckets(buckets),
        };
        let (navigator, opening) = Navigator::enter(case.investigation(), leaf_policy);

        Ok(Self {
            case,
            navigator,
            opening,
            leaf_policy,
        })
    }

    /// Start a session from a built-in scenario name.
    pub fn from_preset(name: &str) -> Result<Self, SessionError> {
        Self::new(SessionConfig::new(Scenario::preset(name)?))
    }

    /// Process one line of player input.
    pub fn command(&mut self, input: &str) -> StepOutcome {
        self.navigator.step_input(input, self.case.investigation())
    }

    /// Apply an already parsed command.
    pub fn step(&mut self, command: Command) -> StepOutcome {
        self.navigator.step(command, self.case.investigation())
    }

    /// Accuse an actor using the clues collected so far.
    pub fn accuse(&self, actor: &str) -> AccusationResult {
        judge(actor, &self.case.clues, &self.case.index)
    }

    /// What happened when the player walked into the entrance.
    pub fn opening(&self) -> &Arrival {
        &self.opening
    }

    /// Name of the room the player is in, or `None` after leaving.
    pub fn current_room(&self) -> Option<&str> {
        self.navigator
            .current()
            .map(|id| self.case.graph.room(id).name())
    }

    pub fn state(&self) -> NavState {
        self.navigator.state()
    }

    /// Check if exploration has finished.
    pub fn is_over(&self) -> bool {
        self.navigator.has_exited()
    }

    /// Collected clues in alphabetical order.
    pub fn collected_clues(&self) -> Vec<&str> {
        self.case.clues.iter().collect()
    }

    pub fn clues(&self) -> &ClueSet {
        &self.case.clues
    }

    pub fn index(&self) -> &ClueIndex {
        &self.case.index
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.case.graph
    }

    pub fn scenario(&self) -> &Scenario {
        &self.case.scenario
    }

    /// Suspects to offer the player.
    pub fn roster(&self) -> &[String] {
        &self.case.scenario.roster
    }

    pub fn leaf_policy(&self) -> LeafPolicy {
        self.leaf_policy
    }
}
