//! Scenario configuration: the mansion map, the clue rules and the suspects.
//!
//! A [`Scenario`] is plain data. It can come from one of the built-in
//! presets or from a JSON file, and is handed to
//! [`GameSession::new`](crate::session::GameSession::new) at startup.

use crate::clues::DuplicatePolicy;
use crate::index::DEFAULT_BUCKETS;
use crate::navigator::LeafPolicy;
use crate::world::{GraphError, LocationGraph, RoomSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors from loading or validating a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid mansion layout: {0}")]
    Graph(#[from] GraphError),

    #[error("Unknown scenario: {0}")]
    UnknownPreset(String),
}

// ============================================================================
// Clue Rules
// ============================================================================

/// Links one clue text to the actor it implicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueRule {
    pub clue: String,
    pub actor: String,
}

impl ClueRule {
    pub fn new(clue: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            clue: clue.into(),
            actor: actor.into(),
        }
    }
}

/// The fixed clue → actor table consulted on discovery.
///
/// Matching is exact. When a clue appears twice, the first rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClueRules {
    rules: Vec<ClueRule>,
}

impl ClueRules {
    pub fn new(rules: Vec<ClueRule>) -> Self {
        Self { rules }
    }

    pub fn actor_for(&self, clue: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.clue == clue)
            .map(|r| r.actor.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClueRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ============================================================================
// Scenario
// ============================================================================

fn default_buckets() -> usize {
    DEFAULT_BUCKETS
}

/// Everything needed to set up one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub intro: String,
    /// Topology; the first room is the entrance.
    pub rooms: Vec<RoomSpec>,
    #[serde(default)]
    pub rules: ClueRules,
    /// Suspects offered to the player. Not enforced on accusation.
    #[serde(default)]
    pub roster: Vec<String>,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    #[serde(default)]
    pub leaf_policy: LeafPolicy,
    #[serde(default = "default_buckets")]
    pub buckets: usize,
}

impl Scenario {
    /// Names accepted by [`Scenario::preset`].
    pub const PRESETS: [&'static str; 3] = ["mansion", "adventurer", "basic"];

    pub fn preset(name: &str) -> Result<Self, ScenarioError> {
        match name {
            "mansion" => Ok(Self::mansion()),
            "adventurer" => Ok(Self::adventurer()),
            "basic" => Ok(Self::basic()),
            other => Err(ScenarioError::UnknownPreset(other.to_string())),
        }
    }

    /// The full game: every room hides a clue and five suspects can be accused.
    pub fn mansion() -> Self {
        let rooms = vec![
            RoomSpec::new("Hall de Entrada")
                .with_clue("Pegada de lama")
                .with_left("Sala de Estar")
                .with_right("Biblioteca"),
            RoomSpec::new("Sala de Estar")
                .with_clue("Faca suja")
                .with_left("Jardim")
                .with_right("Cozinha"),
            RoomSpec::new("Biblioteca")
                .with_clue("Luva rasgada")
                .with_left("Quarto Principal")
                .with_right("Escritório"),
            RoomSpec::new("Jardim")
                .with_clue("Joia roubada")
                .with_left("Garagem")
                .with_right("Piscina"),
            RoomSpec::new("Cozinha")
                .with_clue("Cigarro estranho")
                .with_left("Despensa"),
            RoomSpec::new("Quarto Principal").with_clue("Terra no tapete"),
            RoomSpec::new("Escritório").with_clue("Restos de comida"),
            RoomSpec::new("Garagem").with_clue("Botão de uniforme"),
            RoomSpec::new("Piscina").with_clue("Carta suspeita"),
            RoomSpec::new("Despensa").with_clue("Pegada de sapato"),
        ];

        let rules = ClueRules::new(vec![
            ClueRule::new("Pegada de lama", "Jardineiro"),
            ClueRule::new("Faca suja", "Cozinheiro"),
            ClueRule::new("Luva rasgada", "Mordomo"),
            ClueRule::new("Joia roubada", "Dona da Casa"),
            ClueRule::new("Cigarro estranho", "Vizinho"),
            ClueRule::new("Terra no tapete", "Jardineiro"),
            ClueRule::new("Restos de comida", "Cozinheiro"),
            ClueRule::new("Botão de uniforme", "Mordomo"),
            ClueRule::new("Carta suspeita", "Dona da Casa"),
            ClueRule::new("Pegada de sapato", "Vizinho"),
        ]);

        Self {
            name: "mansion".to_string(),
            intro: "Bem-vindo ao Detective Quest! Explore a mansão para coletar pistas.".to_string(),
            rooms,
            rules,
            roster: ["Jardineiro", "Cozinheiro", "Mordomo", "Dona da Casa", "Vizinho"]
                .into_iter()
                .map(String::from)
                .collect(),
            duplicates: DuplicatePolicy::Reject,
            leaf_policy: LeafPolicy::ExplicitExit,
            buckets: DEFAULT_BUCKETS,
        }
    }

    /// Clue hunting only: some rooms are empty and nobody is accused.
    pub fn adventurer() -> Self {
        let rooms = vec![
            RoomSpec::new("Hall de Entrada")
                .with_clue("Chave encontrada no tapete.")
                .with_left("Sala de Estar")
                .with_right("Escritorio"),
            RoomSpec::new("Sala de Estar")
                .with_clue("Bilhete rasgado: 'O culpado esta proximo'.")
                .with_left("Cozinha")
                .with_right("Jardim"),
            RoomSpec::new("Escritorio")
                .with_clue("Documento suspeito na mesa.")
                .with_left("Biblioteca")
                .with_right("Quarto"),
            RoomSpec::new("Cozinha"),
            RoomSpec::new("Jardim").with_clue("Pegadas frescas na grama."),
            RoomSpec::new("Biblioteca"),
            RoomSpec::new("Quarto").with_clue("Diario escondido: 'Plano revelado'."),
        ];

        Self {
            name: "adventurer".to_string(),
            intro: "Explore a mansão e colete as pistas escondidas.".to_string(),
            rooms,
            rules: ClueRules::default(),
            roster: Vec::new(),
            duplicates: DuplicatePolicy::AllowDuplicates,
            leaf_policy: LeafPolicy::ExplicitExit,
            buckets: DEFAULT_BUCKETS,
        }
    }

    /// Map walking only: no clues, and a room without exits ends the game.
    pub fn basic() -> Self {
        let rooms = vec![
            RoomSpec::new("Hall de Entrada")
                .with_left("Sala de Estar")
                .with_right("Escritorio"),
            RoomSpec::new("Sala de Estar")
                .with_left("Cozinha")
                .with_right("Jardim"),
            RoomSpec::new("Escritorio")
                .with_left("Biblioteca")
                .with_right("Quarto"),
            RoomSpec::new("Cozinha"),
            RoomSpec::new("Jardim"),
            RoomSpec::new("Biblioteca"),
            RoomSpec::new("Quarto"),
        ];

        Self {
            name: "basic".to_string(),
            intro: "Explore a mansão até encontrar um cômodo sem saídas.".to_string(),
            rooms,
            rules: ClueRules::default(),
            roster: Vec::new(),
            duplicates: DuplicatePolicy::Reject,
            leaf_policy: LeafPolicy::AutoTerminal,
            buckets: DEFAULT_BUCKETS,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String, ScenarioError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the rooms form a valid tree.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.build_graph().map(|_| ())
    }

    pub fn build_graph(&self) -> Result<LocationGraph, ScenarioError> {
        Ok(LocationGraph::build(&self.rooms)?)
    }

    pub fn has_accusation(&self) -> bool {
        !self.roster.is_empty()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::mansion()
    }
}
