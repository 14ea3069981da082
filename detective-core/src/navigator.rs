//! Walking the mansion one command at a time.
//!
//! The [`Navigator`] only knows the current room. Each arrival runs the
//! discovery step: the room's clue goes into the [`ClueSet`] and, if the
//! scenario's rules name an actor for it, into the [`ClueIndex`].

use crate::clues::ClueSet;
use crate::index::ClueIndex;
use crate::scenario::ClueRules;
use crate::world::{Direction, LocationGraph, RoomId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

// ============================================================================
// Commands
// ============================================================================

/// A navigation command typed by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Go(Direction),
    Exit,
}

impl FromStr for Command {
    type Err = String;

    /// Exact, case-sensitive match on `e`/`left`, `d`/`right`, `s`/`exit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" | "left" => Ok(Command::Go(Direction::Left)),
            "d" | "right" => Ok(Command::Go(Direction::Right)),
            "s" | "exit" => Ok(Command::Exit),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Go(direction) => write!(f, "{direction}"),
            Command::Exit => write!(f, "exit"),
        }
    }
}

// ============================================================================
// Policies
// ============================================================================

/// Whether reaching a room without exits ends the exploration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeafPolicy {
    /// The player must always choose to leave.
    #[default]
    ExplicitExit,
    /// Entering a room with no children ends exploration.
    AutoTerminal,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Where the navigator is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    AtRoom(RoomId),
    Exited,
}

/// What happened when a room's clue was examined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub clue: String,
    /// Actor the rules link to this clue, if any.
    pub actor: Option<String>,
    /// False when the clue set already held this clue and rejected it.
    pub newly_collected: bool,
}

/// Arrival in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub room: RoomId,
    pub room_name: String,
    /// `None` for rooms without a clue.
    pub discovery: Option<Discovery>,
    /// Set when [`LeafPolicy::AutoTerminal`] ended exploration here.
    pub dead_end: bool,
}

/// Result of a single navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved(Arrival),
    /// The requested child does not exist; the player stays put.
    NoPath(Direction),
    /// The input was not a command.
    Invalid(String),
    /// The player left the mansion.
    Exited,
    /// Exploration is over; nothing more can happen.
    AlreadyExited,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        match self {
            StepOutcome::Exited | StepOutcome::AlreadyExited => true,
            StepOutcome::Moved(arrival) => arrival.dead_end,
            _ => false,
        }
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Traversal state machine over a [`LocationGraph`].
#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavState,
    leaf_policy: LeafPolicy,
}

/// The structures a navigator reads and fills while moving.
pub struct Investigation<'a> {
    pub graph: &'a LocationGraph,
    pub rules: &'a ClueRules,
    pub clues: &'a mut ClueSet,
    pub index: &'a mut ClueIndex,
}

impl Navigator {
    /// Place a navigator in the entrance and run its discovery step.
    pub fn enter(investigation: Investigation<'_>, leaf_policy: LeafPolicy) -> (Self, Arrival) {
        let root = investigation.graph.root();
        let mut navigator = Self {
            state: NavState::AtRoom(root),
            leaf_policy,
        };
        let arrival = navigator.arrive(root, investigation);
        (navigator, arrival)
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> Option<RoomId> {
        match self.state {
            NavState::AtRoom(id) => Some(id),
            NavState::Exited => None,
        }
    }

    pub fn has_exited(&self) -> bool {
        self.state == NavState::Exited
    }

    /// Parse and apply one line of input.
    pub fn step_input(&mut self, input: &str, investigation: Investigation<'_>) -> StepOutcome {
        if self.has_exited() {
            return StepOutcome::AlreadyExited;
        }
        match input.parse::<Command>() {
            Ok(command) => self.step(command, investigation),
            Err(raw) => {
                warn!(input = %raw, "invalid navigation choice");
                StepOutcome::Invalid(raw)
            }
        }
    }

    /// Apply one command.
    pub fn step(&mut self, command: Command, investigation: Investigation<'_>) -> StepOutcome {
        let current = match self.state {
            NavState::AtRoom(id) => id,
            NavState::Exited => return StepOutcome::AlreadyExited,
        };
        let graph = investigation.graph;

        match command {
            Command::Exit => {
                info!("exploration ended by player");
                self.state = NavState::Exited;
                StepOutcome::Exited
            }
            Command::Go(direction) => match graph.room(current).child(direction) {
                Some(next) => StepOutcome::Moved(self.arrive(next, investigation)),
                None => {
                    warn!(%direction, room = graph.room(current).name(), "no path");
                    StepOutcome::NoPath(direction)
                }
            },
        }
    }

    fn arrive(&mut self, id: RoomId, investigation: Investigation<'_>) -> Arrival {
        let Investigation {
            graph,
            rules,
            clues,
            index,
        } = investigation;
        let room = graph.room(id);
        self.state = NavState::AtRoom(id);
        info!(room = room.name(), "entered room");

        // The tree has no cycles and there is no way back, so each room is
        // entered at most once. Two rooms may still hold the same clue text.
        let discovery = room.clue().map(|clue| {
            let newly_collected = clues.insert(clue);
            let actor = rules.actor_for(clue);
            if let Some(actor) = actor {
                index.insert(clue, actor);
            }
            Discovery {
                clue: clue.to_string(),
                actor: actor.map(str::to_string),
                newly_collected,
            }
        });

        let dead_end = self.leaf_policy == LeafPolicy::AutoTerminal && room.is_leaf();
        if dead_end {
            info!(room = room.name(), "reached a room with no exits");
            self.state = NavState::Exited;
        }

        Arrival {
            room: id,
            room_name: room.name().to_string(),
            discovery,
            dead_end,
        }
    }
}
