//! The mansion: a fixed binary tree of rooms.
//!
//! Rooms are stored in an arena owned by [`LocationGraph`] and addressed by
//! [`RoomId`]. The tree is built once from a [`RoomSpec`] topology and never
//! changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// ID Types
// ============================================================================

/// Index of a room inside its [`LocationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub(crate) usize);

impl RoomId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which child of a room to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Topology
// ============================================================================

/// One line of a topology description.
///
/// Children are referenced by room name. An empty `clue` means the room has
/// nothing to discover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub name: String,
    #[serde(default)]
    pub clue: String,
    #[serde(default)]
    pub left: Option<String>,
    #[serde(default)]
    pub right: Option<String>,
}

impl RoomSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clue: String::new(),
            left: None,
            right: None,
        }
    }

    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = clue.into();
        self
    }

    pub fn with_left(mut self, name: impl Into<String>) -> Self {
        self.left = Some(name.into());
        self
    }

    pub fn with_right(mut self, name: impl Into<String>) -> Self {
        self.right = Some(name.into());
        self
    }
}

/// Shape violations found while building a [`LocationGraph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Topology has no rooms")]
    Empty,
    #[error("Room name appears twice: {0}")]
    DuplicateRoom(String),
    #[error("Room '{room}' points to unknown room '{child}'")]
    UnknownChild { room: String, child: String },
    #[error("Room '{child}' has more than one parent ('{first}' and '{second}')")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },
    #[error("The entrance '{0}' cannot be another room's child")]
    RootHasParent(String),
    #[error("Room '{0}' cannot be reached from the entrance")]
    Unreachable(String),
}

// ============================================================================
// Rooms
// ============================================================================

/// A room in the mansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    name: String,
    clue: String,
    left: Option<RoomId>,
    right: Option<RoomId>,
}

impl Room {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The clue found here, if any.
    pub fn clue(&self) -> Option<&str> {
        if self.clue.is_empty() {
            None
        } else {
            Some(&self.clue)
        }
    }

    pub fn left(&self) -> Option<RoomId> {
        self.left
    }

    pub fn right(&self) -> Option<RoomId> {
        self.right
    }

    pub fn child(&self, direction: Direction) -> Option<RoomId> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The immutable room tree.
///
/// The first room of the topology is the entrance (root).
#[derive(Debug, Clone)]
pub struct LocationGraph {
    rooms: Vec<Room>,
}

impl LocationGraph {
    /// Build the tree from a topology description.
    ///
    /// Fails if a child reference is dangling, a room has two parents, the
    /// entrance is referenced as a child, or a room is unreachable.
    pub fn build(topology: &[RoomSpec]) -> Result<Self, GraphError> {
        let root = topology.first().ok_or(GraphError::Empty)?;

        let mut ids = std::collections::HashMap::with_capacity(topology.len());
        for (index, spec) in topology.iter().enumerate() {
            if ids.insert(spec.name.as_str(), RoomId(index)).is_some() {
                return Err(GraphError::DuplicateRoom(spec.name.clone()));
            }
        }

        let resolve = |room: &RoomSpec, child: &Option<String>| -> Result<Option<RoomId>, GraphError> {
            match child {
                None => Ok(None),
                Some(name) => ids
                    .get(name.as_str())
                    .copied()
                    .map(Some)
                    .ok_or_else(|| GraphError::UnknownChild {
                        room: room.name.clone(),
                        child: name.clone(),
                    }),
            }
        };

        let mut rooms = Vec::with_capacity(topology.len());
        let mut parents: Vec<Option<RoomId>> = vec![None; topology.len()];
        for (index, spec) in topology.iter().enumerate() {
            let left = resolve(spec, &spec.left)?;
            let right = resolve(spec, &spec.right)?;

            for child in [left, right].into_iter().flatten() {
                if child.0 == 0 {
                    return Err(GraphError::RootHasParent(root.name.clone()));
                }
                if let Some(first) = parents[child.0] {
                    return Err(GraphError::MultipleParents {
                        child: topology[child.0].name.clone(),
                        first: topology[first.0].name.clone(),
                        second: spec.name.clone(),
                    });
                }
                parents[child.0] = Some(RoomId(index));
            }

            rooms.push(Room {
                name: spec.name.clone(),
                clue: spec.clue.clone(),
                left,
                right,
            });
        }

        // Every room but the entrance has exactly one parent now, so the only
        // remaining defect is a detached cycle. Walk from the root to find it.
        let graph = Self { rooms };
        let mut reached = vec![false; graph.rooms.len()];
        let mut stack = vec![graph.root()];
        while let Some(id) = stack.pop() {
            reached[id.0] = true;
            let room = &graph.rooms[id.0];
            stack.extend(room.left);
            stack.extend(room.right);
        }
        if let Some(index) = reached.iter().position(|r| !r) {
            return Err(GraphError::Unreachable(graph.rooms[index].name.clone()));
        }

        Ok(graph)
    }

    /// The entrance room.
    pub fn root(&self) -> RoomId {
        RoomId(0)
    }

    /// Look up a room by id.
    ///
    /// Ids are only handed out by this graph, so an id from another graph
    /// may panic or return the wrong room.
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    pub fn is_leaf(&self, id: RoomId) -> bool {
        self.room(id).is_leaf()
    }

    /// Rooms in topology order.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> {
        self.rooms.iter().enumerate().map(|(i, r)| (RoomId(i), r))
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
