//! Static structure elements: node identifiers, token counts and edges.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Public identifier of a net node.
///
/// Places carry positive identifiers, transitions negative ones; the sign is
/// the bipartite discriminator used by every edge check. Zero is neither and
/// is rejected wherever an identifier is validated.
pub type NodeId = i64;

/// Token count of a single place.
///
/// Markings are conceptually non-negative, but firing a disabled transition
/// is not guarded and may drive a count below zero.
pub type Tokens = i64;

/// Label shared by all silent transitions.
pub const TAU: &str = "tau";

pub fn is_place_id(id: NodeId) -> bool {
    id > 0
}

pub fn is_transition_id(id: NodeId) -> bool {
    id < 0
}

/// A directed arc between a place and a transition (either direction).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Whether this edge feeds tokens into `transition`.
    pub fn is_input_of(self, transition: NodeId) -> bool {
        self.target == transition
    }

    /// Whether this edge carries tokens out of `transition`.
    pub fn is_output_of(self, transition: NodeId) -> bool {
        self.source == transition
    }

    pub fn touches(self, id: NodeId) -> bool {
        self.source == id || self.target == id
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} -> {})", self.source, self.target)
    }
}
