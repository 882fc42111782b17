//! The net structure manager: places, transitions, edges and the marking.
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::net::structure::{Edge, NodeId, TAU, Tokens, is_place_id};

// Manual Display/Error impls: `#[derive(thiserror::Error)]` would treat the
// `NotBipartite.source` field (an i64, named by the spec) as an error source.
#[derive(Debug, PartialEq, Eq)]
pub enum NetError {
    InvalidPlaceId(NodeId),
    DuplicatePlace(NodeId),
    InvalidTransitionId(NodeId),
    DuplicateTransition(NodeId),
    NotBipartite { source: NodeId, target: NodeId },
    MissingPlace(NodeId),
    MissingTransition(NodeId),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlaceId(id) => {
                write!(f, "place identifier has to be positive, got {id}")
            }
            Self::DuplicatePlace(id) => {
                write!(f, "place identifier has to be unique, {id} already exists")
            }
            Self::InvalidTransitionId(id) => {
                write!(f, "transition identifier has to be negative, got {id}")
            }
            Self::DuplicateTransition(id) => {
                write!(f, "transition identifier has to be unique, {id} already exists")
            }
            Self::NotBipartite { source, target } => {
                write!(f, "edges can only connect a place and a transition, got ({source}, {target})")
            }
            Self::MissingPlace(id) => write!(f, "place {id} does not exist"),
            Self::MissingTransition(id) => write!(f, "transition {id} does not exist"),
        }
    }
}

impl std::error::Error for NetError {}

/// A place/transition net with its current marking.
///
/// Place identifiers occupy *slots*: `places[idx]` names the place whose
/// token count lives in `marking[idx]` and whose capacity lives in
/// `capacity[idx]`. Removing a place shifts the higher slots down so the
/// three sequences stay parallel and contiguous.
///
/// Transitions live in label buckets; several identifiers may share one
/// label (all silent transitions share [`TAU`]). Buckets and the ids inside
/// them keep insertion order, so enabled-set iteration is deterministic.
#[derive(Clone, Serialize, Deserialize)]
pub struct PetriNet {
    pub(crate) places: Vec<NodeId>,
    pub(crate) transitions: IndexMap<String, Vec<NodeId>>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) marking: Vec<Tokens>,
    pub(crate) capacity: Vec<Tokens>,
    pub(crate) counter: NodeId,
}

impl PetriNet {
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            transitions: IndexMap::new(),
            edges: Vec::new(),
            marking: Vec::new(),
            capacity: Vec::new(),
            counter: 0,
        }
    }

    /// Adds a place with the default token capacity of one.
    pub fn add_place(&mut self, id: NodeId) -> Result<(), NetError> {
        self.add_place_with_capacity(id, 1)
    }

    /// Adds a place and sets its token capacity.
    ///
    /// The capacity is recorded but not enforced by the firing rule.
    pub fn add_place_with_capacity(&mut self, id: NodeId, capacity: Tokens) -> Result<(), NetError> {
        if !is_place_id(id) {
            return Err(NetError::InvalidPlaceId(id));
        }
        if self.place_exists(id) {
            return Err(NetError::DuplicatePlace(id));
        }
        self.places.push(id);
        self.marking.push(0);
        self.capacity.push(capacity);
        Ok(())
    }

    /// Removes a place, shifting higher slots down to keep indices
    /// contiguous and dropping the parallel marking/capacity entries.
    pub fn remove_place(&mut self, id: NodeId) -> Result<(), NetError> {
        let slot = self.slot_of(id).ok_or(NetError::MissingPlace(id))?;
        self.places.remove(slot);
        self.marking.remove(slot);
        self.capacity.remove(slot);
        Ok(())
    }

    /// Adds a transition under `label` with an auto-assigned identifier.
    ///
    /// An empty label is coerced to [`TAU`]. The internal counter decreases
    /// once per call and supplies the next free negative identifier.
    pub fn add_transition(&mut self, label: &str) -> NodeId {
        self.counter -= 1;
        while self.transition_exists(self.counter) {
            self.counter -= 1;
        }
        let id = self.counter;
        self.insert_transition(label, id);
        id
    }

    /// Adds a transition under `label` with an explicit identifier.
    ///
    /// The identifier must be negative and unused. The internal counter
    /// still decreases once, matching the auto-assignment sequence.
    pub fn add_transition_with_id(&mut self, label: &str, id: NodeId) -> Result<NodeId, NetError> {
        if id >= 0 {
            return Err(NetError::InvalidTransitionId(id));
        }
        if self.transition_exists(id) {
            return Err(NetError::DuplicateTransition(id));
        }
        self.counter -= 1;
        self.insert_transition(label, id);
        Ok(id)
    }

    fn insert_transition(&mut self, label: &str, id: NodeId) {
        let label = if label.is_empty() { TAU } else { label };
        self.transitions.entry(label.to_string()).or_default().push(id);
    }

    /// Removes a transition from its label bucket, dropping the bucket if it
    /// becomes empty. Absent identifiers are ignored.
    pub fn remove_transition(&mut self, id: NodeId) {
        let mut emptied = None;
        for (label, bucket) in self.transitions.iter_mut() {
            if let Some(pos) = bucket.iter().position(|&t| t == id) {
                bucket.remove(pos);
                if bucket.is_empty() {
                    emptied = Some(label.clone());
                }
                break;
            }
        }
        if let Some(label) = emptied {
            self.transitions.shift_remove(&label);
        }
    }

    /// Adds an edge between a place and a transition (either direction).
    ///
    /// Validation happens before any mutation: exactly one endpoint must be
    /// positive and both endpoints must exist.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> Result<(), NetError> {
        self.check_edge(source, target)?;
        self.edges.push(Edge::new(source, target));
        Ok(())
    }

    /// Adds an edge in both directions.
    pub fn add_edge_two_way(&mut self, source: NodeId, target: NodeId) -> Result<(), NetError> {
        self.check_edge(source, target)?;
        self.edges.push(Edge::new(source, target));
        self.edges.push(Edge::new(target, source));
        Ok(())
    }

    fn check_edge(&self, source: NodeId, target: NodeId) -> Result<(), NetError> {
        if is_place_id(source) == is_place_id(target) {
            return Err(NetError::NotBipartite { source, target });
        }
        for endpoint in [source, target] {
            if is_place_id(endpoint) {
                if !self.place_exists(endpoint) {
                    return Err(NetError::MissingPlace(endpoint));
                }
            } else if !self.transition_exists(endpoint) {
                return Err(NetError::MissingTransition(endpoint));
            }
        }
        Ok(())
    }

    /// Removes the first edge matching `(source, target)`, if any.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) {
        if let Some(pos) = self
            .edges
            .iter()
            .position(|e| e.source == source && e.target == target)
        {
            self.edges.remove(pos);
        }
    }

    /// Removes every edge where `id` is the source or the target.
    pub fn remove_all_edges_of(&mut self, id: NodeId) {
        self.edges.retain(|e| !e.touches(id));
    }

    pub fn place_exists(&self, id: NodeId) -> bool {
        self.places.contains(&id)
    }

    pub fn transition_exists(&self, id: NodeId) -> bool {
        self.transitions.values().any(|bucket| bucket.contains(&id))
    }

    /// Overwrites the token count of `place`.
    pub fn set_marking(&mut self, place: NodeId, tokens: Tokens) -> Result<(), NetError> {
        let slot = self.slot_of(place).ok_or(NetError::MissingPlace(place))?;
        self.marking[slot] = tokens;
        Ok(())
    }

    /// Slot index of `place` in the marking/capacity sequences.
    pub fn slot_of(&self, place: NodeId) -> Option<usize> {
        self.places.iter().position(|&p| p == place)
    }

    /// Place identifiers in slot order.
    pub fn places(&self) -> &[NodeId] {
        &self.places
    }

    /// Label buckets: label to the ordered transition identifiers using it.
    pub fn transitions(&self) -> &IndexMap<String, Vec<NodeId>> {
        &self.transitions
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Token counts, parallel to [`PetriNet::places`].
    pub fn marking(&self) -> &[Tokens] {
        &self.marking
    }

    /// Per-place capacities, parallel to [`PetriNet::places`].
    pub fn capacity(&self) -> &[Tokens] {
        &self.capacity
    }

    pub fn places_len(&self) -> usize {
        self.places.len()
    }

    pub fn transitions_len(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Human-readable structural warnings: isolated nodes and transitions
    /// without input edges, which this net defines as never enabled.
    pub fn connectivity_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for &place in &self.places {
            if !self.edges.iter().any(|e| e.touches(place)) {
                warnings.push(format!("place {place} has no edges"));
            }
        }

        for bucket in self.transitions.values() {
            for &transition in bucket {
                let has_input = self.edges.iter().any(|e| e.is_input_of(transition));
                let has_output = self.edges.iter().any(|e| e.is_output_of(transition));
                if !has_input && !has_output {
                    warnings.push(format!("transition {transition} has no edges"));
                } else if !has_input {
                    warnings.push(format!(
                        "transition {transition} has no input places and can never fire"
                    ));
                }
            }
        }

        warnings
    }

    /// Emits [`PetriNet::connectivity_warnings`] through the `log` facade.
    pub fn log_connectivity(&self) {
        let warnings = self.connectivity_warnings();
        if warnings.is_empty() {
            log::info!(
                "net connectivity check passed: {} places, {} transitions",
                self.places_len(),
                self.transitions_len()
            );
            return;
        }
        for warning in warnings {
            log::warn!("{warning}");
        }
    }
}

impl Default for PetriNet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PetriNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetriNet")
            .field("places", &self.places)
            .field("transitions", &self.transitions)
            .field("edges", &self.edges)
            .field("marking", &self.marking)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl fmt::Display for PetriNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transitions: {:?}", self.transitions)?;
        writeln!(f, "Places: {:?}", self.places)?;
        writeln!(f, "Capacities: {:?}", self.capacity)?;
        writeln!(f, "Marking: {:?}", self.marking)?;
        write!(f, "Edges: {:?}", self.edges)
    }
}
