//! The firing engine: enabling test, firing and randomized replay.
//!
//! All functions here are pure over the net's marking; the engine keeps no
//! state of its own. Replay is a step function driven by an explicit random
//! source, so callers can bound it or seed it for deterministic runs.
use rand::Rng;

use crate::net::core::PetriNet;
use crate::net::structure::NodeId;

impl PetriNet {
    /// Whether `transition` can fire under the current marking.
    ///
    /// Enabled iff the transition has at least one input edge and every
    /// input place holds at least one token. A transition with no input
    /// edges is never enabled; classical semantics would let such a source
    /// transition fire unconditionally, but conformance replay depends on
    /// it staying disabled.
    pub fn is_enabled(&self, transition: NodeId) -> bool {
        let mut has_input = false;
        for edge in self.edges.iter().filter(|e| e.is_input_of(transition)) {
            has_input = true;
            match self.slot_of(edge.source) {
                Some(slot) if self.marking[slot] > 0 => {}
                _ => return false,
            }
        }
        has_input
    }

    /// Places with an edge into `transition`, one entry per edge.
    pub fn input_places(&self, transition: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.is_input_of(transition))
            .map(|e| e.source)
            .collect()
    }

    /// Places with an edge out of `transition`, one entry per edge.
    pub fn output_places(&self, transition: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.is_output_of(transition))
            .map(|e| e.target)
            .collect()
    }

    /// Fires `transition`: one token leaves each input place and one token
    /// enters each output place, per edge.
    ///
    /// No enabledness check happens here. Callers are expected to test
    /// [`PetriNet::is_enabled`] first; firing a disabled transition can
    /// drive the marking negative. Edges whose place no longer has a slot
    /// are skipped.
    pub fn fire_transition(&mut self, transition: NodeId) {
        let inputs: Vec<usize> = self
            .edges
            .iter()
            .filter(|e| e.is_input_of(transition))
            .filter_map(|e| self.slot_of(e.source))
            .collect();
        let outputs: Vec<usize> = self
            .edges
            .iter()
            .filter(|e| e.is_output_of(transition))
            .filter_map(|e| self.slot_of(e.target))
            .collect();

        for slot in inputs {
            self.marking[slot] -= 1;
        }
        for slot in outputs {
            self.marking[slot] += 1;
        }
    }

    /// Every enabled transition, in label-bucket insertion order.
    pub fn enabled_transitions(&self) -> Vec<NodeId> {
        self.transitions
            .values()
            .flatten()
            .copied()
            .filter(|&t| self.is_enabled(t))
            .collect()
    }

    /// One replay step: fires a uniformly chosen enabled transition and
    /// returns its identifier, or `None` when nothing is enabled.
    pub fn replay_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<NodeId> {
        let enabled = self.enabled_transitions();
        if enabled.is_empty() {
            return None;
        }
        let transition = enabled[rng.random_range(0..enabled.len())];
        self.fire_transition(transition);
        Some(transition)
    }

    /// Replays the net from its current marking until no transition is
    /// enabled, driven by the supplied random source.
    ///
    /// A net whose marking cycles may never reach a dead state; bound the
    /// walk externally via [`PetriNet::replay_step`] if that matters.
    pub fn replay_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<NodeId> {
        let mut sequence = Vec::new();
        while let Some(transition) = self.replay_step(rng) {
            sequence.push(transition);
        }
        sequence
    }

    /// [`PetriNet::replay_with`] using the thread-local random source.
    pub fn replay(&mut self) -> Vec<NodeId> {
        self.replay_with(&mut rand::rng())
    }
}
