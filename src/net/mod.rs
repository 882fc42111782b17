//! Place/transition net with signed public identifiers.
//!
//! Places carry positive identifiers and occupy slots aligned with the
//! marking and capacity sequences; transitions carry negative identifiers
//! grouped into label buckets (several silent transitions share the `tau`
//! bucket). The firing rule consumes one token per input edge and produces
//! one per output edge. Two deliberate deviations from textbook semantics
//! are part of the contract: capacities are recorded but never enforced,
//! and a transition without input edges is never enabled.
pub mod core;
pub mod firing;
pub mod io;
pub mod structure;

pub use self::core::{NetError, PetriNet};
pub use self::io::IoError;
pub use self::structure::{Edge, NodeId, TAU, Tokens, is_place_id, is_transition_id};
