//! # Petri net modeling, random replay and PNML import
//!
//! A net is a bipartite graph of places (positive identifiers, token
//! holders) and transitions (negative identifiers, firing rules). Let `E`
//! be the edge list and `M` the marking vector indexed by place slot. A
//! transition `t` is enabled iff it has at least one input edge
//! `(p, t) ∈ E` and `M[p] > 0` for every such `p`; firing moves one token
//! along each input and output edge. Replay repeatedly fires a uniformly
//! chosen enabled transition until none remain.
//!
//! The crate provides:
//! * graph mutation with validation before every state change;
//! * the enabling/firing state machine and seeded random replay;
//! * a PNML importer for process-model files;
//! * JSON/RON snapshots and Graphviz DOT export.
//!
//! ## Example
//!
//! ```rust
//! use ptnet::PetriNet;
//!
//! let mut net = PetriNet::new();
//! net.add_place(1).unwrap();
//! net.add_place(2).unwrap();
//! let t = net.add_transition("t");
//! net.add_edge(1, t).unwrap();
//! net.add_edge(t, 2).unwrap();
//! net.set_marking(1, 1).unwrap();
//!
//! assert!(net.is_enabled(t));
//! net.fire_transition(t);
//! assert_eq!(net.marking(), &[0, 1]);
//! assert!(!net.is_enabled(t));
//! ```

pub mod dot;
pub mod net;
pub mod pnml;

pub use net::core::{NetError, PetriNet};
pub use net::io::IoError;
pub use net::structure::{Edge, NodeId, TAU, Tokens};
pub use pnml::{PnmlError, parse_pnml, read_pnml};
