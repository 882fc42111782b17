//! JSON and RON snapshots of a net.
//!
//! Explicit save/load of a [`PetriNet`] value; the net itself has no
//! implicit persistence.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ron::ser::PrettyConfig;
use thiserror::Error;

use crate::net::core::PetriNet;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),
    #[error("ron parse error: {0}")]
    RonParse(#[from] ron::de::SpannedError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn to_json_string(net: &PetriNet) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(net)?)
}

pub fn from_json_str(s: &str) -> Result<PetriNet, IoError> {
    Ok(serde_json::from_str(s)?)
}

pub fn write_json<P: AsRef<Path>>(path: P, net: &PetriNet) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    file.write_all(to_json_string(net)?.as_bytes())?;
    Ok(())
}

pub fn read_json<P: AsRef<Path>>(path: P) -> Result<PetriNet, IoError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    from_json_str(&content)
}

pub fn to_ron_string(net: &PetriNet) -> Result<String, IoError> {
    Ok(ron::ser::to_string_pretty(net, PrettyConfig::default())?)
}

pub fn from_ron_str(s: &str) -> Result<PetriNet, IoError> {
    Ok(ron::from_str(s)?)
}

pub fn write_ron<P: AsRef<Path>>(path: P, net: &PetriNet) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    file.write_all(to_ron_string(net)?.as_bytes())?;
    Ok(())
}

pub fn read_ron<P: AsRef<Path>>(path: P) -> Result<PetriNet, IoError> {
    let mut content = String::new();
    File::open(path)?.read_to_string(&mut content)?;
    from_ron_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_net() -> PetriNet {
        let mut net = PetriNet::new();
        net.add_place(1).unwrap();
        net.add_place_with_capacity(2, 4).unwrap();
        let t = net.add_transition("work");
        net.add_transition("");
        net.add_edge(1, t).unwrap();
        net.add_edge(t, 2).unwrap();
        net.set_marking(1, 2).unwrap();
        net
    }

    #[test]
    fn json_snapshot_round_trips() {
        let net = sample_net();
        let restored = from_json_str(&to_json_string(&net).unwrap()).unwrap();

        assert_eq!(restored.places(), net.places());
        assert_eq!(restored.transitions(), net.transitions());
        assert_eq!(restored.edges(), net.edges());
        assert_eq!(restored.marking(), net.marking());
        assert_eq!(restored.capacity(), net.capacity());
        // the counter survives, so later auto ids continue the sequence
        assert_eq!(restored.clone().add_transition("next"), -3);
    }

    #[test]
    fn ron_snapshot_round_trips() {
        let net = sample_net();
        let restored = from_ron_str(&to_ron_string(&net).unwrap()).unwrap();

        assert_eq!(restored.places(), net.places());
        assert_eq!(restored.transitions(), net.transitions());
        assert_eq!(restored.marking(), net.marking());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(from_json_str("{"), Err(IoError::Json(_))));
    }
}
