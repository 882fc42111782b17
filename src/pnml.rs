//! PNML import: reconstructs a [`PetriNet`] from a process-model file.
//!
//! Consumes the PNML subset used by process-mining tooling: `net`, nested
//! `page` containers, `place`, `transition`, `arc`, with optional
//! `name/text` children. Everything else is ignored. Documents may use the
//! 2009 PNML namespace or none at all.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use thiserror::Error;

use crate::net::core::{NetError, PetriNet};
use crate::net::structure::{NodeId, TAU};

/// Namespace of the PNML 2009 grammar.
pub const PNML_NS: &str = "http://www.pnml.org/version-2009/grammar/pnml";

/// Suffix some discovery tools append to transition labels.
const COMPLETE_SUFFIX: &str = "+complete";

#[derive(Debug, Error)]
pub enum PnmlError {
    #[error("invalid PNML format")]
    InvalidFormat,
    #[error("xml error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("{element} element is missing its {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("arc references unknown node {0:?}")]
    UnknownNode(String),
    #[error(transparent)]
    Net(#[from] NetError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parses a PNML document into a fresh net.
///
/// Transitions are imported first (their auto-assigned ids decrease from
/// -1 in document order), then places (positive ids increasing in encounter
/// order), then arcs, which need both id mappings complete.
pub fn parse_pnml(xml: &str) -> Result<PetriNet, PnmlError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();

    // Locate <net> under the 2009 namespace; be liberal and retry without
    // a namespace before giving up.
    let (net_el, ns) = match root.children().find(|n| is_tag(n, Some(PNML_NS), "net")) {
        Some(el) => (el, Some(PNML_NS)),
        None => match root.children().find(|n| is_tag(n, None, "net")) {
            Some(el) => (el, None),
            None => return Err(PnmlError::InvalidFormat),
        },
    };

    let mut net = PetriNet::new();
    let mut id_map: HashMap<String, NodeId> = HashMap::new();

    // Transitions may be spread over several nested <page> containers;
    // descendants() walks them depth-first in document order.
    for element in net_el.descendants().filter(|n| is_tag(n, ns, "transition")) {
        let xml_id = element
            .attribute("id")
            .ok_or(PnmlError::MissingAttribute {
                element: "transition",
                attribute: "id",
            })?;
        let raw = name_text(element, ns).unwrap_or(xml_id);
        let label = raw.strip_suffix(COMPLETE_SUFFIX).unwrap_or(raw);
        // any label mentioning tau denotes a silent transition
        let label = if label.contains(TAU) { "" } else { label };

        let id = net.add_transition(label);
        id_map.insert(xml_id.to_string(), id);
    }

    // Place elements without an id attribute are marking annotations, not
    // places; they still advance the counter.
    let mut place_counter: NodeId = 0;
    for element in net_el.descendants().filter(|n| is_tag(n, ns, "place")) {
        place_counter += 1;
        if let Some(xml_id) = element.attribute("id") {
            net.add_place(place_counter)?;
            id_map.insert(xml_id.to_string(), place_counter);
        }
    }

    for element in net_el.descendants().filter(|n| is_tag(n, ns, "arc")) {
        let source = resolve(&id_map, element, "source")?;
        let target = resolve(&id_map, element, "target")?;
        net.add_edge(source, target)?;
    }

    log::debug!(
        "imported {} transitions, {} places, {} arcs",
        net.transitions_len(),
        net.places_len(),
        net.edges().len()
    );
    Ok(net)
}

/// Reads and parses a PNML file.
pub fn read_pnml<P: AsRef<Path>>(path: P) -> Result<PetriNet, PnmlError> {
    let content = fs::read_to_string(path)?;
    parse_pnml(&content)
}

fn is_tag(node: &Node<'_, '_>, ns: Option<&str>, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name && node.tag_name().namespace() == ns
}

/// Text of the element's `name/text` child, if present.
fn name_text<'a>(element: Node<'a, '_>, ns: Option<&str>) -> Option<&'a str> {
    let name = element.children().find(|n| is_tag(n, ns, "name"))?;
    let text = name.children().find(|n| is_tag(n, ns, "text"))?;
    text.text()
}

fn resolve(
    id_map: &HashMap<String, NodeId>,
    arc: Node<'_, '_>,
    attribute: &'static str,
) -> Result<NodeId, PnmlError> {
    let xml_id = arc.attribute(attribute).ok_or(PnmlError::MissingAttribute {
        element: "arc",
        attribute,
    })?;
    id_map
        .get(xml_id)
        .copied()
        .ok_or_else(|| PnmlError::UnknownNode(xml_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMESPACED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<pnml xmlns="http://www.pnml.org/version-2009/grammar/pnml">
  <net id="net1" type="http://www.pnml.org/version-2009/grammar/ptnet">
    <page id="page1">
      <place id="p1">
        <name><text>start</text></name>
      </place>
      <place id="p2"/>
      <transition id="t1">
        <name><text>register+complete</text></name>
      </transition>
      <transition id="t2">
        <name><text>tau_split</text></name>
      </transition>
      <arc id="a1" source="p1" target="t1"/>
      <arc id="a2" source="t1" target="p2"/>
      <arc id="a3" source="p2" target="t2"/>
    </page>
  </net>
</pnml>"#;

    #[test]
    fn imports_a_namespaced_document() {
        let net = parse_pnml(NAMESPACED).unwrap();

        assert_eq!(net.places(), &[1, 2]);
        assert_eq!(net.transitions_len(), 2);
        // labels: +complete stripped, tau collapsed into the silent bucket
        assert_eq!(net.transitions().get("register").unwrap(), &vec![-1]);
        assert_eq!(net.transitions().get(TAU).unwrap(), &vec![-2]);
        assert_eq!(net.edges().len(), 3);
        assert_eq!(net.input_places(-1), vec![1]);
        assert_eq!(net.output_places(-1), vec![2]);
    }

    #[test]
    fn imports_without_namespace() {
        let xml = r#"<pnml>
  <net id="n">
    <transition id="t1"/>
    <place id="p1"/>
    <arc id="a" source="p1" target="t1"/>
  </net>
</pnml>"#;
        let net = parse_pnml(xml).unwrap();

        // no name child: the XML id becomes the label
        assert_eq!(net.transitions().get("t1").unwrap(), &vec![-1]);
        assert_eq!(net.places(), &[1]);
        assert_eq!(net.edges().len(), 1);
    }

    #[test]
    fn transitions_across_pages_keep_document_order() {
        let xml = r#"<pnml>
  <net id="n">
    <page id="one"><transition id="a"/></page>
    <page id="two">
      <page id="nested"><transition id="b"/></page>
      <transition id="c"/>
    </page>
  </net>
</pnml>"#;
        let net = parse_pnml(xml).unwrap();

        assert_eq!(net.transitions().get("a").unwrap(), &vec![-1]);
        assert_eq!(net.transitions().get("b").unwrap(), &vec![-2]);
        assert_eq!(net.transitions().get("c").unwrap(), &vec![-3]);
    }

    #[test]
    fn place_without_id_leaves_a_counter_gap() {
        let xml = r#"<pnml>
  <net id="n">
    <place id="p1"/>
    <place/>
    <place id="p3"/>
  </net>
</pnml>"#;
        let net = parse_pnml(xml).unwrap();

        // the id-less element is a marking annotation but still advances
        // the encounter counter
        assert_eq!(net.places(), &[1, 3]);
    }

    #[test]
    fn missing_net_element_is_invalid() {
        let xml = r#"<pnml><module id="m"/></pnml>"#;
        assert!(matches!(parse_pnml(xml), Err(PnmlError::InvalidFormat)));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(matches!(parse_pnml("<pnml>"), Err(PnmlError::Xml(_))));
    }

    #[test]
    fn arc_with_unknown_endpoint_is_an_error() {
        let xml = r#"<pnml>
  <net id="n">
    <place id="p1"/>
    <transition id="t1"/>
    <arc id="a" source="p1" target="ghost"/>
  </net>
</pnml>"#;
        match parse_pnml(xml) {
            Err(PnmlError::UnknownNode(id)) => assert_eq!(id, "ghost"),
            other => panic!("expected UnknownNode, got {other:?}"),
        }
    }

    #[test]
    fn imported_net_replays() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        let mut net = parse_pnml(NAMESPACED).unwrap();
        net.set_marking(1, 1).unwrap();

        let mut rng = StdRng::seed_from_u64(1);
        let sequence = net.replay_with(&mut rng);
        // register, then the silent transition
        assert_eq!(sequence, vec![-1, -2]);
    }
}
