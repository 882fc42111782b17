//! Graphviz DOT rendering of a net.
//!
//! Consumes only the exported representation: label buckets, places in slot
//! order and the edge list. Labeled transitions draw as boxes, silent ones
//! as small filled squares without a label, places as circles.
use std::fmt::Write;

use crate::net::core::PetriNet;
use crate::net::structure::TAU;

pub fn to_dot(net: &PetriNet) -> String {
    let mut dot = String::new();
    let _ = writeln!(&mut dot, "digraph PetriNet {{");
    let _ = writeln!(&mut dot, "    rankdir=LR;");
    let _ = writeln!(&mut dot, "    node [fontname=\"Helvetica\"];");

    for (label, bucket) in net.transitions() {
        if label == TAU {
            continue;
        }
        for &transition in bucket {
            let _ = writeln!(
                &mut dot,
                "    \"{}\" [label=\"{}\", shape=box];",
                transition,
                escape_label(label)
            );
        }
    }

    if let Some(bucket) = net.transitions().get(TAU) {
        for &transition in bucket {
            let _ = writeln!(
                &mut dot,
                "    \"{transition}\" [label=\"\", shape=square, style=filled, fillcolor=black];"
            );
        }
    }

    for (slot, &place) in net.places().iter().enumerate() {
        let _ = writeln!(
            &mut dot,
            "    \"{}\" [label=\"{}\", shape=circle, xlabel=\"{}\"];",
            place,
            place,
            net.marking()[slot]
        );
    }

    for edge in net.edges() {
        let _ = writeln!(&mut dot, "    \"{}\" -> \"{}\";", edge.source, edge.target);
    }

    let _ = writeln!(&mut dot, "}}");
    dot
}

fn escape_label(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nodes_and_edges() {
        let mut net = PetriNet::new();
        net.add_place(1).unwrap();
        net.add_place(2).unwrap();
        let t = net.add_transition("work");
        let silent = net.add_transition("");
        net.add_edge(1, t).unwrap();
        net.add_edge(t, 2).unwrap();
        net.add_edge(2, silent).unwrap();

        let dot = to_dot(&net);

        assert!(dot.contains("\"-1\" [label=\"work\", shape=box];"));
        // silent transitions draw as unlabeled squares
        assert!(dot.contains("\"-2\" [label=\"\", shape=square"));
        assert!(dot.contains("\"1\" [label=\"1\", shape=circle"));
        assert!(dot.contains("\"1\" -> \"-1\";"));
        assert!(dot.contains("\"2\" -> \"-2\";"));
    }

    #[test]
    fn escapes_quotes_in_labels() {
        assert_eq!(escape_label(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_label("a\\b"), "a\\\\b");
    }
}
