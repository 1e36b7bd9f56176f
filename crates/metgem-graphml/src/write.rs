//! GraphML writing.
//!
//! Emits the same shape the parser reads: key declarations inferred from
//! attribute values, one undirected `<graph>`, nodes identified by their `name`
//! attribute when present (`n{index}` otherwise).

use crate::error::Result;
use crate::{NAMESPACE_URI, SCHEMA_LOCATION, XSI_URI};
use indexmap::IndexMap;
use metgem_graph::{AttrValue, Graph};
use std::fmt::Write as _;
use std::path::Path;

/// Serializes `graph` as a GraphML document.
pub fn to_string(graph: &Graph) -> String {
    let graph_keys = collect_keys(std::iter::once(graph.attrs()));
    let node_keys = collect_keys((0..graph.vertex_count()).filter_map(|v| graph.vertex_attrs(v)));
    let edge_keys = collect_keys(graph.edges().map(|e| &e.attrs));

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<graphml xmlns=\"{NAMESPACE_URI}\" xmlns:xsi=\"{XSI_URI}\" xsi:schemaLocation=\"{SCHEMA_LOCATION}\">"
    );

    for (prefix, keys) in [("g", &graph_keys), ("v", &node_keys), ("e", &edge_keys)] {
        let domain = match prefix {
            "g" => "graph",
            "v" => "node",
            _ => "edge",
        };
        for (name, ty) in keys {
            let _ = writeln!(
                out,
                "  <key id=\"{prefix}_{id}\" for=\"{domain}\" attr.name=\"{id}\" attr.type=\"{ty}\"/>",
                id = escape(name),
            );
        }
    }

    out.push_str("  <graph id=\"G\" edgedefault=\"undirected\">\n");

    for (name, value) in graph.attrs().iter() {
        if graph_keys.contains_key(name) {
            push_data(&mut out, "    ", "g", name, value);
        }
    }

    for v in 0..graph.vertex_count() {
        let _ = writeln!(out, "    <node id=\"{}\">", escape(&node_id(graph, v)));
        if let Some(bag) = graph.vertex_attrs(v) {
            for (name, value) in bag.iter() {
                if node_keys.contains_key(name) {
                    push_data(&mut out, "      ", "v", name, value);
                }
            }
        }
        out.push_str("    </node>\n");
    }

    for edge in graph.edges() {
        let _ = writeln!(
            out,
            "    <edge source=\"{}\" target=\"{}\">",
            escape(&node_id(graph, edge.source)),
            escape(&node_id(graph, edge.target)),
        );
        for (name, value) in edge.attrs.iter() {
            if edge_keys.contains_key(name) {
                push_data(&mut out, "      ", "e", name, value);
            }
        }
        out.push_str("    </edge>\n");
    }

    out.push_str("  </graph>\n</graphml>\n");
    out
}

/// Writes `graph` as a GraphML file.
pub fn write_file(graph: &Graph, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, to_string(graph))?;
    Ok(())
}

/// Key table for one domain: attribute name to declared type, first occurrence
/// wins, declaration order follows attribute order.
fn collect_keys<'a>(
    bags: impl Iterator<Item = &'a metgem_graph::AttrBag>,
) -> IndexMap<String, &'static str> {
    let mut keys: IndexMap<String, &'static str> = IndexMap::new();
    for bag in bags {
        for (name, value) in bag.iter() {
            keys.entry(name.to_string()).or_insert(type_name(value));
        }
    }
    keys
}

fn type_name(value: &AttrValue) -> &'static str {
    match value {
        AttrValue::Bool(_) => "boolean",
        AttrValue::Int(_) => "long",
        AttrValue::Float(_) => "double",
        AttrValue::Str(_) => "string",
    }
}

/// Node ids come from the `name` attribute when one exists (floats collapse to
/// their integral part, as the application stores spectrum indices that way).
fn node_id(graph: &Graph, vertex: usize) -> String {
    match graph.vertex_attr(vertex, "name") {
        Some(AttrValue::Str(s)) => s.clone(),
        Some(AttrValue::Int(i)) => i.to_string(),
        Some(AttrValue::Float(f)) => (*f as i64).to_string(),
        Some(AttrValue::Bool(b)) => b.to_string(),
        None => format!("n{vertex}"),
    }
}

fn push_data(out: &mut String, indent: &str, prefix: &str, name: &str, value: &AttrValue) {
    let _ = writeln!(
        out,
        "{indent}<data key=\"{prefix}_{id}\">{text}</data>",
        id = escape(name),
        text = escape(&value_text(value)),
    );
}

fn value_text(value: &AttrValue) -> String {
    match value {
        AttrValue::Bool(b) => b.to_string(),
        AttrValue::Int(i) => i.to_string(),
        AttrValue::Float(f) => f.to_string(),
        AttrValue::Str(s) => s.clone(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
