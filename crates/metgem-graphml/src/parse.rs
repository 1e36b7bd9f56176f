//! GraphML reading.

use crate::error::{Error, Result};
use metgem_graph::{AttrValue, Graph};
use roxmltree::{Document, Node};
use rustc_hash::FxHashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyDomain {
    Graph,
    Node,
    Edge,
    All,
}

impl KeyDomain {
    fn covers(self, other: KeyDomain) -> bool {
        self == KeyDomain::All || self == other
    }
}

#[derive(Debug, Clone, Copy)]
enum KeyType {
    Boolean,
    Integer,
    Double,
    String,
}

#[derive(Debug, Clone)]
struct KeyDef {
    domain: KeyDomain,
    name: String,
    ty: KeyType,
}

/// Parses a GraphML document from a string.
pub fn parse_str(xml: &str) -> Result<Graph> {
    let doc = Document::parse(xml)?;
    parse_document(&doc)
}

/// Parses a GraphML document from a file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Graph> {
    let xml = std::fs::read_to_string(path)?;
    parse_str(&xml)
}

fn parse_document(doc: &Document) -> Result<Graph> {
    let root = doc.root_element();

    // Key declarations define the value type of every <data> element.
    let mut keys: FxHashMap<String, KeyDef> = FxHashMap::default();
    for key in children(root, "key") {
        let (Some(id), Some(name)) = (key.attribute("id"), key.attribute("attr.name")) else {
            continue;
        };
        let domain = match key.attribute("for") {
            Some("graph") => KeyDomain::Graph,
            Some("node") => KeyDomain::Node,
            Some("edge") => KeyDomain::Edge,
            _ => KeyDomain::All,
        };
        let ty = match key.attribute("attr.type") {
            Some("boolean") => KeyType::Boolean,
            Some("int") | Some("long") => KeyType::Integer,
            Some("float") | Some("double") => KeyType::Double,
            _ => KeyType::String,
        };
        keys.insert(
            id.to_string(),
            KeyDef {
                domain,
                name: name.to_string(),
                ty,
            },
        );
    }

    let graph_el = children(root, "graph")
        .next()
        .ok_or(Error::MissingGraphElement)?;

    let mut graph = Graph::new();

    for (def, value) in typed_data(graph_el, &keys, KeyDomain::Graph) {
        graph.set_attr(def.name.clone(), value);
    }

    // Nodes in document order become dense vertex indices. Edges may reference a
    // node by its XML id or by the value of its `name` attribute.
    let mut by_id: FxHashMap<String, usize> = FxHashMap::default();
    let mut by_name: FxHashMap<String, usize> = FxHashMap::default();
    for node in children(graph_el, "node") {
        let id = node.attribute("id").ok_or(Error::MissingNodeId)?;
        let vertex = graph.add_vertex();
        by_id.insert(id.to_string(), vertex);
        for (def, value) in typed_data(node, &keys, KeyDomain::Node) {
            if def.name == "name" {
                by_name.insert(value_to_id(&value), vertex);
            }
            graph.set_vertex_attr(vertex, def.name.clone(), value)?;
        }
    }

    for edge in children(graph_el, "edge") {
        let source = endpoint(edge, "source", &by_id, &by_name)?;
        let target = endpoint(edge, "target", &by_id, &by_name)?;
        let index = graph.add_edge(source, target)?;
        for (def, value) in typed_data(edge, &keys, KeyDomain::Edge) {
            graph.set_edge_attr(index, def.name.clone(), value)?;
        }
    }

    Ok(graph)
}

fn children<'a, 'input>(
    parent: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    parent
        .children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn typed_data<'a, 'input, 'k>(
    parent: Node<'a, 'input>,
    keys: &'k FxHashMap<String, KeyDef>,
    domain: KeyDomain,
) -> impl Iterator<Item = (&'k KeyDef, AttrValue)> {
    children(parent, "data").filter_map(move |data| {
        let def = keys.get(data.attribute("key")?)?;
        if !def.domain.covers(domain) {
            return None;
        }
        Some((def, convert(def.ty, data.text().unwrap_or(""))))
    })
}

/// Converts a data payload according to its declared type. Malformed numerics
/// degrade to zero instead of poisoning the whole document.
fn convert(ty: KeyType, text: &str) -> AttrValue {
    let trimmed = text.trim();
    match ty {
        KeyType::Boolean => {
            AttrValue::Bool(trimmed.eq_ignore_ascii_case("true") || trimmed == "1")
        }
        KeyType::Integer => AttrValue::Int(trimmed.parse().unwrap_or(0)),
        KeyType::Double => AttrValue::Float(trimmed.parse().unwrap_or(0.0)),
        KeyType::String => AttrValue::Str(text.to_string()),
    }
}

/// Canonical id form of a `name` attribute value, for endpoint lookup.
fn value_to_id(value: &AttrValue) -> String {
    match value {
        AttrValue::Str(s) => s.clone(),
        AttrValue::Int(i) => i.to_string(),
        AttrValue::Float(f) => (*f as i64).to_string(),
        AttrValue::Bool(b) => b.to_string(),
    }
}

fn endpoint(
    edge: Node<'_, '_>,
    attribute: &'static str,
    by_id: &FxHashMap<String, usize>,
    by_name: &FxHashMap<String, usize>,
) -> Result<usize> {
    let raw = edge
        .attribute(attribute)
        .ok_or(Error::MissingEdgeEndpoint { attribute })?;
    by_id
        .get(raw)
        .or_else(|| by_name.get(raw))
        .copied()
        .ok_or_else(|| Error::UnknownEndpoint { id: raw.to_string() })
}
