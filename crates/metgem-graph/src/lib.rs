#![forbid(unsafe_code)]

//! Attributed undirected graph model used by the MetGem layout core.
//!
//! Vertices are dense integer indices (`0..N-1`), stable for the lifetime of the
//! graph. Vertices, edges and the graph itself each carry an [`AttrBag`] of typed
//! attributes; keys prefixed with `__` are reserved for engine bookkeeping (the
//! similarity weight under [`WEIGHT_KEY`] being the main one).

pub mod alg;
pub mod attrs;
pub mod error;

pub use attrs::{AttrBag, AttrValue};
pub use error::{Error, Result};

/// Reserved edge attribute holding the similarity weight read by the layout force model.
pub const WEIGHT_KEY: &str = "__weight";

/// Weight assumed for edges that carry no [`WEIGHT_KEY`] attribute.
pub const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub attrs: AttrBag,
}

/// Undirected graph with dense vertex indices and per-entity attribute bags.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    attrs: AttrBag,
    vertices: Vec<AttrBag>,
    edges: Vec<Edge>,
    // Incidence lists; one `(neighbor, edge index)` entry per edge end.
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn add_vertex(&mut self) -> usize {
        self.vertices.push(AttrBag::new());
        self.adjacency.push(Vec::new());
        self.vertices.len() - 1
    }

    /// Appends `count` vertices, returning the index of the first one.
    pub fn add_vertices(&mut self, count: usize) -> usize {
        let first = self.vertices.len();
        for _ in 0..count {
            self.add_vertex();
        }
        first
    }

    /// Adds an undirected edge between two existing vertices and returns its index.
    ///
    /// Parallel edges and self-loops are permitted, matching the permissiveness of
    /// the GraphML sources the graph is loaded from.
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<usize> {
        for v in [source, target] {
            if v >= self.vertices.len() {
                return Err(Error::MissingEndpoint {
                    vertex: v,
                    vertex_count: self.vertices.len(),
                });
            }
        }
        let index = self.edges.len();
        self.edges.push(Edge {
            source,
            target,
            attrs: AttrBag::new(),
        });
        self.adjacency[source].push((target, index));
        if source != target {
            self.adjacency[target].push((source, index));
        }
        Ok(index)
    }

    /// Adds an edge carrying a similarity weight under [`WEIGHT_KEY`].
    pub fn add_weighted_edge(&mut self, source: usize, target: usize, weight: f64) -> Result<usize> {
        let index = self.add_edge(source, target)?;
        self.edges[index]
            .attrs
            .set(WEIGHT_KEY, AttrValue::Float(weight));
        Ok(index)
    }

    pub fn edge(&self, index: usize) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Neighbors of `vertex` in edge insertion order. A self-loop contributes the
    /// vertex itself once.
    pub fn neighbors(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency
            .get(vertex)
            .into_iter()
            .flatten()
            .map(|&(neighbor, _)| neighbor)
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency.get(vertex).map_or(0, Vec::len)
    }

    /// `(neighbor, edge index)` pairs incident to `vertex`.
    pub fn incident_edges(&self, vertex: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.get(vertex).into_iter().flatten().copied()
    }

    /// Similarity weight of an edge; [`DEFAULT_WEIGHT`] when the attribute is absent
    /// or not numeric.
    pub fn edge_weight(&self, index: usize) -> f64 {
        self.edges
            .get(index)
            .and_then(|e| e.attrs.get(WEIGHT_KEY))
            .and_then(AttrValue::as_f64)
            .unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: AttrValue) {
        self.attrs.set(key, value);
    }

    pub fn attrs(&self) -> &AttrBag {
        &self.attrs
    }

    pub fn vertex_attr(&self, vertex: usize, key: &str) -> Option<&AttrValue> {
        self.vertices.get(vertex).and_then(|bag| bag.get(key))
    }

    pub fn set_vertex_attr(
        &mut self,
        vertex: usize,
        key: impl Into<String>,
        value: AttrValue,
    ) -> Result<()> {
        let vertex_count = self.vertices.len();
        let bag = self
            .vertices
            .get_mut(vertex)
            .ok_or(Error::VertexOutOfRange {
                vertex,
                vertex_count,
            })?;
        bag.set(key, value);
        Ok(())
    }

    pub fn vertex_attrs(&self, vertex: usize) -> Option<&AttrBag> {
        self.vertices.get(vertex)
    }

    pub fn edge_attr(&self, edge: usize, key: &str) -> Option<&AttrValue> {
        self.edges.get(edge).and_then(|e| e.attrs.get(key))
    }

    pub fn set_edge_attr(
        &mut self,
        edge: usize,
        key: impl Into<String>,
        value: AttrValue,
    ) -> Result<()> {
        let edge_count = self.edges.len();
        let entry = self.edges.get_mut(edge).ok_or(Error::EdgeOutOfRange {
            edge,
            edge_count,
        })?;
        entry.attrs.set(key, value);
        Ok(())
    }

    /// Connected components in discovery order; see [`alg::connected_components`].
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        alg::connected_components(self)
    }

    /// Induced subgraph over `ids`. Local vertex `i` corresponds to `ids[i]`; edges
    /// with both endpoints in `ids` are kept with their attributes, as are vertex
    /// and graph attributes.
    pub fn subgraph(&self, ids: &[usize]) -> Result<Graph> {
        use rustc_hash::FxHashMap;

        let mut local: FxHashMap<usize, usize> = FxHashMap::default();
        let mut sub = Graph {
            attrs: self.attrs.clone(),
            ..Graph::default()
        };
        for (i, &id) in ids.iter().enumerate() {
            let bag = self
                .vertices
                .get(id)
                .ok_or(Error::VertexOutOfRange {
                    vertex: id,
                    vertex_count: self.vertices.len(),
                })?;
            sub.vertices.push(bag.clone());
            sub.adjacency.push(Vec::new());
            local.insert(id, i);
        }
        for edge in &self.edges {
            let (Some(&s), Some(&t)) = (local.get(&edge.source), local.get(&edge.target)) else {
                continue;
            };
            let index = sub.edges.len();
            sub.edges.push(Edge {
                source: s,
                target: t,
                attrs: edge.attrs.clone(),
            });
            sub.adjacency[s].push((t, index));
            if s != t {
                sub.adjacency[t].push((s, index));
            }
        }
        Ok(sub)
    }
}
