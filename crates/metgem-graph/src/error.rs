pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("edge references a vertex that does not exist: {vertex} (graph has {vertex_count} vertices)")]
    MissingEndpoint { vertex: usize, vertex_count: usize },

    #[error("vertex index out of range: {vertex} (graph has {vertex_count} vertices)")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    #[error("edge index out of range: {edge} (graph has {edge_count} edges)")]
    EdgeOutOfRange { edge: usize, edge_count: usize },
}
