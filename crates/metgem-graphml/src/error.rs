pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("GraphML document has no <graph> element")]
    MissingGraphElement,

    #[error("<node> element is missing its id attribute")]
    MissingNodeId,

    #[error("<edge> element is missing its {attribute} attribute")]
    MissingEdgeEndpoint { attribute: &'static str },

    #[error("edge references an unknown vertex: {id}")]
    UnknownEndpoint { id: String },

    #[error(transparent)]
    Graph(#[from] metgem_graph::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
