use crate::kernel::KernelError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout radius: {radius} (must be positive and finite)")]
    InvalidRadius { radius: f64 },

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(
        "force kernel returned {actual} positions for a component of {expected} vertices"
    )]
    KernelOutputLength { expected: usize, actual: usize },

    #[error("force kernel returned a non-finite coordinate for local vertex {vertex}")]
    KernelOutputNotFinite { vertex: usize },

    #[error(transparent)]
    Graph(#[from] metgem_graph::Error),
}
