//! Seam between the orchestration layer and the force-simulation physics.

use crate::Point;
use metgem_graph::Graph;

/// A force-simulation kernel, consumed as a pure function over one connected
/// subgraph.
///
/// Implementations return one position per subgraph-local vertex (same order as
/// the subgraph's indices). They read edge similarity weights through
/// [`metgem_graph::Graph::edge_weight`] and must tolerate degenerate inputs
/// (zero weights, coincident start positions). Any implementation satisfying
/// this contract is substitutable; [`crate::Fa2Kernel`] is the bundled one.
pub trait ForceKernel {
    fn simulate(
        &self,
        graph: &Graph,
        iterations: u32,
        scaling_ratio: f64,
        node_size: f64,
    ) -> Result<Vec<Point>, KernelError>;
}

/// Failure inside a kernel run. Fatal to the whole layout computation.
#[derive(Debug, thiserror::Error)]
#[error("force kernel failed: {message}")]
pub struct KernelError {
    pub message: String,
}

impl KernelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
