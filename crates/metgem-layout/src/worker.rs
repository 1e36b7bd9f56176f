//! Background layout computation over the worker protocol.

use crate::error::Error;
use crate::fa2::Fa2Kernel;
use crate::kernel::ForceKernel;
use crate::{Layout, LayoutOptions, compute_layout};
use metgem_graph::Graph;
use metgem_worker::{Outcome, Worker, WorkerContext};

/// A layout run packaged as a [`metgem_worker::Worker`].
///
/// Owns a snapshot of the graph, so the caller's copy stays free for mutation
/// while the run is in flight. Progress counts (vertices placed) stream through
/// the worker's progress channel after each packed component.
#[derive(Debug)]
pub struct LayoutWorker<K = Fa2Kernel> {
    graph: Graph,
    options: LayoutOptions,
    kernel: K,
}

impl LayoutWorker<Fa2Kernel> {
    pub fn new(graph: Graph, options: LayoutOptions) -> Self {
        Self::with_kernel(graph, options, Fa2Kernel::default())
    }
}

impl<K: ForceKernel> LayoutWorker<K> {
    pub fn with_kernel(graph: Graph, options: LayoutOptions, kernel: K) -> Self {
        Self {
            graph,
            options,
            kernel,
        }
    }
}

impl<K: ForceKernel + Send + 'static> Worker for LayoutWorker<K> {
    type Output = Layout;
    type Error = Error;

    fn run(&mut self, ctx: &WorkerContext) -> Result<Outcome<Layout>, Error> {
        compute_layout(
            &self.graph,
            &self.options,
            &self.kernel,
            ctx.stop_flag(),
            |count| ctx.report(count),
        )
    }
}
