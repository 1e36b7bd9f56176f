#![forbid(unsafe_code)]

//! Cluster-aware force-directed layout engine.
//!
//! A molecular similarity network is usually a forest of disconnected clusters:
//! edges only exist inside a cluster, so cross-cluster forces are meaningless and
//! a single unconstrained simulation would let unrelated clusters drift
//! arbitrarily. The engine therefore decomposes the graph into connected
//! components, lays each one out independently (trivial placements for one- and
//! two-vertex components, a [`ForceKernel`] run otherwise) and shelf-packs the
//! per-component layouts, largest first, into one non-overlapping arrangement.
//!
//! Progress is reported per component (cumulative vertices placed) and
//! cancellation is cooperative, observed only at component boundaries; a
//! cancelled run surfaces no partial coordinates.

mod engine;
pub mod error;
pub mod fa2;
pub mod kernel;
pub mod worker;

pub use error::{Error, Result};
pub use fa2::{Fa2Kernel, Fa2Options};
pub use kernel::{ForceKernel, KernelError};
pub use worker::LayoutWorker;

use metgem_graph::Graph;
use metgem_worker::{Outcome, StopFlag};
use serde::{Deserialize, Serialize};

/// Default node spacing radius, matching the application default.
pub const DEFAULT_RADIUS: f64 = 30.0;

/// Default iteration budget per simulated component.
pub const DEFAULT_ITERATIONS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One 2D coordinate per vertex, indexed by the original graph vertex index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub positions: Vec<Point>,
}

impl Layout {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, vertex: usize) -> Option<Point> {
        self.positions.get(vertex).copied()
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Node spacing radius. Also drives the physics scaling ratio, the simulated
    /// node size (`2 * radius`) and the inter-cluster border widths.
    pub radius: f64,
    /// Iteration budget handed to the force kernel for each simulated component.
    pub iterations: u32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// Lays out `graph` and packs its components into a single arrangement.
///
/// The graph must not be mutated for the duration of the call; callers handing
/// the computation to another thread should clone a snapshot first (see
/// [`LayoutWorker`]). `on_progress` receives the cumulative number of vertices
/// placed after each component.
///
/// Returns [`Outcome::Cancelled`] when `stop` was raised before the run or at a
/// component boundary; kernel failures abort the whole run as errors.
pub fn compute_layout(
    graph: &Graph,
    options: &LayoutOptions,
    kernel: &dyn ForceKernel,
    stop: &StopFlag,
    on_progress: impl FnMut(usize),
) -> Result<Outcome<Layout>> {
    engine::compute(graph, options, kernel, stop, on_progress)
}
