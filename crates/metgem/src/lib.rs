#![forbid(unsafe_code)]

//! Headless core of the MetGem molecular-network visualizer.
//!
//! The GUI application loads mass-spectrometry similarity networks, lays them
//! out and renders them; this workspace carries everything below the widgets:
//!
//! - [`graph`]: attributed undirected graph model
//! - [`graphml`]: GraphML parse/write
//! - [`layout`]: cluster-aware force-directed layout engine
//! - [`worker`]: cooperative progress/cancellation protocol

pub use metgem_graph as graph;
pub use metgem_graphml as graphml;
pub use metgem_layout as layout;
pub use metgem_worker as worker;

pub use metgem_graph::{AttrBag, AttrValue, Graph, WEIGHT_KEY};
pub use metgem_layout::{Fa2Kernel, Layout, LayoutOptions, LayoutWorker, Point, compute_layout};
pub use metgem_worker::{Outcome, StopFlag, WorkerSet, spawn, spawn_in};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] metgem_graph::Error),
    #[error(transparent)]
    GraphMl(#[from] metgem_graphml::Error),
    #[error(transparent)]
    Layout(#[from] metgem_layout::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses a GraphML document and lays it out synchronously with the bundled
/// ForceAtlas2 kernel.
///
/// Convenience for scripts and tests; interactive callers should prefer a
/// [`LayoutWorker`] on a background thread.
pub fn layout_graphml(xml: &str, options: &LayoutOptions) -> Result<Layout> {
    let graph = metgem_graphml::parse_str(xml)?;
    let outcome = compute_layout(
        &graph,
        options,
        &Fa2Kernel::default(),
        &StopFlag::new(),
        |_| {},
    )?;
    match outcome {
        Outcome::Finished(layout) => Ok(layout),
        // The stop flag is private to this call, so cancellation cannot happen.
        Outcome::Cancelled => unreachable!("layout cancelled without a caller-visible stop flag"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphml_document_lays_out_end_to_end() {
        let xml = r#"<graphml>
          <key id="e_w" for="edge" attr.name="__weight" attr.type="double"/>
          <graph edgedefault="undirected">
            <node id="a"/><node id="b"/><node id="c"/><node id="d"/>
            <edge source="a" target="b"><data key="e_w">0.9</data></edge>
            <edge source="b" target="c"><data key="e_w">0.7</data></edge>
          </graph>
        </graphml>"#;
        let layout = layout_graphml(
            xml,
            &LayoutOptions {
                iterations: 50,
                ..LayoutOptions::default()
            },
        )
        .unwrap();
        assert_eq!(layout.len(), 4);
        assert!(layout.positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }
}
