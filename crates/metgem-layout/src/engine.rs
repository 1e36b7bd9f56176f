//! Component decomposition, degenerate placements and shelf packing.

use crate::error::{Error, Result};
use crate::kernel::ForceKernel;
use crate::{Layout, LayoutOptions, Point};
use metgem_graph::Graph;
use metgem_worker::{Outcome, StopFlag};

#[derive(Debug, Clone, Copy)]
struct BoundingBox {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl BoundingBox {
    fn of(points: &[Point]) -> Self {
        let mut bb = Self {
            left: f64::INFINITY,
            top: f64::INFINITY,
            right: f64::NEG_INFINITY,
            bottom: f64::NEG_INFINITY,
        };
        for p in points {
            bb.left = bb.left.min(p.x);
            bb.top = bb.top.min(p.y);
            bb.right = bb.right.max(p.x);
            bb.bottom = bb.bottom.max(p.y);
        }
        bb
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

pub(crate) fn compute(
    graph: &Graph,
    options: &LayoutOptions,
    kernel: &dyn ForceKernel,
    stop: &StopFlag,
    mut on_progress: impl FnMut(usize),
) -> Result<Outcome<Layout>> {
    let radius = options.radius;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(Error::InvalidRadius { radius });
    }
    if stop.is_stopped() {
        return Ok(Outcome::Cancelled);
    }

    let mut positions = vec![Point::ZERO; graph.vertex_count()];

    // Largest component first: packing dense clusters early minimizes wasted
    // canvas. The sort is stable, so ties keep discovery order.
    let mut components = graph.connected_components();
    components.sort_by(|a, b| b.len().cmp(&a.len()));
    tracing::debug!(
        vertices = graph.vertex_count(),
        components = components.len(),
        "starting layout"
    );

    let mut dx = 0.0_f64;
    let mut dy = 0.0_f64;
    let mut max_width = 0.0_f64;
    let mut max_height = 0.0_f64;
    let mut total_count = 0_usize;

    for ids in &components {
        if stop.is_stopped() {
            tracing::debug!(placed = total_count, "layout cancelled");
            return Ok(Outcome::Cancelled);
        }

        let vcount = ids.len();
        let (local, border) = match vcount {
            1 => (vec![Point::ZERO], 2.0 * radius),
            2 => (
                vec![Point::new(0.0, -2.0 * radius), Point::new(0.0, 2.0 * radius)],
                2.0 * radius,
            ),
            _ => {
                let sub = graph.subgraph(ids)?;
                let local = kernel.simulate(&sub, options.iterations, radius, 2.0 * radius)?;
                if local.len() != vcount {
                    return Err(Error::KernelOutputLength {
                        expected: vcount,
                        actual: local.len(),
                    });
                }
                if let Some(vertex) = local
                    .iter()
                    .position(|p| !p.x.is_finite() || !p.y.is_finite())
                {
                    return Err(Error::KernelOutputNotFinite { vertex });
                }
                // Wider margin: the simulation's natural extent is not under our
                // control the way the fixed placements are.
                (local, 5.0 * radius)
            }
        };

        // The bordered box is the packing footprint; the content itself anchors at
        // the cursor, so a lone singleton stays at the origin.
        let bb = BoundingBox::of(&local);
        for (&id, p) in ids.iter().zip(&local) {
            positions[id] = Point::new(p.x + dx - bb.left, p.y + dy - bb.top);
        }

        let width = bb.width() + 2.0 * border;
        let height = bb.height() + 2.0 * border;
        if max_width == 0.0 {
            max_width = width * 2.0;
        }
        dx += width;
        max_height = max_height.max(height);
        if dx >= max_width {
            dx = 0.0;
            dy += max_height;
            max_height = 0.0;
        }

        total_count += vcount;
        tracing::trace!(component = vcount, placed = total_count, "component packed");
        on_progress(total_count);
    }

    Ok(Outcome::Finished(Layout { positions }))
}
