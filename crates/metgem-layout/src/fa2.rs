//! Bundled ForceAtlas2 kernel.
//!
//! Degree-weighted linear repulsion, similarity-weight-proportional attraction,
//! weak gravity and the adaptive swinging/traction speed scheme of ForceAtlas2
//! (Jacomy et al. 2014). The upstream application delegated this to the `fa2`
//! package, which relies on unseeded randomness; here the initial scatter and
//! coincidence jitter come from a seeded xorshift generator, so a fixed seed
//! makes the whole simulation reproducible.

use crate::Point;
use crate::kernel::{ForceKernel, KernelError};
use metgem_graph::Graph;

#[derive(Debug, Clone)]
pub struct Fa2Options {
    /// Seed for deterministic randomness (initial placement and jitter).
    pub seed: u64,
    /// Gravity pulling vertices toward the component origin; keeps loosely
    /// connected satellites from drifting away.
    pub gravity: f64,
    /// Tolerance of the adaptive speed heuristic to per-iteration swinging.
    pub jitter_tolerance: f64,
}

impl Default for Fa2Options {
    fn default() -> Self {
        Self {
            seed: 0,
            gravity: 1.0,
            jitter_tolerance: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Fa2Kernel {
    pub options: Fa2Options,
}

impl Fa2Kernel {
    pub fn new(options: Fa2Options) -> Self {
        Self { options }
    }
}

impl ForceKernel for Fa2Kernel {
    fn simulate(
        &self,
        graph: &Graph,
        iterations: u32,
        scaling_ratio: f64,
        node_size: f64,
    ) -> Result<Vec<Point>, KernelError> {
        if !scaling_ratio.is_finite() || scaling_ratio <= 0.0 {
            return Err(KernelError::new(format!(
                "invalid scaling ratio: {scaling_ratio}"
            )));
        }

        let n = graph.vertex_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut rng = XorShift64Star::new(self.options.seed);
        let degree: Vec<f64> = (0..n).map(|v| graph.degree(v) as f64).collect();

        // Initial scatter sized so the expected density is independent of n.
        let spread = node_size.max(1.0) * (n as f64).sqrt();
        let mut pos: Vec<Point> = (0..n)
            .map(|_| {
                Point::new(
                    rng.next_f64_signed() * spread,
                    rng.next_f64_signed() * spread,
                )
            })
            .collect();

        let mut prev: Vec<Point> = vec![Point::ZERO; n];
        let mut swing: Vec<f64> = vec![0.0; n];
        let mut speed = 1.0_f64;

        for _ in 0..iterations {
            let mut force: Vec<Point> = vec![Point::ZERO; n];

            // Repulsion, degree-weighted; boosted without distance falloff while
            // two nodes overlap (the adjustSizes behavior).
            for i in 0..n {
                for j in (i + 1)..n {
                    let mut dx = pos[i].x - pos[j].x;
                    let mut dy = pos[i].y - pos[j].y;
                    if dx == 0.0 && dy == 0.0 {
                        dx = rng.next_f64_signed() * 0.01 * node_size.max(1.0);
                        dy = rng.next_f64_signed() * 0.01 * node_size.max(1.0);
                    }
                    let d = (dx * dx + dy * dy).sqrt().max(1e-9);
                    let mass = (degree[i] + 1.0) * (degree[j] + 1.0);
                    let factor = if d < node_size {
                        scaling_ratio * mass * 10.0 / d
                    } else {
                        scaling_ratio * mass / (d * d)
                    };
                    force[i].x += dx * factor;
                    force[i].y += dy * factor;
                    force[j].x -= dx * factor;
                    force[j].y -= dy * factor;
                }
            }

            // Attraction along edges, proportional to the similarity weight.
            for (index, edge) in graph.edges().enumerate() {
                if edge.source == edge.target {
                    continue;
                }
                let weight = graph.edge_weight(index);
                let dx = pos[edge.source].x - pos[edge.target].x;
                let dy = pos[edge.source].y - pos[edge.target].y;
                force[edge.source].x -= dx * weight;
                force[edge.source].y -= dy * weight;
                force[edge.target].x += dx * weight;
                force[edge.target].y += dy * weight;
            }

            // Gravity toward the local origin.
            for i in 0..n {
                let d = (pos[i].x * pos[i].x + pos[i].y * pos[i].y).sqrt();
                if d > 0.0 {
                    let factor = self.options.gravity * (degree[i] + 1.0) / d;
                    force[i].x -= pos[i].x * factor;
                    force[i].y -= pos[i].y * factor;
                }
            }

            // Adaptive global speed: swinging (oscillation) slows the simulation
            // down, traction (consistent motion) lets it accelerate.
            let mut total_swing = 0.0;
            let mut total_traction = 0.0;
            for i in 0..n {
                let mass = degree[i] + 1.0;
                let s = hypot(force[i].x - prev[i].x, force[i].y - prev[i].y);
                let t = 0.5 * hypot(force[i].x + prev[i].x, force[i].y + prev[i].y);
                swing[i] = s;
                total_swing += mass * s;
                total_traction += mass * t;
            }
            if total_swing > 0.0 {
                let target =
                    self.options.jitter_tolerance.powi(2) * total_traction / total_swing;
                // Never grow by more than 50% per iteration.
                speed += (target - speed).min(0.5 * speed);
            }

            for i in 0..n {
                let magnitude = hypot(force[i].x, force[i].y);
                let mut node_speed = 0.1 * speed / (1.0 + speed * swing[i].sqrt());
                if magnitude > 0.0 {
                    node_speed = node_speed.min(10.0 / magnitude);
                }
                pos[i].x += force[i].x * node_speed;
                pos[i].y += force[i].y * node_speed;
            }

            std::mem::swap(&mut prev, &mut force);
        }

        Ok(pos)
    }
}

fn hypot(x: f64, y: f64) -> f64 {
    (x * x + y * y).sqrt()
}

struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    fn new(seed: u64) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Map to [-1, 1] (exclusive).
    fn next_f64_signed(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        let v = (u as f64) / ((1u64 << 53) as f64);
        (v * 2.0) - 1.0
    }
}
