//! Gradient noise for terrain height sampling
//!
//! A 1D node grid of random gradients in [-1, 1], sampled with the quintic
//! fade curve. Smooth enough for rolling hills, cheap enough to evaluate per
//! tile during level generation.

use rand::Rng;

/// A fixed grid of gradient nodes
#[derive(Debug, Clone)]
pub struct NoiseGrid {
    nodes: Vec<f32>,
}

impl NoiseGrid {
    /// Draw `len` gradients from the level RNG
    pub fn generate<R: Rng>(rng: &mut R, len: usize) -> Self {
        let nodes = (0..len.max(2))
            .map(|_| rng.random_range(-1.0..=1.0))
            .collect();
        Self { nodes }
    }

    /// Build from explicit gradients (tests, fixed layouts)
    pub fn from_nodes(nodes: Vec<f32>) -> Self {
        assert!(nodes.len() >= 2, "noise grid needs at least two nodes");
        Self { nodes }
    }

    /// Height at position `x` on the node grid, in roughly [-1, 1].
    ///
    /// Blends the two neighboring gradients with the quintic fade
    /// 6t⁵ - 15t⁴ + 10t³. Positions past the last node clamp to it.
    pub fn sample(&self, x: f32) -> f32 {
        let last = self.nodes.len() - 2;
        let x0 = (x.floor() as usize).min(last);
        let dx = (x - x0 as f32).clamp(0.0, 1.0);

        let s = 6.0 * dx.powi(5) - 15.0 * dx.powi(4) + 10.0 * dx.powi(3);
        let d0 = self.nodes[x0] * dx;
        let d1 = self.nodes[x0 + 1] * (dx - 1.0);
        (1.0 - s) * d0 + s * d1
    }
}
