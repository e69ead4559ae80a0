//! Level presets and terrain generation
//!
//! Chains angled tiles along the noise curve for half the world length,
//! then scatters spike hazards on the same surface. Generation is fully
//! deterministic for a given (preset, RNG) pair.

use glam::Vec2;
use rand::Rng;

use super::noise::NoiseGrid;
use super::terrain::Terrain;
use super::tile::TerrainTile;
use crate::consts::{TILE_LEN, TILE_THICKNESS};

/// Spike bounding box edge length
pub const SPIKE_SIZE: f32 = 26.0;

/// Tunable description of one level
#[derive(Debug, Clone, Copy)]
pub struct LevelSpec {
    /// Total world length; the run clears at half of it
    pub world_len: f32,
    /// Terrain height amplitude
    pub amplitude: f32,
    /// Noise node count across the world
    pub node_count: usize,
    /// Spikes scattered on the surface
    pub spike_count: usize,
    /// Spikes only spawn below this x
    pub spike_span: f32,
}

/// Terrain plus hazards, ready to drop into a game state
#[derive(Debug, Clone)]
pub struct BuiltLevel {
    pub terrain: Terrain,
    pub hazards: Vec<TerrainTile>,
}

impl LevelSpec {
    /// The three shipped levels. Unknown indices fall back to the tutorial.
    pub fn preset(level: u8) -> Self {
        match level {
            2 => Self {
                world_len: 32000.0,
                amplitude: 2000.0,
                node_count: 14,
                spike_count: 5,
                spike_span: 8000.0,
            },
            3 => Self {
                world_len: 16000.0,
                amplitude: 500.0,
                node_count: 14,
                spike_count: 10,
                spike_span: 8000.0,
            },
            _ => Self {
                world_len: 16000.0,
                amplitude: 500.0,
                node_count: 14,
                spike_count: 0,
                spike_span: 0.0,
            },
        }
    }

    /// Build the level's terrain and hazards
    pub fn generate<R: Rng>(&self, rng: &mut R) -> BuiltLevel {
        let noise = NoiseGrid::generate(rng, self.node_count);

        let surface_y = |x: f32| {
            let t = x / self.world_len * self.node_count as f32;
            noise.sample(t) * self.amplitude
        };

        // Chain tiles node-to-node: each spans from the previous sample to
        // the next, tilted to match
        let mut tiles = Vec::new();
        let mut prev_y = surface_y(0.0);
        let mut x = TILE_LEN;
        while x < self.world_len / 2.0 {
            let y = surface_y(x);
            let dy = y - prev_y;
            tiles.push(TerrainTile::new(
                Vec2::new(x, prev_y + dy / 2.0),
                dy.atan2(TILE_LEN).to_degrees(),
                Vec2::new(dy.hypot(TILE_LEN), TILE_THICKNESS),
            ));
            prev_y = y;
            x += TILE_LEN;
        }

        let mut hazards = Vec::with_capacity(self.spike_count);
        for _ in 0..self.spike_count {
            let sx = rng.random_range(0.0..self.spike_span.max(TILE_LEN));
            let sy = surface_y(sx);
            let dy = surface_y(sx + TILE_LEN) - sy;
            hazards.push(TerrainTile::new(
                Vec2::new(sx, sy + 25.0),
                dy.atan2(TILE_LEN).to_degrees(),
                Vec2::new(SPIKE_SIZE, SPIKE_SIZE),
            ));
        }

        BuiltLevel {
            terrain: Terrain::new(tiles),
            hazards,
        }
    }
}
