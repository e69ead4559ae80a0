//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. A whole run rebuilds from
//! `(level, seed)`, so nothing in this file touches the file system.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::LevelSpec;
use super::slope::SlopeResolver;
use super::terrain::Terrain;
use super::tile::{Aabb, TerrainTile};
use crate::consts::*;

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Reached the end of the world (or dropped out past the bottom)
    Cleared,
    /// Health ran out
    Wrecked,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Paused,
    Complete(RunOutcome),
}

/// The player-controlled sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    /// -1 facing left, 1 facing right
    pub facing: i8,
    /// On terrain this tick (re-evaluated every tick)
    pub grounded: bool,
    /// Moving fast enough for the walk animation
    pub walking: bool,
    /// Bounding box (width, height)
    pub size: Vec2,
    /// Horizontal drag multiplier on flat ground
    pub friction: f32,
    /// Per-tick velocity bleed while airborne
    pub air_friction: f32,
    /// Grounded speed cap (units/s)
    pub speed_cap: f32,
    /// Speed at the start of the current tick, for the brake audio cue
    pub prev_speed: f32,
}

impl Actor {
    /// Spawn above the terrain, already falling
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(400.0, 500.0),
            vel: Vec2::new(0.0, -200.0),
            facing: 1,
            grounded: false,
            walking: false,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
            friction: 0.95,
            air_friction: 0.00005,
            speed_cap: 2000.0,
            prev_speed: 0.0,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.size.y * 0.5
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// A short-lived dust puff kicked up at the actor's heels
#[derive(Debug, Clone, Copy)]
pub struct DustParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: f32,
    pub lifetime: f32,
}

impl DustParticle {
    /// Advance and report whether the particle is still alive
    pub fn update(&mut self, dt: f32) -> bool {
        self.age += dt;
        self.pos += self.vel * dt;
        self.vel.x *= 0.95;
        self.vel.y *= 0.9;
        self.age < self.lifetime
    }

    /// Fade fraction in [0, 1] for the renderer
    pub fn opacity(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Hard cap on live dust particles
pub const MAX_DUST_PARTICLES: usize = 256;

/// Complete per-run state, rebuilt deterministically from (level, seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Level preset index (1-based)
    pub level: u8,
    /// RNG for level generation and dust scatter
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player health
    pub health: i32,
    /// Seconds of spike immunity remaining
    pub invuln_secs: f32,
    /// Current phase
    pub phase: GamePhase,
    /// The player
    pub actor: Actor,
    /// Static level terrain
    pub terrain: Terrain,
    /// Spike tiles (damage on touch)
    pub hazards: Vec<TerrainTile>,
    /// World length; crossing half of it clears the run
    pub world_len: f32,
    /// Velocity resolution tuning for this level
    pub resolver: SlopeResolver,
    /// Visual-only dust (never gameplay-affecting)
    pub particles: Vec<DustParticle>,
    /// Accumulator for dust emission spacing
    pub(crate) dust_timer: f32,
}

impl GameState {
    /// Build a fresh run for the given level preset and seed
    pub fn new(level: u8, seed: u64) -> Self {
        let spec = LevelSpec::preset(level);
        let mut rng = Pcg32::seed_from_u64(seed);
        let built = spec.generate(&mut rng);
        log::info!(
            "level {} ready: {} tiles, {} spikes, world_len {}",
            level,
            built.terrain.len(),
            built.hazards.len(),
            spec.world_len
        );

        Self {
            seed,
            level,
            rng,
            time_ticks: 0,
            health: 100,
            invuln_secs: 0.0,
            phase: GamePhase::Playing,
            actor: Actor::spawn(),
            terrain: built.terrain,
            hazards: built.hazards,
            world_len: spec.world_len,
            resolver: SlopeResolver::default(),
            particles: Vec::new(),
            dust_timer: 0.0,
        }
    }

    /// Elapsed run time in seconds
    #[inline]
    pub fn time_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Restart the same run from scratch
    pub fn reset(&mut self) {
        *self = Self::new(self.level, self.seed);
    }

    /// The finish line on x (half the world length)
    #[inline]
    pub fn finish_x(&self) -> f32 {
        self.world_len / 2.0
    }
}
