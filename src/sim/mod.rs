//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable contact ordering (by tile index)
//! - No rendering, audio, or platform dependencies

pub mod level;
pub mod noise;
pub mod slope;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod tile;

pub use level::LevelSpec;
pub use noise::NoiseGrid;
pub use slope::{SlopeConfig, SlopeResolver, SlopeResponse};
pub use state::{Actor, DustParticle, GamePhase, GameState, RunOutcome};
pub use terrain::{Contact, Terrain};
pub use tick::{TickInput, tick};
pub use tile::{Aabb, TerrainTile};
