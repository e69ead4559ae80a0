//! Surf Dash - a slope-surfing platformer prototype
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, slope physics, game state)
//! - `camera`: Smoothed follow camera consumed by the window layer
//! - `audio`: Maps sim state to per-channel volume/pitch levels
//! - `stats`: On-disk run log
//! - `settings`: Player preferences

pub mod audio;
pub mod camera;
pub mod settings;
pub mod sim;
pub mod stats;

pub use settings::Settings;
pub use stats::RunLog;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Gravity strength (per-frame units, multiplied by FRAME_SCALE)
    pub const GRAVITY: f32 = 12.0;
    /// Frame-rate normalization constant applied to gravity
    pub const FRAME_SCALE: f32 = 60.0;
    /// Terminal fall speed (units/s, positive magnitude)
    pub const MAX_FALL_SPEED: f32 = 800.0;

    /// Actor bounding box
    pub const ACTOR_WIDTH: f32 = 32.0;
    pub const ACTOR_HEIGHT: f32 = 32.0;

    /// Ground movement acceleration (units/s²)
    pub const MOVE_ACCEL: f32 = 1000.0;
    /// Dive boost acceleration along facing (units/s²)
    pub const BOOST_ACCEL: f32 = 1000.0;
    /// Jump launch speed (units/s)
    pub const JUMP_SPEED: f32 = 400.0;
    /// Fraction of ground acceleration available while airborne
    pub const AIR_CONTROL: f32 = 0.0;

    /// Terrain tile length along the surface
    pub const TILE_LEN: f32 = 64.0;
    /// Terrain tile thickness
    pub const TILE_THICKNESS: f32 = 16.0;

    /// Contacts flatter than this (degrees) count as level ground
    pub const FLAT_ANGLE_EPS: f32 = 0.1;
    /// Hard cap on the penetration nudge loop
    pub const MAX_NUDGE_STEPS: u32 = 256;

    /// Spike hazards
    pub const SPIKE_DAMAGE: i32 = 20;
    pub const INVULN_SECS: f32 = 3.0;

    /// Falling past this y ends the run (the drop-out finish)
    pub const FALL_OUT_Y: f32 = -500.0;
}

/// Remap a value from one range to another (no clamping)
#[inline]
pub fn remap(value: f32, old_min: f32, old_max: f32, new_min: f32, new_max: f32) -> f32 {
    (value - old_min) * (new_max - new_min) / (old_max - old_min) + new_min
}

/// Rotate a vector by `angle` radians (counter-clockwise)
#[inline]
pub fn rotate_vec(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
