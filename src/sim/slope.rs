//! Slope-projection velocity resolution
//!
//! The surf core: given a contact's signed surface angle and the actor's
//! velocity, remove the into-surface component, feed gravity back in along
//! the slope tangent, then either damp the result or promote the actor off
//! the surface when it carries enough speed.

use glam::Vec2;

use crate::consts::{FRAME_SCALE, GRAVITY};
use crate::remap;

/// Tuning knobs for the resolver, per level if desired
#[derive(Debug, Clone, Copy)]
pub struct SlopeConfig {
    /// Gravity strength (per-frame units)
    pub gravity: f32,
    /// Frame-rate normalization multiplier on slope gravity
    pub frame_scale: f32,
    /// Damping factor applied below the promotion threshold
    pub damping: f32,
    /// Offset (radians) added to the slope angle before the promotion
    /// comparison. Historical builds shipped 0.5 and 0.1; keep it tunable.
    pub promote_offset: f32,
    /// Speed that maps to a 90° implied travel angle
    pub speed_for_right_angle: f32,
}

impl Default for SlopeConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            frame_scale: FRAME_SCALE,
            damping: 0.9,
            promote_offset: 0.5,
            speed_for_right_angle: 2000.0,
        }
    }
}

/// Result of one resolution step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeResponse {
    /// New velocity, always finite
    pub velocity: Vec2,
    /// The energy-threshold branch fired: the actor leaves the surface
    pub promote_airborne: bool,
}

impl SlopeResponse {
    /// Fail-safe response: hand the input velocity back untouched
    fn passthrough(velocity: Vec2) -> Self {
        Self {
            velocity,
            promote_airborne: false,
        }
    }
}

/// Stateless slope resolver around a [`SlopeConfig`]
#[derive(Debug, Clone, Default)]
pub struct SlopeResolver {
    config: SlopeConfig,
}

impl SlopeResolver {
    pub fn new(config: SlopeConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SlopeConfig {
        &self.config
    }

    /// Resolve `velocity` against a surface of signed `angle_deg`.
    ///
    /// Pure: mutates nothing, reads nothing but its arguments. Every
    /// numerical failure degrades to the unmodified input velocity.
    pub fn resolve(&self, angle_deg: f32, velocity: Vec2, dt: f32) -> SlopeResponse {
        if !velocity.is_finite() || !angle_deg.is_finite() || !dt.is_finite() {
            log::warn!("slope resolve fed non-finite input, passing velocity through");
            return SlopeResponse::passthrough(velocity);
        }

        let angle = angle_deg.to_radians();
        let (sin, cos) = angle.sin_cos();
        let normal = Vec2::new(-sin, cos);

        let mut resolved = velocity;
        let normal_speed = resolved.dot(normal);
        if normal_speed < 0.0 {
            // Moving into the surface: clamp, don't bounce
            resolved -= normal_speed * normal;

            // Gravity minus its normal projection accelerates down-slope
            let gravity = Vec2::new(0.0, -self.config.gravity);
            let along_slope = gravity - gravity.dot(normal) * normal;
            resolved += along_slope * dt * self.config.frame_scale;
        }

        // Map speed into an implied travel angle and compare against the
        // slope: shallow slopes throttle runaway speed, steep ones let go.
        let implied_angle = remap(
            resolved.length(),
            0.0,
            self.config.speed_for_right_angle,
            0.0,
            std::f32::consts::FRAC_PI_2,
        );
        if !implied_angle.is_finite() {
            log::warn!("slope resolve hit a degenerate speed mapping, passing velocity through");
            return SlopeResponse::passthrough(velocity);
        }

        let mut promote_airborne = false;
        if implied_angle < angle + self.config.promote_offset {
            resolved *= self.config.damping;
        } else {
            promote_airborne = true;
        }

        if !resolved.is_finite() {
            log::warn!("slope resolve produced non-finite velocity, passing input through");
            return SlopeResponse::passthrough(velocity);
        }

        SlopeResponse {
            velocity: resolved,
            promote_airborne,
        }
    }
}
