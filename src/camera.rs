//! Follow camera for the window layer
//!
//! Leads the actor by a fraction of its velocity so fast surfing keeps the
//! terrain ahead on screen, then eases toward that target every tick.

use glam::Vec2;

use crate::sim::Actor;

/// Default smoothing factor per tick
pub const DEFAULT_SMOOTHING: f32 = 0.1;
/// Velocity lead, per axis (horizontal look-ahead is stronger)
pub const VELOCITY_LEAD: Vec2 = Vec2::new(0.3, 0.1);

/// Smoothed camera state
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    pub pos: Vec2,
    /// Fraction of the remaining distance covered each tick (0..=1)
    pub smoothing: f32,
}

impl FollowCamera {
    pub fn new(start: Vec2) -> Self {
        Self {
            pos: start,
            smoothing: DEFAULT_SMOOTHING,
        }
    }

    /// Ease toward the actor plus velocity lead
    pub fn update(&mut self, actor: &Actor) {
        let target = actor.pos + actor.vel * VELOCITY_LEAD;
        self.pos = self.pos.lerp(target, self.smoothing.clamp(0.0, 1.0));
    }
}
