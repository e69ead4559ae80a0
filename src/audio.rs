//! Audio cue mapping
//!
//! Maps sim state to per-channel volume/pitch levels. No playback happens
//! here - the platform layer owns the actual audio device and just applies
//! whatever levels the mixer computed for the tick.

use serde::{Deserialize, Serialize};

use crate::remap;
use crate::sim::Actor;

/// Airborne wind starts whistling at this speed (units/s)
pub const MIN_WIND_SPEED: f32 = 450.0;
/// Speed mapped to maximum wind volume/pitch
pub const MAX_WIND_SPEED: f32 = 2000.0;
pub const WIND_VOLUME_RANGE: (f32, f32) = (0.1, 0.8);
pub const WIND_PITCH_RANGE: (f32, f32) = (0.8, 1.5);

/// Rolling engine hum fades in above this ground speed
pub const ENGINE_MIN_SPEED: f32 = 50.0;
pub const ENGINE_VOLUME_RANGE: (f32, f32) = (0.1, 0.6);
pub const ENGINE_PITCH_RANGE: (f32, f32) = (0.7, 1.3);

/// Speed lost in one tick that triggers the brake screech
pub const BRAKE_THRESHOLD: f32 = 100.0;
/// Screech keeps playing at least this long (seconds)
pub const BRAKE_MIN_DURATION: f32 = 0.3;

/// Volume and pitch for one looping channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelLevel {
    pub volume: f32,
    pub pitch: f32,
}

/// Per-tick output: `None` means the channel is silent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioFrame {
    pub wind: Option<ChannelLevel>,
    pub engine: Option<ChannelLevel>,
    pub brake: Option<ChannelLevel>,
}

/// Stateful mixer: holds volume settings and the brake hold-off timer
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    brake_timer: f32,
    brake_level: ChannelLevel,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            brake_timer: 0.0,
            brake_level: ChannelLevel {
                volume: 0.0,
                pitch: 1.0,
            },
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all channels
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Compute this tick's channel levels from the actor's motion
    pub fn mix(&mut self, actor: &Actor, dt: f32) -> AudioFrame {
        let master = self.effective_volume();
        let speed = actor.speed();

        let mut frame = AudioFrame::default();

        // Wind whistles while falling or flying fast
        if !actor.grounded && speed >= MIN_WIND_SPEED {
            let intensity = remap(speed, MIN_WIND_SPEED, MAX_WIND_SPEED, 0.0, 1.0).clamp(0.0, 1.0);
            frame.wind = Some(ChannelLevel {
                volume: remap(intensity, 0.0, 1.0, WIND_VOLUME_RANGE.0, WIND_VOLUME_RANGE.1)
                    * master,
                pitch: remap(intensity, 0.0, 1.0, WIND_PITCH_RANGE.0, WIND_PITCH_RANGE.1),
            });
        }

        // Engine hums while rolling along the ground
        if actor.grounded && actor.vel.x.abs() >= ENGINE_MIN_SPEED {
            let intensity = remap(
                actor.vel.x.abs(),
                ENGINE_MIN_SPEED,
                MAX_WIND_SPEED,
                0.0,
                1.0,
            )
            .clamp(0.0, 1.0);
            frame.engine = Some(ChannelLevel {
                volume: remap(intensity, 0.0, 1.0, ENGINE_VOLUME_RANGE.0, ENGINE_VOLUME_RANGE.1)
                    * master,
                pitch: remap(intensity, 0.0, 1.0, ENGINE_PITCH_RANGE.0, ENGINE_PITCH_RANGE.1),
            });
        }

        // Brake screech on a hard speed drop, held for a minimum duration
        if self.brake_timer > 0.0 {
            self.brake_timer -= dt;
        }
        let speed_drop = actor.prev_speed - speed;
        if speed_drop > BRAKE_THRESHOLD && speed > 100.0 {
            let intensity = remap(speed_drop, BRAKE_THRESHOLD, 1000.0, 0.3, 1.0).clamp(0.3, 1.0);
            self.brake_level = ChannelLevel {
                volume: intensity * 0.7 * master,
                pitch: 1.0,
            };
            self.brake_timer = BRAKE_MIN_DURATION;
        }
        if self.brake_timer > 0.0 {
            frame.brake = Some(self.brake_level);
        }

        frame
    }
}
