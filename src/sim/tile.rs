//! Rotated terrain tile geometry
//!
//! A tile is a thin rectangle laid along the terrain surface, rotated by a
//! signed angle in degrees. Positive angles tilt the surface counter-clockwise.
//! Tiles are immutable once the level is built.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_vec;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap test - boxes that merely touch do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// A rotated rectangular terrain tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainTile {
    /// Center position in world space
    pub center: Vec2,
    /// Signed rotation (degrees, positive = counter-clockwise)
    pub angle_deg: f32,
    /// Width along the rotated x axis, thickness along the rotated y axis
    pub size: Vec2,
}

impl TerrainTile {
    pub fn new(center: Vec2, angle_deg: f32, size: Vec2) -> Self {
        Self {
            center,
            angle_deg,
            size,
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size.x * 0.5
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.size.y * 0.5
    }

    /// Tile-local coordinates of a world point (rotation undone)
    pub fn to_local(&self, world: Vec2) -> Vec2 {
        rotate_vec(world - self.center, -self.angle_deg.to_radians())
    }

    /// World coordinates of a tile-local point
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.center + rotate_vec(local, self.angle_deg.to_radians())
    }

    /// Conservative world-space AABB around the rotated rectangle
    pub fn aabb(&self) -> Aabb {
        let rad = self.angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let ext = Vec2::new(
            self.half_width() * cos.abs() + self.half_height() * sin.abs(),
            self.half_width() * sin.abs() + self.half_height() * cos.abs(),
        );
        Aabb {
            min: self.center - ext,
            max: self.center + ext,
        }
    }

    /// Separating-axis overlap test against an axis-aligned box
    ///
    /// Axes tested: world x/y (the box) and tile tangent/normal. Strict -
    /// shapes resting exactly edge-to-edge do not overlap.
    pub fn overlaps_aabb(&self, other: &Aabb) -> bool {
        let rad = self.angle_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let tangent = Vec2::new(cos, sin);
        let normal = Vec2::new(-sin, cos);

        let delta = self.center - other.center();
        let box_half = other.half_extents();

        for axis in [Vec2::X, Vec2::Y, tangent, normal] {
            let dist = delta.dot(axis).abs();
            let tile_r =
                self.half_width() * tangent.dot(axis).abs() + self.half_height() * normal.dot(axis).abs();
            let box_r = box_half.x * axis.x.abs() + box_half.y * axis.y.abs();
            if dist >= tile_r + box_r {
                return false;
            }
        }
        true
    }
}
