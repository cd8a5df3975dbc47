//! Arc geometry for melee swings
//!
//! A swing covers a circular sector around the player:
//! - origin: player center
//! - facing: sector center line (radians)
//! - range: reach from the origin
//! - half_angle: angular extent on each side of `facing`

use glam::Vec2;

use crate::{angle_difference, cartesian_to_polar, normalize_angle};

/// A circular sector anchored at the player
#[derive(Debug, Clone, Copy)]
pub struct SwingArc {
    pub origin: Vec2,
    /// Center angle (radians, normalized to [-π, π))
    pub facing: f32,
    pub range: f32,
    /// Half the sector width (radians)
    pub half_angle: f32,
}

impl SwingArc {
    pub fn new(origin: Vec2, facing: f32, range: f32, half_angle: f32) -> Self {
        Self {
            origin,
            facing: normalize_angle(facing),
            range,
            half_angle,
        }
    }

    /// Check if a bearing is within the sector's angular extent
    pub fn contains_angle(&self, theta: f32) -> bool {
        angle_difference(theta, self.facing).abs() <= self.half_angle
    }

    /// Arc test: a circle is struck if its center is within `range + radius`
    /// and its bearing lies within the sector
    pub fn hits_circle(&self, center: Vec2, radius: f32) -> bool {
        let (dist, bearing) = cartesian_to_polar(center - self.origin);
        if dist > self.range + radius {
            return false;
        }
        // Target sitting on the origin has no bearing; it is inside the swing
        if dist <= f32::EPSILON {
            return true;
        }
        self.contains_angle(bearing)
    }
}
