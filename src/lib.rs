//! WASD Shooter - top-down survival combat simulation
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, weapons, enemies, combat, progression)
//! - `weapons`: Static weapon catalog
//! - `tuning`: Data-driven game balance
//! - `highscores`: High score persistence
//!
//! Rendering, menus and raw input capture live outside this crate; they read
//! [`sim::Snapshot`] values and feed [`sim::InputState`].

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;
pub mod weapons;

pub use error::{Error, Result};
pub use highscores::{HighScoreStore, HighScores, JsonFileStore, MemoryStore};
pub use tuning::Tuning;
pub use weapons::{WeaponDefinition, WeaponKind};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fallback arena size for headless runs (pixels)
    pub const DEFAULT_ARENA_WIDTH: f32 = 1280.0;
    pub const DEFAULT_ARENA_HEIGHT: f32 = 720.0;

    /// Squared distance under which an enemy stops steering (avoids normalizing ~0 vectors)
    pub const STEERING_EPSILON_SQ: f32 = 1.0;

    /// Maximum high score entries kept on disk
    pub const MAX_HIGH_SCORES: usize = 10;
}

/// Tolerance used when snapping angles onto the -π boundary
const ANGLE_EPSILON: f32 = 1e-6;

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    // f32 rounding can leave a value a hair below π; keep the range half-open
    if PI - angle < ANGLE_EPSILON {
        angle = -PI;
    }
    angle
}

/// Shortest signed difference `a - b`, in [-π, π); opposite bearings give -π
#[inline]
pub fn angle_difference(a: f32, b: f32) -> f32 {
    normalize_angle(a - b)
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_is_half_open() {
        for angle in [PI, 3.0 * PI, -PI, 5.0 * PI, PI - 1e-7] {
            let n = normalize_angle(angle);
            assert!((-PI..PI).contains(&n), "{angle} -> {n}");
        }
        assert_eq!(normalize_angle(3.0 * PI), -PI);
        assert!((angle_difference(PI, 0.0) + PI).abs() < 1e-6);
    }

    #[test]
    fn test_angle_difference_takes_short_way() {
        // 170° vs -170° are 20° apart, not 340°
        let d = angle_difference(170f32.to_radians(), -170f32.to_radians());
        assert!((d.abs() - 20f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn test_polar_roundtrip_angle() {
        let p = polar_to_cartesian(10.0, PI / 3.0);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 10.0).abs() < 1e-4);
        assert!((theta - PI / 3.0).abs() < 1e-4);
    }
}
