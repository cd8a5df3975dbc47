//! Circle overlap tests
//!
//! Every entity is a circle; two collide when the distance between centers
//! is strictly less than the sum of their radii.

use glam::Vec2;

/// Strict circle-circle overlap
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Index of the first circle in iteration order that overlaps the probe
///
/// Not the nearest one: when several overlap, collection order decides.
pub fn first_overlap<I>(probe: Vec2, probe_radius: f32, circles: I) -> Option<usize>
where
    I: IntoIterator<Item = (Vec2, f32, bool)>,
{
    circles
        .into_iter()
        .position(|(center, radius, eligible)| {
            eligible && circles_overlap(probe, probe_radius, center, radius)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_is_not_overlap() {
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.9, 0.0), 5.0));
    }

    #[test]
    fn test_first_overlap_uses_order_not_distance() {
        let circles = [
            // Farther away but listed first
            (Vec2::new(7.0, 0.0), 5.0, true),
            (Vec2::new(1.0, 0.0), 5.0, true),
        ];
        assert_eq!(first_overlap(Vec2::ZERO, 3.0, circles), Some(0));
    }

    #[test]
    fn test_first_overlap_skips_ineligible() {
        let circles = [
            (Vec2::new(1.0, 0.0), 5.0, false),
            (Vec2::new(2.0, 0.0), 5.0, true),
        ];
        assert_eq!(first_overlap(Vec2::ZERO, 3.0, circles), Some(1));
        assert_eq!(first_overlap(Vec2::new(100.0, 0.0), 3.0, circles), None);
    }
}
