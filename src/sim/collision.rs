//! Axis-aligned bounds and the landing test
//!
//! Everything in this game is a box. The only contact that matters is the
//! player's feet coming down onto the top edge of a platform, so instead of
//! a general overlap test we check a thin band around the platform top.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    /// Build a box from its centre and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict horizontal overlap (touching edges do not count)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.right() > other.left() && self.left() < other.right()
    }
}

/// Vertical tolerance around a platform top inside which a landing counts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandingBand {
    /// How far the feet may have sunk past the top edge
    pub below: f32,
    /// How far above the top edge the feet may still be
    pub above: f32,
}

impl LandingBand {
    /// Whether a bottom edge at `feet_y` is within the band around `top_y`
    #[inline]
    pub fn contains(&self, feet_y: f32, top_y: f32) -> bool {
        feet_y <= top_y + self.below && feet_y >= top_y - self.above
    }
}

/// Check whether a falling body lands on a surface
///
/// Requires downward motion, feet inside the landing band around the
/// surface top, and strict horizontal overlap. Rising bodies pass through
/// platforms from below.
pub fn lands_on(body: &Aabb, vel_y: f32, surface: &Aabb, band: &LandingBand) -> bool {
    vel_y > 0.0 && band.contains(body.bottom(), surface.top()) && body.overlaps_x(surface)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAND: LandingBand = LandingBand {
        below: 5.0,
        above: 10.0,
    };

    fn platform_at(x: f32, y: f32) -> Aabb {
        Aabb::from_center(Vec2::new(x, y), Vec2::new(60.0, 12.0))
    }

    /// Player box whose bottom edge sits at `bottom`
    fn player_with_bottom(x: f32, bottom: f32) -> Aabb {
        Aabb::from_center(Vec2::new(x, bottom - 35.0), Vec2::new(50.0, 70.0))
    }

    #[test]
    fn test_from_center() {
        let b = platform_at(200.0, 300.0);
        assert_eq!(b.left(), 170.0);
        assert_eq!(b.right(), 230.0);
        assert_eq!(b.top(), 294.0);
        assert_eq!(b.bottom(), 306.0);
    }

    #[test]
    fn test_lands_inside_band() {
        // Top at 294: band is [284, 299]
        let surface = platform_at(200.0, 300.0);
        let body = player_with_bottom(200.0, 295.0);
        assert!(lands_on(&body, 5.0, &surface, &BAND));

        assert!(lands_on(&player_with_bottom(200.0, 299.0), 5.0, &surface, &BAND));
        assert!(lands_on(&player_with_bottom(200.0, 284.0), 5.0, &surface, &BAND));
    }

    #[test]
    fn test_outside_band_misses() {
        let surface = platform_at(200.0, 300.0);
        // Sunk too deep
        assert!(!lands_on(&player_with_bottom(200.0, 299.5), 5.0, &surface, &BAND));
        // Too far above
        assert!(!lands_on(&player_with_bottom(200.0, 283.5), 5.0, &surface, &BAND));
    }

    #[test]
    fn test_rising_never_lands() {
        let surface = platform_at(200.0, 300.0);
        let body = player_with_bottom(200.0, 295.0);
        assert!(!lands_on(&body, -5.0, &surface, &BAND));
        assert!(!lands_on(&body, 0.0, &surface, &BAND));
    }

    #[test]
    fn test_horizontal_overlap_is_strict() {
        let surface = platform_at(200.0, 300.0);
        // Player right edge exactly on platform left edge (170)
        let touching = player_with_bottom(145.0, 295.0);
        assert!(!lands_on(&touching, 5.0, &surface, &BAND));

        let overlapping = player_with_bottom(146.0, 295.0);
        assert!(lands_on(&overlapping, 5.0, &surface, &BAND));
    }
}
