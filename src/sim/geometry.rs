//! Axis-aligned geometry shared by the physics world and the camera rig
//!
//! Scene coordinates are centered on the camera's start position with +y up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the host's drawing surface, in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Size reported by hosts before layout has happened
    pub const PLACEHOLDER: Viewport = Viewport {
        width: 1.0,
        height: 1.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True for the 1×1 placeholder or any size that cannot hold a frame
    pub fn is_degenerate(&self) -> bool {
        *self == Self::PLACEHOLDER || !(self.width > 1.0 && self.height > 1.0)
    }

    #[inline]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn max_side(&self) -> f32 {
        self.width.max(self.height)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Axis-aligned box described by its center and half size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Square of the given side centered at `center`
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::new(center, Vec2::splat(side))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.center.y - self.half_extents.y
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Half-open containment: min edges are inside, max edges are not
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x < max.x && point.y >= min.y && point.y < max.y
    }

    /// Same box moved vertically
    pub fn shifted_y(&self, dy: f32) -> Self {
        Self {
            center: self.center + Vec2::new(0.0, dy),
            half_extents: self.half_extents,
        }
    }

    /// Same center, new size
    pub fn resized(&self, size: Vec2) -> Self {
        Self::new(self.center, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_degenerate() {
        assert!(Viewport::PLACEHOLDER.is_degenerate());
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(!Viewport::new(390.0, 844.0).is_degenerate());
    }

    #[test]
    fn test_sides_ignore_orientation() {
        let portrait = Viewport::new(390.0, 844.0);
        let landscape = Viewport::new(844.0, 390.0);
        assert_eq!(portrait.min_side(), landscape.min_side());
        assert_eq!(portrait.max_side(), landscape.max_side());
    }

    #[test]
    fn test_square_bounds() {
        let sq = Aabb::square(Vec2::new(0.0, 100.0), 400.0);
        assert_eq!(sq.min_y(), -100.0);
        assert_eq!(sq.max_y(), 300.0);
        assert_eq!(sq.min(), Vec2::new(-200.0, -100.0));
    }

    #[test]
    fn test_contains_is_half_open() {
        let sq = Aabb::square(Vec2::ZERO, 2.0);
        assert!(sq.contains(Vec2::new(-1.0, -1.0)));
        assert!(!sq.contains(Vec2::new(1.0, 0.0)));
        assert!(!sq.contains(Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_shift_keeps_size() {
        let sq = Aabb::square(Vec2::ZERO, 10.0).shifted_y(25.0);
        assert_eq!(sq.center, Vec2::new(0.0, 25.0));
        assert_eq!(sq.size(), Vec2::splat(10.0));
    }
}
