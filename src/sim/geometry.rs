//! Axis-aligned rectangles and hitbox scaling
//!
//! World space has x growing to the right and y growing upward from the
//! ground baseline, so `min` is the bottom-left corner of a rectangle.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle with its bottom-left corner at `origin`
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let horizontal = self.min.x < other.max.x && self.max.x > other.min.x;
        let vertical = self.min.y < other.max.y && self.max.y > other.min.y;
        horizontal && vertical
    }

    /// True if `other` lies entirely inside this rectangle (edges may touch)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }
}

/// Sprite dimensions for a base size and visual scale
#[inline]
pub fn scaled_size(base: Vec2, size_scale: f32) -> Vec2 {
    base * size_scale
}

/// Collider rectangle centered inside the sprite footprint at `origin`
///
/// The sprite is `base * size_scale`; the collider is the sprite scaled by
/// `collider_scale`, inset equally on both sides of each axis.
pub fn centered_hitbox(origin: Vec2, base: Vec2, size_scale: f32, collider_scale: f32) -> Rect {
    let sprite = scaled_size(base, size_scale);
    let collider = sprite * collider_scale;
    let inset = (sprite - collider) * 0.5;
    Rect::from_origin_size(origin + inset, collider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let right = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let above = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 20.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_separated_on_one_axis_only() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        // Overlaps horizontally, but entirely above
        let b = Rect::new(Vec2::new(2.0, 11.0), Vec2::new(8.0, 30.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_centered_hitbox_insets_equally() {
        let hitbox = centered_hitbox(Vec2::new(100.0, 0.0), Vec2::new(100.0, 50.0), 0.5, 0.8);
        // Sprite 50x25, collider 40x20, inset 5 and 2.5
        assert!((hitbox.min.x - 105.0).abs() < 1e-4);
        assert!((hitbox.min.y - 2.5).abs() < 1e-4);
        assert!((hitbox.size().x - 40.0).abs() < 1e-4);
        assert!((hitbox.size().y - 20.0).abs() < 1e-4);

        let sprite = Rect::from_origin_size(Vec2::new(100.0, 0.0), Vec2::new(50.0, 25.0));
        assert!((hitbox.center() - sprite.center()).length() < 1e-4);
    }

    #[test]
    fn test_unit_collider_scale_matches_sprite() {
        let hitbox = centered_hitbox(Vec2::ZERO, Vec2::new(146.0, 179.0), 0.23, 1.0);
        let sprite = Rect::from_origin_size(Vec2::ZERO, scaled_size(Vec2::new(146.0, 179.0), 0.23));
        assert_eq!(hitbox, sprite);
    }
}
