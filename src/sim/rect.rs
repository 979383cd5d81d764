//! Axis-aligned rectangles for hitboxes
//!
//! All game geometry is boxes in y-up screen space: `min` is the bottom-left
//! corner, `max` the top-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build from a centre point and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap test: touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.left(), 8.0);
        assert_eq!(r.right(), 12.0);
        assert_eq!(r.bottom(), 17.0);
        assert_eq!(r.top(), 23.0);
        assert_eq!(r.center(), Vec2::new(10.0, 20.0));
        assert_eq!(r.size(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_intersects() {
        let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(15.0, 15.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let d = Rect::new(Vec2::new(0.0, 11.0), Vec2::new(10.0, 20.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Shared edge only
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&d));
    }
}
