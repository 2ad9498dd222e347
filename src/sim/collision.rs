//! Collision detection for axis-aligned rectangles
//!
//! Arrows, birds and crates are all boxes. Bird hits are arcade-generous:
//! the arrow's box is inflated by a padding on every side. Crate hits use
//! exact bounds.

use glam::Vec2;

use super::state::Projectile;

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { min: pos, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Grow by `pad` on every side
    pub fn inflate(&self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(pad),
            size: self.size + Vec2::splat(pad * 2.0),
        }
    }

    /// Overlap test; touching edges count as a hit
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        !(other.min.x > a_max.x
            || b_max.x < self.min.x
            || other.min.y > a_max.y
            || b_max.y < self.min.y)
    }

    /// Whether the horizontal extent strictly overlaps the band `[lo, hi]`
    pub fn overlaps_band(&self, lo: f32, hi: f32) -> bool {
        self.max().x > lo && self.min.x < hi
    }
}

/// Find the arrow that hits `target`, skipping arrows already spent this tick
///
/// Arrows are tested newest first and the first match wins; there is no
/// proximity sort. `spent` is parallel to `projectiles`.
pub fn first_hit(
    projectiles: &[Projectile],
    spent: &[bool],
    target: &Rect,
    padding: f32,
) -> Option<usize> {
    (0..projectiles.len()).rev().find(|&j| {
        !spent.get(j).copied().unwrap_or(false) && {
            let bounds = projectiles[j].bounds();
            let bounds = if padding > 0.0 {
                bounds.inflate(padding)
            } else {
                bounds
            };
            bounds.intersects(target)
        }
    })
}
