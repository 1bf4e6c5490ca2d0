//! Axis-aligned rectangle geometry for every entity hitbox
//!
//! Screen-style coordinates: x grows right, y grows down. A rectangle is
//! its top-left corner plus a size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FEET_HEIGHT, FEET_OFFSET};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Thin slice straddling the bottom edge, used for ground contact only
    pub fn feet(&self) -> Rect {
        Rect::new(self.x, self.bottom() - FEET_OFFSET, self.w, FEET_HEIGHT)
    }

    /// Move by a velocity (one frame of travel)
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Clamp x into `[min, max - w]`
    pub fn clamp_x(&mut self, min: f32, max: f32) {
        if self.x < min {
            self.x = min;
        }
        if self.x > max - self.w {
            self.x = max - self.w;
        }
    }
}
