//! Plane geometry for the particle field.

use std::ops::{Add, AddAssign, Mul, Sub};

/// A point or displacement in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Clamp each axis independently to `[-limit, limit]`.
    pub fn clamp_axes(self, limit: f32) -> Self {
        Self::new(self.x.clamp(-limit, limit), self.y.clamp(-limit, limit))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, k: f32) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }
}

/// Axis-aligned region in which particles are frozen and hidden.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Zone {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build a zone from a text block's bounds, pulled in by `padding` on every side.
    pub fn inset(left: f32, top: f32, right: f32, bottom: f32, padding: f32) -> Self {
        Self::new(
            left + padding,
            top + padding,
            right - padding,
            bottom - padding,
        )
    }

    /// Strict containment; points on the border are outside.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.top && p.y < self.bottom
    }

    pub fn is_empty(&self) -> bool {
        !(self.right > self.left && self.bottom > self.top)
    }
}
