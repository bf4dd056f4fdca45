//! Planar galaxy coordinates.
//!
//! Fleet movement is integrated in straight lines between system positions,
//! so everything here is plain Euclidean geometry in `f64`.  Double precision
//! keeps repeated partial moves from drifting: a fleet that advances 100
//! units per turn for 200 turns must land within `epsilon` of where the
//! forecast said it would.

use std::ops::{Add, Mul, Sub};

/// A position in the galaxy plane.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other - self).length()
    }

    /// Length of the vector from the origin to `self`.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Move `step` units from `self` toward `target`.
    ///
    /// `dist` must be the precomputed distance from `self` to `target`; the
    /// caller already has it and passing it in keeps the arithmetic identical
    /// between the forecast and the authoritative movement.  A zero `dist`
    /// returns `self` unchanged.
    #[inline]
    pub fn step_toward(self, target: Point, dist: f64, step: f64) -> Point {
        if dist <= 0.0 {
            return self;
        }
        let dir = target - self;
        Point::new(self.x + dir.x / dist * step, self.y + dir.y / dist * step)
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
