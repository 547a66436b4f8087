// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Infinite 2D lines

use nalgebra::{Point2, Vector2};

use crate::direction::Direction;

/// An unbounded line through `origin`, parameterized by signed distance
/// along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line2d {
    origin: Point2<f64>,
    direction: Vector2<f64>,
}

impl Line2d {
    /// Line through a point in the given direction
    pub fn new(origin: Point2<f64>, direction: Direction) -> Self {
        Self {
            origin,
            direction: direction.to_vector(),
        }
    }

    /// Line through two points, directed from `from` toward `to`.
    /// Returns `None` when the points coincide.
    pub fn through(from: Point2<f64>, to: Point2<f64>) -> Option<Self> {
        let direction = Direction::from_vector(&(to - from))?;
        Some(Self::new(from, direction))
    }

    #[inline]
    pub fn origin(&self) -> Point2<f64> {
        self.origin
    }

    /// Unit direction vector
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.direction
    }

    /// Point at signed distance `t` from the origin
    #[inline]
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.origin + self.direction * t
    }

    /// Signed distance from the origin to the projection of `p` onto this line
    #[inline]
    pub fn parameter_of(&self, p: &Point2<f64>) -> f64 {
        (p - self.origin).dot(&self.direction)
    }

    /// Signed perpendicular distance from the line to `p`, positive on the right
    pub fn offset_of(&self, p: &Point2<f64>) -> f64 {
        let v = p - self.origin;
        v.x * self.direction.y - v.y * self.direction.x
    }

    /// Intersection with another line.
    ///
    /// Returns `None` when the lines are parallel, i.e. the sine of the angle
    /// between them is below `tolerance`.
    pub fn intersect(&self, other: &Line2d, tolerance: f64) -> Option<Point2<f64>> {
        let cross = perp(&self.direction, &other.direction);
        if cross.abs() < tolerance {
            return None;
        }
        let t = perp(&(other.origin - self.origin), &other.direction) / cross;
        Some(self.point_at(t))
    }
}

#[inline]
fn perp(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}
