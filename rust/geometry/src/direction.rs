// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan headings.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use nalgebra::Vector2;

/// A heading in plan, stored in radians counter-clockwise from +X and
/// normalized to `[0, 2π)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Direction(f64);

impl Direction {
    /// Due east.
    pub const EAST: Direction = Direction(0.0);
    /// Due north.
    pub const NORTH: Direction = Direction(FRAC_PI_2);

    /// Create a direction from an angle in radians (any range).
    pub fn from_radians(radians: f64) -> Self {
        let mut r = radians.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU
        if r >= TAU {
            r -= TAU;
        }
        Self(r)
    }

    /// Create a direction from a survey azimuth: radians clockwise from north.
    pub fn from_azimuth(azimuth: f64) -> Self {
        Self::from_radians(FRAC_PI_2 - azimuth)
    }

    /// Create a direction pointing along `v`. Returns `None` for a zero vector.
    pub fn from_vector(v: &Vector2<f64>) -> Option<Self> {
        if v.norm_squared() == 0.0 {
            return None;
        }
        Some(Self::from_radians(v.y.atan2(v.x)))
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.0
    }

    /// Survey azimuth in radians, clockwise from north, in `[0, 2π)`.
    pub fn azimuth(self) -> f64 {
        (FRAC_PI_2 - self.0).rem_euclid(TAU)
    }

    /// Unit vector pointing in this direction.
    #[inline]
    pub fn to_vector(self) -> Vector2<f64> {
        let (sin, cos) = self.0.sin_cos();
        Vector2::new(cos, sin)
    }

    /// Rotate counter-clockwise by `radians` (negative rotates clockwise).
    pub fn rotate(self, radians: f64) -> Self {
        Self::from_radians(self.0 + radians)
    }

    pub fn opposite(self) -> Self {
        self.rotate(PI)
    }

    /// The direction 90° clockwise from this one.
    pub fn right_normal(self) -> Self {
        self.rotate(-FRAC_PI_2)
    }

    /// The direction 90° counter-clockwise from this one.
    pub fn left_normal(self) -> Self {
        self.rotate(FRAC_PI_2)
    }

    /// Signed angle from `self` to `other` in `(-π, π]`, counter-clockwise positive.
    pub fn angle_to(self, other: Direction) -> f64 {
        let mut delta = (other.0 - self.0).rem_euclid(TAU);
        if delta > PI {
            delta -= TAU;
        }
        delta
    }

    /// Cosine of the angle between two directions.
    #[inline]
    pub fn cos_to(self, other: Direction) -> f64 {
        self.to_vector().dot(&other.to_vector())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.0.to_degrees())
    }
}
