// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roadway alignment reference.
//!
//! An alignment maps a station (distance along the roadway centerline) and a
//! lateral offset (positive to the right) to a plan point, and reports the
//! forward bearing at any station. Bridge layout only ever queries it.

use std::fmt;
use std::sync::Arc;

use nalgebra::Point2;

use crate::direction::Direction;
use crate::error::{Error, Result};

/// Read-only roadway centerline.
pub trait Alignment: fmt::Debug + Send + Sync {
    /// Plan point at `station`, offset to the right by `offset`.
    fn point_at(&self, station: f64, offset: f64) -> Point2<f64>;

    /// Forward bearing of the alignment at `station`.
    fn bearing(&self, station: f64) -> Direction;

    /// Normal at `station`, pointing to the right of the alignment.
    fn normal(&self, station: f64) -> Direction {
        self.bearing(station).right_normal()
    }
}

/// A tangent alignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightAlignment {
    origin: Point2<f64>,
    bearing: Direction,
    start_station: f64,
}

impl StraightAlignment {
    /// Alignment passing through `origin` at `start_station`, heading `bearing`.
    pub fn new(origin: Point2<f64>, bearing: Direction, start_station: f64) -> Self {
        Self {
            origin,
            bearing,
            start_station,
        }
    }
}

impl Alignment for StraightAlignment {
    fn point_at(&self, station: f64, offset: f64) -> Point2<f64> {
        let ahead = self.bearing.to_vector() * (station - self.start_station);
        let right = self.bearing.right_normal().to_vector() * offset;
        self.origin + ahead + right
    }

    fn bearing(&self, _station: f64) -> Direction {
        self.bearing
    }
}

/// A constant-radius curve. A positive radius curves to the right, a
/// negative radius to the left.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularAlignment {
    center: Point2<f64>,
    start_bearing: Direction,
    radius: f64,
    start_station: f64,
}

impl CircularAlignment {
    /// Curve starting at `origin` (station `start_station`) tangent to
    /// `start_bearing`.
    pub fn new(
        origin: Point2<f64>,
        start_bearing: Direction,
        radius: f64,
        start_station: f64,
    ) -> Result<Self> {
        if !radius.is_finite() || radius == 0.0 {
            return Err(Error::InvalidAlignment(format!(
                "curve radius must be finite and non-zero, got {radius}"
            )));
        }
        let center = origin + start_bearing.right_normal().to_vector() * radius;
        Ok(Self {
            center,
            start_bearing,
            radius,
            start_station,
        })
    }
}

impl Alignment for CircularAlignment {
    fn point_at(&self, station: f64, offset: f64) -> Point2<f64> {
        let normal = self.normal(station).to_vector();
        // The centerline sits one radius from the center, opposite the normal
        self.center + normal * (offset - self.radius)
    }

    fn bearing(&self, station: f64) -> Direction {
        let swept = (station - self.start_station) / self.radius;
        self.start_bearing.rotate(-swept)
    }
}

/// Serializable alignment definition, as read from a project file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum AlignmentDescription {
    Straight {
        origin: [f64; 2],
        /// Survey azimuth in degrees, clockwise from north
        azimuth: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        start_station: f64,
    },
    Circular {
        origin: [f64; 2],
        /// Survey azimuth of the tangent at `origin`, degrees clockwise from north
        azimuth: f64,
        radius: f64,
        #[cfg_attr(feature = "serde", serde(default))]
        start_station: f64,
    },
}

impl AlignmentDescription {
    /// Build the alignment as a shareable trait object.
    pub fn build(&self) -> Result<Arc<dyn Alignment>> {
        match *self {
            AlignmentDescription::Straight {
                origin,
                azimuth,
                start_station,
            } => Ok(Arc::new(StraightAlignment::new(
                Point2::new(origin[0], origin[1]),
                Direction::from_azimuth(azimuth.to_radians()),
                start_station,
            ))),
            AlignmentDescription::Circular {
                origin,
                azimuth,
                radius,
                start_station,
            } => Ok(Arc::new(CircularAlignment::new(
                Point2::new(origin[0], origin[1]),
                Direction::from_azimuth(azimuth.to_radians()),
                radius,
                start_station,
            )?)),
        }
    }
}
