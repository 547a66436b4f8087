// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge-Lite Geometry
//!
//! Exact 2D primitives for bridge layout: headings, lines and their
//! intersections, support orientation strings, and the roadway alignment
//! that every bridge coordinate is expressed against.
//!
//! Coordinates are plan coordinates (X east, Y north). Headings are measured
//! counter-clockwise from +X. Alignment offsets are positive to the right of
//! the alignment when looking ahead on station.

pub mod alignment;
pub mod direction;
pub mod error;
pub mod line;
pub mod orientation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};

pub use alignment::{Alignment, AlignmentDescription, CircularAlignment, StraightAlignment};
pub use direction::Direction;
pub use error::{Error, Result};
pub use line::Line2d;
pub use orientation::Orientation;
