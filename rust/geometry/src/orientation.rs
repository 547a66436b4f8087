// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support orientation strings.
//!
//! Three forms are accepted (case-insensitive, whitespace separated):
//!
//! - `NORMAL` or `N`: the support is normal to the alignment
//! - `<deg> [<min> [<sec>]] L|R`: a skew angle from the alignment normal,
//!   `L` counter-clockwise and `R` clockwise, e.g. `15 30 00 L`
//! - `N|S <deg> [<min> [<sec>]] E|W`: an absolute quadrant bearing, e.g. `N 45 E`

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use crate::direction::Direction;
use crate::error::{Error, Result};

/// How a support line is oriented relative to the alignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    /// Perpendicular to the alignment at the support station.
    Normal,
    /// Rotated from the alignment normal, radians counter-clockwise positive.
    Skew(f64),
    /// Fixed plan bearing.
    Bearing(Direction),
}

impl Orientation {
    /// Resolve into a heading, given the alignment's right-pointing normal at
    /// the support station. The heading always points to the right side of
    /// the alignment.
    pub fn heading(&self, normal: Direction) -> Direction {
        match *self {
            Orientation::Normal => normal,
            Orientation::Skew(angle) => normal.rotate(angle),
            Orientation::Bearing(dir) => {
                if dir.cos_to(normal) < 0.0 {
                    dir.opposite()
                } else {
                    dir
                }
            }
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let tokens: Vec<&str> = upper.split_whitespace().collect();
        let fail = |why| Error::InvalidOrientation(s.to_string(), why);

        match tokens.as_slice() {
            [] => Err(fail("empty string")),
            ["N"] | ["NORMAL"] => Ok(Orientation::Normal),
            [first, middle @ .., last] if *first == "N" || *first == "S" => {
                let angle = parse_dms(middle).ok_or_else(|| fail("bad bearing angle"))?;
                if angle > FRAC_PI_2 {
                    return Err(fail("bearing angle exceeds 90 degrees"));
                }
                let azimuth = match (*first, *last) {
                    ("N", "E") => angle,
                    ("S", "E") => PI - angle,
                    ("S", "W") => PI + angle,
                    ("N", "W") => 2.0 * PI - angle,
                    _ => return Err(fail("bearing must end in E or W")),
                };
                Ok(Orientation::Bearing(Direction::from_azimuth(azimuth)))
            }
            [numbers @ .., last] => {
                let angle = parse_dms(numbers).ok_or_else(|| fail("bad skew angle"))?;
                if angle >= FRAC_PI_2 {
                    return Err(fail("skew angle must be less than 90 degrees"));
                }
                match *last {
                    "L" => Ok(Orientation::Skew(angle)),
                    "R" => Ok(Orientation::Skew(-angle)),
                    _ => Err(fail("skew angle must end in L or R")),
                }
            }
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Orientation::Normal => f.write_str("NORMAL"),
            Orientation::Skew(a) => {
                let side = if a < 0.0 { 'R' } else { 'L' };
                write!(f, "{} {}", a.abs().to_degrees(), side)
            }
            Orientation::Bearing(d) => write!(f, "azimuth {}", d.azimuth().to_degrees()),
        }
    }
}

/// Parse 1-3 tokens of degrees, minutes and seconds into radians.
fn parse_dms(tokens: &[&str]) -> Option<f64> {
    if tokens.is_empty() || tokens.len() > 3 {
        return None;
    }
    let mut degrees = 0.0;
    let mut scale = 1.0;
    for (i, token) in tokens.iter().enumerate() {
        let value: f64 = token.parse().ok()?;
        if !value.is_finite() || value < 0.0 || (i > 0 && value >= 60.0) {
            return None;
        }
        degrees += value / scale;
        scale *= 60.0;
    }
    Some(degrees.to_radians())
}
