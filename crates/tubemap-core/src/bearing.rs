//! The eight compass bearings of the 45-degree schematic grid.
//!
//! Every bearing owns an integer step vector (components in `{-1, 0, 1}`) with north pointing
//! along +y. The two lookups are total: label -> bearing fails with
//! [`Error::UnrecognizedBearing`], vector -> bearing fails with [`Error::UnsupportedAngle`].

use crate::geom::{self, Vector, vector};
use crate::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bearing {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Bearing {
    /// Table order; inverse lookups scan in this order.
    pub const ALL: [Bearing; 8] = [
        Bearing::N,
        Bearing::NE,
        Bearing::E,
        Bearing::SE,
        Bearing::S,
        Bearing::SW,
        Bearing::W,
        Bearing::NW,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Bearing::N => "N",
            Bearing::NE => "NE",
            Bearing::E => "E",
            Bearing::SE => "SE",
            Bearing::S => "S",
            Bearing::SW => "SW",
            Bearing::W => "W",
            Bearing::NW => "NW",
        }
    }

    /// Integer grid step for this bearing.
    pub fn vector(self) -> Vector {
        let (x, y) = match self {
            Bearing::N => (0.0, 1.0),
            Bearing::NE => (1.0, 1.0),
            Bearing::E => (1.0, 0.0),
            Bearing::SE => (1.0, -1.0),
            Bearing::S => (0.0, -1.0),
            Bearing::SW => (-1.0, -1.0),
            Bearing::W => (-1.0, 0.0),
            Bearing::NW => (-1.0, 1.0),
        };
        vector(x, y)
    }

    /// Unit-length tangent for this bearing.
    pub fn unit_vector(self) -> Vector {
        let v = self.vector();
        let n = geom::norm(v);
        vector(v.x / n, v.y / n)
    }

    /// The bearing whose step vector points the same way as `v`.
    pub fn from_vector(v: Vector) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|b| geom::parallel(b.vector(), v))
            .ok_or(Error::UnsupportedAngle { x: v.x, y: v.y })
    }

    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(|b| b.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Case-insensitive label lookup.
pub fn direction_vector(bearing: &str) -> Result<Vector> {
    Ok(bearing.parse::<Bearing>()?.vector())
}

/// Inverse of [`direction_vector`].
pub fn compass_bearing(v: Vector) -> Result<Bearing> {
    Bearing::from_vector(v)
}

impl FromStr for Bearing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == key)
            .ok_or_else(|| Error::UnrecognizedBearing {
                bearing: key,
                options: Self::options(),
            })
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Bearing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Bearing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<Bearing>().map_err(serde::de::Error::custom)
    }
}
