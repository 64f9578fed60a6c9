//! Positions, the "not yet placed" marker, and regions for occupancy queries.
//!
//! Positions are plain map-projection `(x, y)` pairs in whatever coordinate
//! system the server streams (longitude/latitude for the map viewer).  The
//! wire format has no way to say "this actor has no position yet"; servers
//! send a sentinel coordinate instead.  [`UnsetMarker`] decides which
//! coordinates are that sentinel so the rest of the engine can work with an
//! explicit `Option<Position>`.

use std::fmt;

use ::geo::{Coord, Intersects, LineString, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

use crate::{CvError, CvResult};

// ── Position ──────────────────────────────────────────────────────────────────

/// A recorded actor position.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// GeoJSON coordinate pair.
    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Position {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

// ── UnsetMarker ───────────────────────────────────────────────────────────────

/// Which incoming coordinates mean "actor not yet placed".
///
/// | Variant       | Treated as unset                                   |
/// |---------------|----------------------------------------------------|
/// | `Origin`      | exactly `(0, 0)`                                   |
/// | `AnyAxisZero` | `x == 0` or `y == 0` (the legacy viewer's filter)  |
/// | `Never`       | nothing; the origin is an ordinary position        |
///
/// `AnyAxisZero` (`unset_marker = "any_axis_zero"`) reproduces the legacy
/// viewer exactly; the default only treats the origin itself as unset.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetMarker {
    #[default]
    Origin,
    AnyAxisZero,
    Never,
}

impl UnsetMarker {
    /// Classify a raw wire coordinate.  Returns `None` for the sentinel.
    pub fn classify(self, [x, y]: [f64; 2]) -> Option<Position> {
        let unset = match self {
            UnsetMarker::Origin      => x == 0.0 && y == 0.0,
            UnsetMarker::AnyAxisZero => x == 0.0 || y == 0.0,
            UnsetMarker::Never       => false,
        };
        (!unset).then_some(Position { x, y })
    }
}

// ── Region ────────────────────────────────────────────────────────────────────

/// An area selected on the map (typically a building footprint) against which
/// occupancy is counted.
///
/// Only polygonal areas can contain actors; anything else the rendering
/// surface hands back (a road line, a point of interest) is kept as
/// `NonPolygonal` and never matches.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Polygon(Polygon<f64>),
    NonPolygonal,
}

/// The subset of a GeoJSON geometry object this crate reads.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeometryObject {
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
    #[serde(other)]
    Unsupported,
}

impl Region {
    /// Axis-aligned rectangle spanning the two corners.
    pub fn rectangle(a: Position, b: Position) -> Self {
        let rect = Rect::new(Coord { x: a.x, y: a.y }, Coord { x: b.x, y: b.y });
        Region::Polygon(rect.to_polygon())
    }

    /// Build a region from a GeoJSON geometry object.
    ///
    /// `"Polygon"` geometries keep their exterior ring and holes; any other
    /// geometry type yields [`Region::NonPolygonal`].
    ///
    /// # Errors
    ///
    /// Returns [`CvError::Json`] if the value is not a geometry object and
    /// [`CvError::Parse`] if a polygon has no exterior ring.
    pub fn from_geojson(value: &serde_json::Value) -> CvResult<Self> {
        let geometry = GeometryObject::deserialize(value)?;

        let rings = match geometry {
            GeometryObject::Unsupported => return Ok(Region::NonPolygonal),
            GeometryObject::Polygon { coordinates } => coordinates,
        };

        let mut rings = rings.into_iter().map(ring_to_line_string);
        let exterior = rings
            .next()
            .filter(|ring| !ring.0.is_empty())
            .ok_or_else(|| CvError::Parse("polygon has no exterior ring".into()))?;
        Ok(Region::Polygon(Polygon::new(exterior, rings.collect())))
    }

    /// `true` if `position` lies inside the region or on its boundary.
    pub fn contains(&self, position: Position) -> bool {
        match self {
            Region::Polygon(polygon) => Point::new(position.x, position.y).intersects(polygon),
            Region::NonPolygonal     => false,
        }
    }

    #[inline]
    pub fn is_polygonal(&self) -> bool {
        matches!(self, Region::Polygon(_))
    }
}

fn ring_to_line_string(ring: Vec<[f64; 2]>) -> LineString<f64> {
    ring.into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect::<Vec<_>>()
        .into()
}
