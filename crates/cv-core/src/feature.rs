//! GeoJSON output types pushed to the rendering surface.
//!
//! Only the two geometry kinds the playback engine produces are modelled:
//! actor points and trail lines.  Serialisation follows RFC 7946 so the
//! collection can be handed straight to a map library's GeoJSON source.
//!
//! ```json
//! {"type":"FeatureCollection","features":[
//!   {"type":"Feature",
//!    "geometry":{"type":"Point","coordinates":[2.0,2.0]},
//!    "properties":{"id":"a1","status":"I","order":0}}
//! ]}
//! ```

use serde::{Deserialize, Serialize};

use crate::{ActorId, Position, Status};

/// Feature geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
}

/// Properties attached to every feature.
///
/// Point features carry all three fields; trail lines carry only `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub id: ActorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Distance back in steps from the displayed step (0 = current).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry:   Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    /// An actor position tagged with its status and trail order.
    pub fn point(id: ActorId, position: Position, status: Status, order: usize) -> Self {
        Self {
            geometry:   Geometry::Point { coordinates: position.to_array() },
            properties: FeatureProperties { id, status: Some(status), order: Some(order) },
        }
    }

    /// A trail line through `positions` in the order given.
    pub fn line(id: ActorId, positions: impl IntoIterator<Item = Position>) -> Self {
        Self {
            geometry: Geometry::LineString {
                coordinates: positions.into_iter().map(Position::to_array).collect(),
            },
            properties: FeatureProperties { id, status: None, order: None },
        }
    }

    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self.geometry, Geometry::Point { .. })
    }

    #[inline]
    pub fn is_line(&self) -> bool {
        matches!(self.geometry, Geometry::LineString { .. })
    }
}

/// The full contents of the displayed simulation layer for one step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serialise to a GeoJSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        Self { features: iter.into_iter().collect() }
    }
}
