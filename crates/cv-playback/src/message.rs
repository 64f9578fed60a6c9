//! Wire messages exchanged with the simulation server.
//!
//! Every message is a JSON object `{"type": …, "data": {"type": …, …}}`:
//!
//! | Outer `type` | Inner `type`  | Payload                                   | Direction |
//! |--------------|---------------|-------------------------------------------|-----------|
//! | `metadata`   | `simulation`  | `length`: steps in the announced run     | in         |
//! | `data`       | `simulation`  | `timestamp`, `data: [{id, position, status}]` | in    |
//! | `data`       | `geojson`     | `data`: GeoJSON text for another layer   | in         |
//! | `control`    | `simulation`  | `action: "start" \| "stop"`, optional `data` | in/out |
//!
//! Anything else fails to deserialize and is dropped by the caller.  Inside a
//! `data/simulation` batch each sample is parsed on its own: a broken sample
//! is logged and skipped while the rest of the step is kept.

use cv_core::{Sample, TimeLabel};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Message {
    Metadata(MetadataPayload),
    Data(DataPayload),
    Control(ControlPayload),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataPayload {
    /// A new run of `length` steps is about to stream.
    Simulation { length: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DataPayload {
    /// Every actor's sample for one step.
    Simulation {
        timestamp: TimeLabel,
        #[serde(deserialize_with = "lenient_samples")]
        data:      Vec<Sample>,
    },
    /// A GeoJSON document for display outside the simulation layer.
    Geojson { data: String },
}

fn lenient_samples<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Sample>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Sample>(value) {
            Ok(sample) => Some(sample),
            Err(err) => {
                warn!(%err, "dropping malformed sample");
                None
            }
        })
        .collect())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlPayload {
    Simulation {
        action: ControlAction,
        /// Start date requested by the viewer; absent on `stop`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data:   Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Stop,
}

impl Message {
    /// Ask the server to start a run from `start_date`.
    pub fn start(start_date: impl Into<String>) -> Self {
        Message::Control(ControlPayload::Simulation {
            action: ControlAction::Start,
            data:   Some(start_date.into()),
        })
    }

    /// Ask the server to stop streaming.
    pub fn stop() -> Self {
        Message::Control(ControlPayload::Simulation {
            action: ControlAction::Stop,
            data:   None,
        })
    }

    /// Parse one JSON text frame.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Short name for logging: `"metadata/simulation"`, `"data/geojson"`, …
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Metadata(MetadataPayload::Simulation { .. }) => "metadata/simulation",
            Message::Data(DataPayload::Simulation { .. })         => "data/simulation",
            Message::Data(DataPayload::Geojson { .. })            => "data/geojson",
            Message::Control(ControlPayload::Simulation { .. })   => "control/simulation",
        }
    }
}
