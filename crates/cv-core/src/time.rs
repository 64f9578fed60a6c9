//! Simulation time labels.
//!
//! The server stamps every streamed step with a timestamp (a date string in
//! practice).  The engine never interprets it: labels are only stored in
//! arrival order and matched exactly when seeking by time.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque per-step time label.
///
/// Numeric timestamps are normalised to their JSON text so that lookups by
/// label behave the same whether the server sent `"2020-03-01"` or `1583020800`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(transparent)]
pub struct TimeLabel(String);

impl TimeLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimeLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for TimeLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLabel::deserialize(deserializer)? {
            RawLabel::Text(s)   => TimeLabel(s),
            RawLabel::Number(n) => TimeLabel(n.to_string()),
        })
    }
}
