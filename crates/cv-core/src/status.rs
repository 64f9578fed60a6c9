//! Epidemic compartment of an actor at one step.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Compartment reported by the server for one actor at one step.
///
/// The five named compartments are the only values the viewer styles and
/// counts.  Anything else is kept verbatim in `Other` so it can still be
/// rendered and counted towards occupancy totals.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Status {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
    Dead,
    Other(String),
}

impl Status {
    /// Parse a wire status letter.  Never fails; unknown values become
    /// [`Status::Other`].
    pub fn parse(s: &str) -> Self {
        match s {
            "S" => Status::Susceptible,
            "E" => Status::Exposed,
            "I" => Status::Infected,
            "R" => Status::Recovered,
            "D" => Status::Dead,
            other => Status::Other(other.to_owned()),
        }
    }

    /// The wire representation (`"S"`, `"E"`, …, or the raw unknown value).
    pub fn as_str(&self) -> &str {
        match self {
            Status::Susceptible => "S",
            Status::Exposed     => "E",
            Status::Infected    => "I",
            Status::Recovered   => "R",
            Status::Dead        => "D",
            Status::Other(s)    => s,
        }
    }

    /// `true` for the five named compartments.
    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Other(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Accepts any JSON value.  Non-string values become [`Status::Other`] holding
/// their JSON text, so `null` reads as `Other("null")`.
impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(raw) => Status::parse(&raw),
            other => Status::Other(other.to_string()),
        })
    }
}
