//! Identifier types.
//!
//! `ActorId` is the server's opaque key for an agent; `Step` is the index of
//! a simulation time step in the order the server streamed it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ── ActorId ───────────────────────────────────────────────────────────────────

/// Opaque, stable actor key as sent by the simulation server.
///
/// The server may send ids as JSON strings or numbers; both are normalised to
/// their string form so `"7"` and `7` name the same actor.  The inner
/// `Arc<str>` makes the clone attached to every emitted feature a refcount
/// bump rather than an allocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct ActorId(Arc<str>);

impl ActorId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for ActorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Wire shape of an id: either a JSON string or a JSON number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s)   => ActorId::new(s),
            RawId::Number(n) => ActorId::new(n.to_string()),
        })
    }
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// Index of a simulation time step: the position of its time label in the
/// store's append-only `times` sequence.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Step(pub usize);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0
    }

    /// The step `n` steps before `self`, or `None` if that would precede
    /// step 0.
    #[inline]
    pub fn back(self, n: usize) -> Option<Step> {
        self.0.checked_sub(n).map(Step)
    }

    /// The step immediately after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<Step> for usize {
    #[inline(always)]
    fn from(step: Step) -> usize {
        step.0
    }
}
