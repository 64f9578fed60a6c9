//! A single actor report as streamed by the server.

use serde::{Deserialize, Serialize};

use crate::{ActorId, Status};

/// One `{id, position, status}` entry of a `data/simulation` message.
///
/// `position` is the raw wire coordinate; the store decides whether it is a
/// real position or the "not yet placed" sentinel (see
/// [`UnsetMarker`][crate::UnsetMarker]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id:       ActorId,
    pub position: [f64; 2],
    pub status:   Status,
}

impl Sample {
    pub fn new(id: impl Into<ActorId>, position: [f64; 2], status: Status) -> Self {
        Self { id: id.into(), position, status }
    }
}
