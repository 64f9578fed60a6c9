//! Outbound seams: the map surface and the server connection.
//!
//! Both are fire-and-forget.  The engine hands data over and carries on; it
//! never waits for a render or a send to complete.

use cv_core::FeatureCollection;
use cv_store::Occupancy;

use crate::Message;

/// The map view that displays the simulation layer.
pub trait RenderSurface {
    /// Replace the contents of the simulation layer.
    fn set_simulation_features(&mut self, features: &FeatureCollection);

    /// Show (or with `None`, clear) the head count for the selected region.
    fn set_occupancy(&mut self, _occupancy: Option<&Occupancy>) {}

    /// Display a GeoJSON document passed through from the server.
    fn show_geojson(&mut self, _geojson: &str) {}
}

/// Sends control messages to the simulation server.
pub trait Transport {
    fn send(&mut self, message: Message);
}

/// A [`Transport`] that collects messages for the host to forward.
#[derive(Debug, Default)]
pub struct Outbox {
    sent: Vec<Message>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub fn sent(&self) -> &[Message] {
        &self.sent
    }

    /// Remove and return everything sent so far.
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for Outbox {
    fn send(&mut self, message: Message) {
        self.sent.push(message);
    }
}
