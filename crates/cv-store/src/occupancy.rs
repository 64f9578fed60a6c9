//! Region head counts.

use cv_core::Status;
use serde::Serialize;

/// Number of actors inside a region at one step, bucketed by status.
///
/// `total` counts every occupant; actors with an unrecognised status are in
/// `total` but in none of the five buckets, so
/// `susceptible + exposed + infected + recovered + dead <= total`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub total:       usize,
    #[serde(rename = "S")]
    pub susceptible: usize,
    #[serde(rename = "E")]
    pub exposed:     usize,
    #[serde(rename = "I")]
    pub infected:    usize,
    #[serde(rename = "R")]
    pub recovered:   usize,
    #[serde(rename = "D")]
    pub dead:        usize,
}

impl Occupancy {
    /// Count one occupant with `status`.
    pub fn add(&mut self, status: &Status) {
        self.total += 1;
        match status {
            Status::Susceptible => self.susceptible += 1,
            Status::Exposed     => self.exposed += 1,
            Status::Infected    => self.infected += 1,
            Status::Recovered   => self.recovered += 1,
            Status::Dead        => self.dead += 1,
            Status::Other(_)    => {}
        }
    }

    /// Sum of the five named buckets.
    pub fn known(&self) -> usize {
        self.susceptible + self.exposed + self.infected + self.recovered + self.dead
    }
}
