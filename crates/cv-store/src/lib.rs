//! `cv-store`: the simulation store shared by ingestion and playback.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`store`]     | `SimulationStore`: time labels + actor histories           |
//! | [`occupancy`] | `Occupancy`: per-status head count inside a region         |
//! | [`report`]    | `IngestReport`: outcome of one `append_step` call           |
//!
//! # Step model
//!
//! `times.len()` is the authoritative step count.  Every actor history has
//! at most that many samples; an actor that skipped the newest step simply
//! lags and contributes nothing there.  Queries take a requested step as a
//! signed integer and clamp it into `[0, last_step]`; out-of-range requests
//! are never an error.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                  |
//! |-----------|---------------------------------------------------------|
//! | `fx-hash` | Uses FxHash for the `ActorId` index.                    |

pub mod occupancy;
pub mod report;
pub mod store;

#[cfg(test)]
mod tests;

pub use occupancy::Occupancy;
pub use report::IngestReport;
pub use store::SimulationStore;
