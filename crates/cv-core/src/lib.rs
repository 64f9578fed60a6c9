//! `cv-core`: foundational types for the epidemic map viewer's playback
//! engine.
//!
//! This crate is a dependency of every other `cv-*` crate.  It has no `cv-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `ActorId` (opaque server key), `Step` (time index)       |
//! | [`status`]      | `Status`: S/E/I/R/D plus tolerated unknown values        |
//! | [`spatial`]     | `Position`, `UnsetMarker`, `Region` (point-in-polygon)   |
//! | [`time`]        | `TimeLabel`: the server's per-step timestamp             |
//! | [`sample`]      | `Sample`: one actor's reported state for one step        |
//! | [`feature`]     | GeoJSON `Feature` / `FeatureCollection` output types     |
//! | [`config`]      | `ViewerConfig` (TOML-loadable)                           |
//! | [`error`]       | `CvError`, `CvResult`                                    |

pub mod config;
pub mod error;
pub mod feature;
pub mod ids;
pub mod sample;
pub mod spatial;
pub mod status;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ViewerConfig;
pub use error::{CvError, CvResult};
pub use feature::{Feature, FeatureCollection, FeatureProperties, Geometry};
pub use ids::{ActorId, Step};
pub use sample::Sample;
pub use spatial::{Position, Region, UnsetMarker};
pub use status::Status;
pub use time::TimeLabel;
