//! Viewer configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! max_trail_length    = 5       # points per movement trail
//! animation_period_ms = 60000   # wall-clock length of a full replay
//! unset_marker        = "origin" # or "any_axis_zero" / "never"
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CvError, CvResult, UnsetMarker};

/// Steps inspected per movement trail unless configured otherwise.
pub const DEFAULT_MAX_TRAIL_LENGTH: usize = 5;

/// One minute to replay a whole run, regardless of its step count.
pub const DEFAULT_ANIMATION_PERIOD_MS: u64 = 60_000;

/// Top-level playback configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Maximum number of steps inspected when building an actor's trail.
    pub max_trail_length: usize,

    /// Wall-clock duration allotted to replaying an entire run.
    pub animation_period_ms: u64,

    /// Which incoming coordinates mean "not yet placed".
    pub unset_marker: UnsetMarker,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            max_trail_length:    DEFAULT_MAX_TRAIL_LENGTH,
            animation_period_ms: DEFAULT_ANIMATION_PERIOD_MS,
            unset_marker:        UnsetMarker::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(src: &str) -> CvResult<Self> {
        let config: ViewerConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the playback engine cannot work with.
    pub fn validate(&self) -> CvResult<()> {
        if self.max_trail_length == 0 {
            return Err(CvError::Config("max_trail_length must be at least 1".into()));
        }
        if self.animation_period_ms == 0 {
            return Err(CvError::Config("animation_period_ms must be positive".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_period_ms)
    }
}
