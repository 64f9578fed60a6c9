//! `cv-output`: records what the player renders.
//!
//! | Type                 | Output                                                   |
//! |----------------------|----------------------------------------------------------|
//! | [`CsvFrameRecorder`] | one CSV row per rendered step: `step,time,features,occupants,S,E,I,R,D` |
//!
//! The recorder is a [`cv_playback::PlaybackListener`], so it is passed to
//! the `Player` directly or paired with another listener as a tuple.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cv_output::CsvFrameRecorder;
//!
//! let recorder = CsvFrameRecorder::create(Path::new("frames.csv"))?;
//! let mut player = Player::new(config, surface, FrameQueue::new(), Outbox::new(), recorder)?;
//! // … drive the player …
//! let (_, _, _, mut recorder) = player.into_parts();
//! recorder.finish()?;
//! ```

pub mod error;
pub mod recorder;
pub mod row;


pub use error::{OutputError, OutputResult};
pub use recorder::CsvFrameRecorder;
pub use row::FrameRow;
