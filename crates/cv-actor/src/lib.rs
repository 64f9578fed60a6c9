//! `cv-actor`: one actor's recorded timeline.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`history`] | `ActorHistory`: contiguous `(position, status)` per step     |
//! | [`trail`]   | `Trail`: feature iterator for one actor at one step          |
//! | [`error`]   | `ActorError`, `ActorResult<T>`                               |
//!
//! # Write model
//!
//! Histories only grow at the end.  A sample for step `k` is accepted when
//! exactly `k` samples are already recorded; anything else is rejected with
//! [`ActorError::OutOfSequence`] and leaves the history untouched.  There is
//! no reorder buffer.

pub mod error;
pub mod history;
pub mod trail;

#[cfg(test)]
mod tests;

pub use error::{ActorError, ActorResult};
pub use history::ActorHistory;
pub use trail::Trail;
