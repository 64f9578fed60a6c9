//! `cv-playback`: turns a stream of server messages into animated map
//! updates.
//!
//! # Frame loop
//!
//! ```text
//! server ──Message──▶ Inbox ──process_inbox──▶ Player ──▶ SimulationStore
//!                                                │
//!   FrameScheduler ──token, timestamp──▶ on_animation_frame
//!                                                │
//!                     PlaybackScheduler decides which step to show
//!                                                │
//!              RenderSurface ◀── snapshot + occupancy ──┘
//! ```
//!
//! A run is announced by a `metadata` message carrying the step total.  The
//! [`PlaybackScheduler`] then maps wall-clock time since the first frame onto
//! that step range, so a run always takes `animation_period_ms` to replay
//! regardless of display refresh rate.  Each frame schedules the next one;
//! stopping cancels the pending frame, and a frame that fires anyway is
//! ignored because the scheduler checks its state and token first.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`message`]   | Wire `Message` envelope (inbound and outbound)             |
//! | [`inbox`]     | `Inbox`: FIFO of received messages                         |
//! | [`frame`]     | `FrameScheduler` trait, `FrameToken`, `FrameQueue`         |
//! | [`surface`]   | `RenderSurface` and `Transport` traits, `Outbox`           |
//! | [`listener`]  | `PlaybackListener`, `RenderedFrame`, `ControlPanel`        |
//! | [`scheduler`] | `PlaybackScheduler` state machine                          |
//! | [`player`]    | `Player`: owns the store and drives all collaborators      |
//! | [`error`]     | `PlaybackError`, `PlaybackResult<T>`                       |

pub mod error;
pub mod frame;
pub mod inbox;
pub mod listener;
pub mod message;
pub mod player;
pub mod scheduler;
pub mod surface;


pub use error::{PlaybackError, PlaybackResult};
pub use frame::{FrameQueue, FrameScheduler, FrameToken};
pub use inbox::Inbox;
pub use listener::{ControlPanel, NoopListener, PlaybackListener, RenderedFrame};
pub use message::{ControlAction, ControlPayload, DataPayload, Message, MetadataPayload};
pub use player::Player;
pub use scheduler::{target_step, FrameDecision, PlaybackScheduler, PlaybackSession, PlaybackState, Transition};
pub use surface::{Outbox, RenderSurface, Transport};
