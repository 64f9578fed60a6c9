//! `Inbox`: arrival-ordered queue of received messages.
//!
//! The transport pushes messages as they arrive; the [`Player`][crate::Player]
//! drains them on its own schedule (typically once per animation frame), so
//! ingestion never runs in the middle of a frame.

use std::collections::VecDeque;

use crate::{Message, PlaybackResult};

#[derive(Debug, Default)]
pub struct Inbox {
    queue: VecDeque<Message>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Parse a JSON text frame and enqueue it.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::MalformedMessage`][crate::PlaybackError::MalformedMessage]
    /// for invalid JSON or an unrecognised `type`; nothing is enqueued.
    pub fn push_json(&mut self, text: &str) -> PlaybackResult<()> {
        self.queue.push_back(Message::from_json(text)?);
        Ok(())
    }

    /// Oldest queued message.
    pub fn pop(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
