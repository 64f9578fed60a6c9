//! Display-refresh frame scheduling.
//!
//! The playback loop never calls itself.  Each frame asks a
//! [`FrameScheduler`] for the next one and receives a [`FrameToken`]; the
//! host (a browser's `requestAnimationFrame`, a timer, a test) later calls
//! [`Player::on_animation_frame`][crate::Player::on_animation_frame] with
//! that token.  Cancelling is cooperative: a frame already being handled
//! completes, only the pending one is withdrawn.

use std::collections::VecDeque;

/// Handle for one requested frame.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct FrameToken(pub u64);

/// Source of animation frames.
pub trait FrameScheduler {
    /// Request one callback at the next display refresh.
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a previously requested frame.  Unknown or already-fired
    /// tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// A [`FrameScheduler`] that just queues tokens for the host loop to pop.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next:    u64,
    pending: VecDeque<FrameToken>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest pending frame, if any.
    pub fn pop(&mut self) -> Option<FrameToken> {
        self.pending.pop_front()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next += 1;
        self.pending.push_back(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|&t| t != token);
    }
}
