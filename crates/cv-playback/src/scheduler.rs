//! The playback state machine.
//!
//! ```text
//!            announce                 period elapsed
//!   Idle ─────────────▶ Running ───────────────────▶ Completed
//!                        │  ▲                           │
//!                   stop │  │ announce                  │ announce
//!                        ▼  │                           │
//!                       Stopped ◀───────────────────────┘ (any terminal
//!                                                          state restarts)
//! ```
//!
//! The scheduler is pure bookkeeping: it never renders, requests frames, or
//! notifies anyone.  [`Player`][crate::Player] acts on the decisions it
//! returns.

use std::time::Duration;

use cv_core::Step;
use tracing::debug;

use crate::FrameToken;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    Idle,
    Running,
    Completed,
    Stopped,
}

impl PlaybackState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, PlaybackState::Completed | PlaybackState::Stopped)
    }
}

/// Per-run playback bookkeeping.  Replaced wholesale on every announcement.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackSession {
    /// Declared length of the run.
    pub step_total: usize,
    /// Lowest step not yet rendered.  Never decreases during a run.
    pub step_number: usize,
    /// Timestamp of the first frame; `None` until that frame arrives.
    pub animation_start_ms: Option<f64>,
    /// Wall-clock time allotted to the whole run.
    pub animation_period_ms: f64,
}

impl PlaybackSession {
    fn new(step_total: usize, animation_period_ms: f64) -> Self {
        Self {
            step_total,
            step_number: 0,
            animation_start_ms: None,
            animation_period_ms,
        }
    }

    /// Last step that has been rendered this run, if any.
    pub fn last_rendered(&self) -> Option<Step> {
        self.step_number.checked_sub(1).map(Step)
    }
}

/// What the host should do after a frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameDecision {
    /// The frame was cancelled, superseded, or arrived outside a run.  Do
    /// nothing.
    Stale,
    /// Render `render` (if any) and request another frame.
    Continue { render: Option<Step> },
    /// Render `render` (if any); playback is now `Completed`.
    Complete { render: Option<Step> },
}

/// State returned when a run (re)starts or stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from:      PlaybackState,
    pub to:        PlaybackState,
    /// Pending frame that must be cancelled with the frame scheduler.
    pub cancelled: Option<FrameToken>,
}

/// Maps wall-clock time since the first frame onto the step range of the
/// announced run.
#[derive(Debug)]
pub struct PlaybackScheduler {
    state:               PlaybackState,
    session:             Option<PlaybackSession>,
    pending:             Option<FrameToken>,
    animation_period_ms: f64,
}

impl PlaybackScheduler {
    pub fn new(animation_period: Duration) -> Self {
        Self {
            state:               PlaybackState::Idle,
            session:             None,
            pending:             None,
            animation_period_ms: animation_period.as_secs_f64() * 1_000.0,
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// The frame the scheduler is waiting for, if any.
    #[inline]
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Begin a run of `step_total` steps from any state.
    ///
    /// Resets the session (start timestamp unset, cursor at step 0).  The
    /// caller must cancel `cancelled`, request a frame, and [`arm`](Self::arm)
    /// the scheduler with it.
    pub fn announce(&mut self, step_total: usize) -> Transition {
        let from = self.state;
        let cancelled = self.pending.take();
        self.session = Some(PlaybackSession::new(step_total, self.animation_period_ms));
        self.state = PlaybackState::Running;
        Transition { from, to: PlaybackState::Running, cancelled }
    }

    /// Record the frame requested for the next tick.
    pub fn arm(&mut self, token: FrameToken) {
        self.pending = Some(token);
    }

    /// Handle the frame identified by `token`, fired at `timestamp_ms`.
    ///
    /// The first frame of a run latches the start timestamp.  The target step
    /// is `round(elapsed * step_total / period)`, clamped to the last step;
    /// it is rendered only if it is past the last rendered step.  Once the
    /// period has elapsed the final step is forced out (if not already shown)
    /// and the run completes.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> FrameDecision {
        if self.state != PlaybackState::Running || self.pending != Some(token) {
            debug!(?token, state = ?self.state, "stale frame ignored");
            return FrameDecision::Stale;
        }
        self.pending = None;

        let Some(session) = self.session.as_mut() else {
            return FrameDecision::Stale;
        };

        let start = *session.animation_start_ms.get_or_insert(timestamp_ms);
        let elapsed = (timestamp_ms - start).max(0.0);
        let last = session.step_total.checked_sub(1);

        if elapsed >= session.animation_period_ms {
            let render = last.filter(|&l| l >= session.step_number);
            if let Some(l) = render {
                session.step_number = l + 1;
            }
            self.state = PlaybackState::Completed;
            return FrameDecision::Complete { render: render.map(Step) };
        }

        let render = last
            .map(|l| target_step(elapsed, session.step_total, session.animation_period_ms).min(l))
            .filter(|&target| target >= session.step_number);
        if let Some(target) = render {
            session.step_number = target + 1;
        }
        FrameDecision::Continue { render: render.map(Step) }
    }

    /// Stop a running playback.
    ///
    /// Returns `None` (and changes nothing) unless the state is `Running`, so
    /// repeated calls are harmless.
    pub fn stop(&mut self) -> Option<Transition> {
        if self.state != PlaybackState::Running {
            return None;
        }
        self.state = PlaybackState::Stopped;
        Some(Transition {
            from:      PlaybackState::Running,
            to:        PlaybackState::Stopped,
            cancelled: self.pending.take(),
        })
    }
}

/// Step shown `elapsed_ms` into a replay of `step_total` steps lasting
/// `period_ms`.  Not clamped.
pub fn target_step(elapsed_ms: f64, step_total: usize, period_ms: f64) -> usize {
    let target = (elapsed_ms * step_total as f64 / period_ms).round();
    if target <= 0.0 { 0 } else { target as usize }
}
