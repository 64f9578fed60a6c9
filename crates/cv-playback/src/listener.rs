//! Playback listener trait for UI state and frame recording.

use cv_core::{Step, TimeLabel};
use cv_store::Occupancy;

use crate::PlaybackState;

/// What was pushed to the surface for one rendered step.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedFrame<'a> {
    /// Step chosen by the scheduler (or requested by a seek).
    pub step:      Step,
    /// Step whose data was actually shown, after clamping to what has been
    /// ingested.
    pub data_step: Step,
    /// Label of `data_step`, if any data has arrived.
    pub time:      Option<&'a TimeLabel>,
    /// Number of features in the snapshot.
    pub features:  usize,
    /// Head count for the selected region, if one is selected.
    pub occupancy: Option<Occupancy>,
}

/// Callbacks invoked by [`Player`][crate::Player] as playback progresses.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress logger
///
/// ```rust,ignore
/// struct Progress;
///
/// impl PlaybackListener for Progress {
///     fn on_step_rendered(&mut self, frame: &RenderedFrame<'_>) {
///         tracing::info!(step = %frame.step, features = frame.features, "frame");
///     }
/// }
/// ```
pub trait PlaybackListener {
    /// The user asked the server for a new run; a metadata message has not
    /// arrived yet.
    fn on_start_requested(&mut self) {}

    /// The playback state machine moved from `from` to `to`.  Reaching
    /// `Completed` or `Stopped` is the end-of-playback signal.
    fn on_state_change(&mut self, _from: PlaybackState, _to: PlaybackState) {}

    /// A snapshot was pushed to the rendering surface.
    fn on_step_rendered(&mut self, _frame: &RenderedFrame<'_>) {}
}

/// A [`PlaybackListener`] that does nothing.
pub struct NoopListener;

impl PlaybackListener for NoopListener {}

impl<L: PlaybackListener + ?Sized> PlaybackListener for &mut L {
    fn on_start_requested(&mut self) {
        (**self).on_start_requested();
    }

    fn on_state_change(&mut self, from: PlaybackState, to: PlaybackState) {
        (**self).on_state_change(from, to);
    }

    fn on_step_rendered(&mut self, frame: &RenderedFrame<'_>) {
        (**self).on_step_rendered(frame);
    }
}

/// Fan out to two listeners, first `A` then `B`.
impl<A: PlaybackListener, B: PlaybackListener> PlaybackListener for (A, B) {
    fn on_start_requested(&mut self) {
        self.0.on_start_requested();
        self.1.on_start_requested();
    }

    fn on_state_change(&mut self, from: PlaybackState, to: PlaybackState) {
        self.0.on_state_change(from, to);
        self.1.on_state_change(from, to);
    }

    fn on_step_rendered(&mut self, frame: &RenderedFrame<'_>) {
        self.0.on_step_rendered(frame);
        self.1.on_step_rendered(frame);
    }
}

// ── ControlPanel ──────────────────────────────────────────────────────────────

/// Enablement of the START/STOP buttons.
///
/// Exactly one button is enabled at a time.  START is disabled as soon as
/// it is pressed and stays disabled while a run plays; it comes back when
/// playback completes or is stopped.  The UI layer reads
/// [`start_enabled`](Self::start_enabled) and updates its widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlPanel {
    start_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self { start_enabled: true }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    #[inline]
    pub fn stop_enabled(&self) -> bool {
        !self.start_enabled
    }
}

impl PlaybackListener for ControlPanel {
    fn on_start_requested(&mut self) {
        self.start_enabled = false;
    }

    fn on_state_change(&mut self, _from: PlaybackState, to: PlaybackState) {
        self.start_enabled = to != PlaybackState::Running;
    }
}
