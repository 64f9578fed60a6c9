//! The `Player`: owns the store and wires the scheduler to its collaborators.

use cv_core::{FeatureCollection, Region, Step, TimeLabel, ViewerConfig};
use cv_store::SimulationStore;
use tracing::{debug, info, warn};

use crate::scheduler::Transition;
use crate::{
    ControlAction, ControlPayload, DataPayload, FrameDecision, FrameScheduler, FrameToken, Inbox,
    Message, MetadataPayload, PlaybackListener, PlaybackResult, PlaybackScheduler, PlaybackState,
    RenderSurface, RenderedFrame, Transport,
};

/// The playback engine as seen by the embedding application.
///
/// `Player<S, F, T, L>` holds the [`SimulationStore`] and the
/// [`PlaybackScheduler`] and drives four pluggable collaborators:
///
/// | Parameter | Trait               | Role                                      |
/// |-----------|---------------------|-------------------------------------------|
/// | `S`       | [`RenderSurface`]   | receives snapshots and occupancy counts   |
/// | `F`       | [`FrameScheduler`]  | delivers display-refresh frames           |
/// | `T`       | [`Transport`]       | carries control messages to the server    |
/// | `L`       | [`PlaybackListener`]| UI state, recording, progress             |
///
/// Everything runs on the caller's thread.  The host pushes received
/// messages into the inbox, calls [`process_inbox`](Self::process_inbox)
/// whenever convenient, and forwards each frame callback to
/// [`on_animation_frame`](Self::on_animation_frame).
pub struct Player<S, F, T, L>
where
    S: RenderSurface,
    F: FrameScheduler,
    T: Transport,
    L: PlaybackListener,
{
    config:    ViewerConfig,
    store:     SimulationStore,
    scheduler: PlaybackScheduler,
    inbox:     Inbox,

    /// Region whose occupancy is shown alongside every rendered step.
    selection: Option<Region>,

    /// Data step currently on the surface.
    displayed: Option<Step>,

    /// Step total of the most recent `metadata` announcement.
    announced_total: Option<usize>,

    surface:   S,
    frames:    F,
    transport: T,
    listener:  L,
}

impl<S, F, T, L> Player<S, F, T, L>
where
    S: RenderSurface,
    F: FrameScheduler,
    T: Transport,
    L: PlaybackListener,
{
    /// Create an idle player.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::Core`][crate::PlaybackError::Core] if
    /// `config` fails validation.
    pub fn new(
        config:    ViewerConfig,
        surface:   S,
        frames:    F,
        transport: T,
        listener:  L,
    ) -> PlaybackResult<Self> {
        config.validate()?;
        Ok(Self {
            store:           SimulationStore::new(&config),
            scheduler:       PlaybackScheduler::new(config.animation_period()),
            inbox:           Inbox::new(),
            selection:       None,
            displayed:       None,
            announced_total: None,
            config,
            surface,
            frames,
            transport,
            listener,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn store(&self) -> &SimulationStore {
        &self.store
    }

    pub fn scheduler(&self) -> &PlaybackScheduler {
        &self.scheduler
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.scheduler.state()
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub fn selection(&self) -> Option<&Region> {
        self.selection.as_ref()
    }

    /// Data step currently shown on the surface.
    pub fn displayed_step(&self) -> Option<Step> {
        self.displayed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn frames_mut(&mut self) -> &mut F {
        &mut self.frames
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Tear down, returning the collaborators.
    pub fn into_parts(self) -> (S, F, T, L) {
        (self.surface, self.frames, self.transport, self.listener)
    }

    // ── Message intake ────────────────────────────────────────────────────

    /// Queue a received message for the next [`process_inbox`](Self::process_inbox).
    pub fn receive(&mut self, message: Message) {
        self.inbox.push(message);
    }

    /// Queue a received JSON text frame.  Malformed frames are logged and
    /// dropped; returns whether the frame was queued.
    pub fn receive_json(&mut self, text: &str) -> bool {
        match self.inbox.push_json(text) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "ignoring malformed message");
                false
            }
        }
    }

    /// Handle every queued message in arrival order.  Returns how many were
    /// handled.
    pub fn process_inbox(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.inbox.pop() {
            self.dispatch(message);
            handled += 1;
        }
        handled
    }

    /// Handle one message immediately, bypassing the inbox.
    pub fn dispatch(&mut self, message: Message) {
        debug!(kind = message.kind(), "message");
        match message {
            Message::Metadata(MetadataPayload::Simulation { length }) => {
                self.begin_run(length);
            }
            Message::Data(DataPayload::Simulation { timestamp, data }) => {
                let report = self.store.append_step(timestamp, data);
                if !report.is_clean() {
                    warn!(
                        step = %report.step,
                        rejected = report.rejected.len(),
                        "samples dropped as out of sequence"
                    );
                }
            }
            Message::Data(DataPayload::Geojson { data }) => {
                self.surface.show_geojson(&data);
            }
            Message::Control(ControlPayload::Simulation { action: ControlAction::Start, .. }) => {
                match self.announced_total {
                    Some(total) => self.restart(total),
                    None => debug!("start ignored: no run announced yet"),
                }
            }
            Message::Control(ControlPayload::Simulation { action: ControlAction::Stop, .. }) => {
                self.stop();
            }
        }
    }

    // ── Playback control ──────────────────────────────────────────────────

    /// Ask the server for a new run starting at `start_date`.
    ///
    /// Playback itself begins when the server's `metadata` reply arrives.
    pub fn request_start(&mut self, start_date: &str) {
        info!(start_date, "requesting simulation run");
        self.transport.send(Message::start(start_date));
        self.listener.on_start_requested();
    }

    /// Ask the server to stop and stop local playback.
    pub fn request_stop(&mut self) {
        self.transport.send(Message::stop());
        self.stop();
    }

    /// Stop playback.  Returns `false` if nothing was running.
    pub fn stop(&mut self) -> bool {
        match self.scheduler.stop() {
            Some(transition) => {
                info!("playback stopped");
                self.apply_transition(transition);
                true
            }
            None => false,
        }
    }

    /// A new run was announced: discard the previous run's data and start
    /// animating from step 0.
    fn begin_run(&mut self, step_total: usize) {
        info!(step_total, "simulation announced");
        self.store = SimulationStore::new(&self.config);
        self.displayed = None;
        self.restart(step_total);
    }

    /// Restart the animation over whatever data the store holds.
    fn restart(&mut self, step_total: usize) {
        self.announced_total = Some(step_total);
        let transition = self.scheduler.announce(step_total);
        let token = self.frames.request_frame();
        self.scheduler.arm(token);
        self.apply_transition(transition);
    }

    fn apply_transition(&mut self, transition: Transition) {
        if let Some(token) = transition.cancelled {
            self.frames.cancel_frame(token);
        }
        self.listener.on_state_change(transition.from, transition.to);
    }

    // ── Frames ────────────────────────────────────────────────────────────

    /// Frame callback from the host.
    ///
    /// Renders the step the scheduler picks and requests the next frame, or
    /// completes playback once the animation period has elapsed.  Frames
    /// that are stale (cancelled, from a superseded run, or arriving after
    /// stop) are ignored.
    pub fn on_animation_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> FrameDecision {
        let decision = self.scheduler.on_frame(token, timestamp_ms);
        match decision {
            FrameDecision::Stale => {}
            FrameDecision::Continue { render } => {
                if let Some(step) = render {
                    self.render_step(step);
                }
                let next = self.frames.request_frame();
                self.scheduler.arm(next);
            }
            FrameDecision::Complete { render } => {
                if let Some(step) = render {
                    self.render_step(step);
                }
                info!("playback completed");
                self.listener.on_state_change(PlaybackState::Running, PlaybackState::Completed);
            }
        }
        decision
    }

    // ── Display ───────────────────────────────────────────────────────────

    /// Show the step labelled `time` without affecting any running playback
    /// state.  Unknown labels show step 0.
    pub fn show_time(&mut self, time: &TimeLabel) {
        let requested = self.store.step_of_time(time).map_or(-1, |s| s.index() as i64);
        let features = self.store.snapshot_at_time(time);
        self.present(self.store.clamp_step(requested), features);
    }

    /// Change the selected region and refresh the occupancy display for the
    /// currently shown step.
    pub fn select_region(&mut self, region: Option<Region>) {
        self.selection = region;
        match (&self.selection, self.displayed) {
            (Some(region), Some(step)) => {
                let counts = self.store.occupancy_at(step.index() as i64, region);
                self.surface.set_occupancy(Some(&counts));
            }
            (None, _) => self.surface.set_occupancy(None),
            (Some(_), None) => {}
        }
    }

    fn render_step(&mut self, step: Step) {
        let features = self.store.snapshot_at(step.index() as i64);
        self.present(step, features);
    }

    fn present(&mut self, step: Step, features: FeatureCollection) {
        let data_step = self.store.clamp_step(step.index() as i64);
        self.surface.set_simulation_features(&features);

        let occupancy = self
            .selection
            .as_ref()
            .map(|region| self.store.occupancy_at(data_step.index() as i64, region));
        if let Some(counts) = &occupancy {
            self.surface.set_occupancy(Some(counts));
        }
        self.displayed = Some(data_step);

        let frame = RenderedFrame {
            step,
            data_step,
            time: self.store.time_at(data_step),
            features: features.len(),
            occupancy,
        };
        self.listener.on_step_rendered(&frame);
    }
}
