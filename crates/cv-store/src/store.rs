//! The `SimulationStore`: step-indexed history of every actor in a run.

use cv_actor::ActorHistory;
use cv_core::{ActorId, FeatureCollection, Region, Sample, Step, TimeLabel, UnsetMarker, ViewerConfig};
use tracing::debug;

use crate::{IngestReport, Occupancy};

#[cfg(feature = "fx-hash")]
type ActorIndex = rustc_hash::FxHashMap<ActorId, usize>;
#[cfg(not(feature = "fx-hash"))]
type ActorIndex = std::collections::HashMap<ActorId, usize>;

/// Owns the time-label sequence and one [`ActorHistory`] per actor.
///
/// Histories are kept in a `Vec` in first-seen order and located through a
/// hash index, so snapshots enumerate actors in a stable order and two
/// queries against unchanged contents produce identical output.
///
/// Every method runs to completion synchronously.  Ingestion may be
/// interleaved with queries between animation frames, but each
/// `append_step` either fully records a sample or rejects it, so a query
/// never observes a partial step for any actor.
pub struct SimulationStore {
    times:  Vec<TimeLabel>,
    actors: Vec<ActorHistory>,
    index:  ActorIndex,

    /// Coordinates treated as "not yet placed".
    unset_marker: UnsetMarker,

    /// Steps inspected per actor trail in [`snapshot_at`](Self::snapshot_at).
    max_trail_length: usize,
}

impl Default for SimulationStore {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl SimulationStore {
    /// Create an empty store using the trail length and unset marker from
    /// `config`.
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            times:            Vec::new(),
            actors:           Vec::new(),
            index:            ActorIndex::default(),
            unset_marker:     config.unset_marker,
            max_trail_length: config.max_trail_length,
        }
    }

    // ── Ingestion ─────────────────────────────────────────────────────────

    /// Append a new step labelled `time` and record every sample at it.
    ///
    /// Actors are created on their first sample.  Samples are processed in
    /// the order given, so a second sample for the same actor in one batch is
    /// rejected as out of sequence.
    pub fn append_step<I>(&mut self, time: TimeLabel, samples: I) -> IngestReport
    where
        I: IntoIterator<Item = Sample>,
    {
        let step = Step(self.times.len());
        self.times.push(time);

        let mut report = IngestReport { step, ..IngestReport::default() };

        for sample in samples {
            let slot = match self.index.get(&sample.id) {
                Some(&slot) => slot,
                None => {
                    let slot = self.actors.len();
                    self.index.insert(sample.id.clone(), slot);
                    self.actors.push(ActorHistory::new(sample.id));
                    report.new_actors += 1;
                    slot
                }
            };
            let position = self.unset_marker.classify(sample.position);
            match self.actors[slot].record(step, position, sample.status) {
                Ok(())   => report.accepted += 1,
                Err(err) => report.rejected.push(err),
            }
        }

        debug!(
            %step,
            accepted = report.accepted,
            rejected = report.rejected.len(),
            new_actors = report.new_actors,
            "step ingested"
        );
        report
    }

    // ── Step arithmetic ───────────────────────────────────────────────────

    /// Number of steps ingested so far.
    #[inline]
    pub fn step_count(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The newest step, or `None` before any data has arrived.
    #[inline]
    pub fn last_step(&self) -> Option<Step> {
        self.times.len().checked_sub(1).map(Step)
    }

    /// Clamp a requested step into `[0, last_step]`.
    ///
    /// An empty store has no valid step; it clamps everything to step 0,
    /// which every query then treats as "no data".
    pub fn clamp_step(&self, requested: i64) -> Step {
        let last = self.times.len().saturating_sub(1);
        let clamped = match usize::try_from(requested) {
            Ok(n)  => n.min(last),
            Err(_) => 0,
        };
        if i64::try_from(clamped).ok() != Some(requested) {
            debug!(requested, clamped, "step request clamped");
        }
        Step(clamped)
    }

    /// First step whose label equals `time`.
    pub fn step_of_time(&self, time: &TimeLabel) -> Option<Step> {
        self.times.iter().position(|t| t == time).map(Step)
    }

    /// All time labels in step order.
    #[inline]
    pub fn times(&self) -> &[TimeLabel] {
        &self.times
    }

    /// Label of `step`, if it has been ingested.
    #[inline]
    pub fn time_at(&self, step: Step) -> Option<&TimeLabel> {
        self.times.get(step.index())
    }

    // ── Actors ────────────────────────────────────────────────────────────

    #[inline]
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor(&self, id: &ActorId) -> Option<&ActorHistory> {
        self.index.get(id).map(|&slot| &self.actors[slot])
    }

    /// Histories in first-seen order.
    pub fn actors(&self) -> impl Iterator<Item = &ActorHistory> + '_ {
        self.actors.iter()
    }

    #[inline]
    pub fn max_trail_length(&self) -> usize {
        self.max_trail_length
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Every actor's trail at the clamped step, as one collection.
    pub fn snapshot_at(&self, requested: i64) -> FeatureCollection {
        let step = self.clamp_step(requested);
        self.actors
            .iter()
            .flat_map(|actor| actor.trail_at(step, self.max_trail_length))
            .collect()
    }

    /// Snapshot at the first step labelled `time`.  An unknown label behaves
    /// like a request for step `-1` and therefore shows step 0.
    pub fn snapshot_at_time(&self, time: &TimeLabel) -> FeatureCollection {
        let requested = match self.step_of_time(time) {
            Some(step) => step.index() as i64,
            None => {
                debug!(%time, "no step with this time label");
                -1
            }
        };
        self.snapshot_at(requested)
    }

    /// Head count of actors inside `region` at the clamped step.
    pub fn occupancy_at(&self, requested: i64, region: &Region) -> Occupancy {
        let step = self.clamp_step(requested);
        let mut counts = Occupancy::default();
        for actor in &self.actors {
            if actor.is_in_region(step, region) {
                if let Some(status) = actor.status_at(step) {
                    counts.add(status);
                }
            }
        }
        counts
    }
}
