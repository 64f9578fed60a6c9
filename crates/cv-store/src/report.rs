//! Outcome of ingesting one step.

use cv_actor::ActorError;
use cv_core::Step;

/// What [`SimulationStore::append_step`][crate::SimulationStore::append_step]
/// did with a batch of samples.
///
/// Rejections are data-quality anomalies, not failures: the step itself is
/// always appended and every other sample in the batch is still recorded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IngestReport {
    /// Index assigned to the new step.
    pub step:       Step,
    /// Samples appended to an actor history.
    pub accepted:   usize,
    /// Actors seen for the first time in this batch.
    pub new_actors: usize,
    /// Samples dropped because they were out of sequence for their actor.
    pub rejected:   Vec<ActorError>,
}

impl IngestReport {
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}
