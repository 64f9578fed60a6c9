//! The `ActorHistory`: one actor's samples, indexed by step.

use cv_core::{ActorId, Position, Region, Status, Step};
use tracing::warn;

use crate::{ActorError, ActorResult, Trail};

/// Append-only `(position, status)` timeline for a single actor.
///
/// `positions` and `statuses` always have the same length; the step index is
/// the index into both.  A `None` position means the server reported the
/// actor as not yet placed at that step.
#[derive(Clone, Debug)]
pub struct ActorHistory {
    id:        ActorId,
    positions: Vec<Option<Position>>,
    statuses:  Vec<Status>,
}

impl ActorHistory {
    pub fn new(id: ActorId) -> Self {
        Self {
            id,
            positions: Vec::new(),
            statuses:  Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Number of recorded steps.  Also the only step `record` will accept.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Append the sample for `step`.
    ///
    /// Both vectors are pushed together or not at all, so readers never see
    /// a half-written step.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::OutOfSequence`] unless `step == self.len()`.  The
    /// history is unchanged in that case.
    pub fn record(
        &mut self,
        step:     Step,
        position: Option<Position>,
        status:   Status,
    ) -> ActorResult<()> {
        let expected = Step(self.len());
        if step != expected {
            warn!(actor = %self.id, %step, %expected, "sample out of sequence, dropped");
            return Err(ActorError::OutOfSequence {
                actor: self.id.clone(),
                expected,
                got: step,
            });
        }
        if !status.is_known() {
            warn!(actor = %self.id, %step, %status, "unknown status");
        }
        self.positions.push(position);
        self.statuses.push(status);
        Ok(())
    }

    /// Recorded position at `step`.  `None` if the actor was unplaced then or
    /// has no sample for `step` yet.
    #[inline]
    pub fn position_at(&self, step: Step) -> Option<Position> {
        self.positions.get(step.index()).copied().flatten()
    }

    /// Recorded status at `step`, if any.
    #[inline]
    pub fn status_at(&self, step: Step) -> Option<&Status> {
        self.statuses.get(step.index())
    }

    /// Renderable features for this actor at `step`: up to `max_trail_length`
    /// trail points plus a connecting line.  See [`Trail`].
    pub fn trail_at(&self, step: Step, max_trail_length: usize) -> Trail<'_> {
        Trail::new(self, step, max_trail_length)
    }

    /// `true` if the actor's position at `step` lies inside `region`.
    ///
    /// Non-polygonal regions, unplaced actors, and steps beyond the recorded
    /// history never match.
    pub fn is_in_region(&self, step: Step, region: &Region) -> bool {
        self.position_at(step)
            .is_some_and(|position| region.contains(position))
    }

    pub(crate) fn sample_at(&self, step: Step) -> Option<(Option<Position>, &Status)> {
        let i = step.index();
        Some((*self.positions.get(i)?, self.statuses.get(i)?))
    }
}
