//! Movement trails: the features one actor contributes to a snapshot.
//!
//! Walking backward from the displayed step, at most `max_trail_length`
//! steps are inspected.  A step contributes a point only if the actor was
//! placed and has moved since the last kept point:
//!
//! ```text
//! step:      5      4      3      2      1
//! position:  B      B      A      unset  C
//! kept:      B(0)   -      A(2)   -      C(4)
//! line:      C → A → B             (oldest first)
//! ```
//!
//! Points are yielded newest first, each tagged with its status at that step
//! and its `order` (distance back from the displayed step).  When two or more
//! points were kept, a single line feature joining them follows.

use std::vec;

use cv_core::{ActorId, Feature, Position, Status, Step};
use tracing::debug;

use crate::ActorHistory;

struct TrailPoint<'a> {
    position: Position,
    status:   &'a Status,
    order:    usize,
}

/// Feature iterator for one actor at one step.
///
/// Created by [`ActorHistory::trail_at`].  Kept points are collected up
/// front (never more than `max_trail_length`); features themselves are only
/// built as the iterator is consumed.
pub struct Trail<'a> {
    actor:  &'a ActorId,
    points: vec::IntoIter<TrailPoint<'a>>,
    line:   Option<Vec<Position>>,
}

impl<'a> Trail<'a> {
    pub(crate) fn new(history: &'a ActorHistory, step: Step, max_trail_length: usize) -> Self {
        let actor = history.id();

        if step.index() >= history.len() {
            debug!(%actor, %step, recorded = history.len(), "no sample at step");
            return Self::empty(actor);
        }

        let mut points: Vec<TrailPoint<'a>> = Vec::with_capacity(max_trail_length);
        let mut last: Option<Position> = None;

        for order in 0..max_trail_length {
            let Some(at) = step.back(order) else { break };
            let Some((Some(position), status)) = history.sample_at(at) else {
                continue;
            };
            if last == Some(position) {
                continue;
            }
            if !status.is_known() {
                debug!(%actor, step = %at, %status, "rendering unknown status");
            }
            points.push(TrailPoint { position, status, order });
            last = Some(position);
        }

        let line = (points.len() > 1)
            .then(|| points.iter().rev().map(|p| p.position).collect());

        Self {
            actor,
            points: points.into_iter(),
            line,
        }
    }

    fn empty(actor: &'a ActorId) -> Self {
        Self {
            actor,
            points: Vec::new().into_iter(),
            line:   None,
        }
    }
}

impl Iterator for Trail<'_> {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        if let Some(p) = self.points.next() {
            return Some(Feature::point(self.actor.clone(), p.position, p.status.clone(), p.order));
        }
        self.line
            .take()
            .map(|positions| Feature::line(self.actor.clone(), positions))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.points.len() + usize::from(self.line.is_some());
        (n, Some(n))
    }
}

impl ExactSizeIterator for Trail<'_> {}
