//! Unit tests for cv-actor.

use cv_core::{ActorId, Feature, Geometry, Position, Status, Step};

use crate::{ActorError, ActorHistory};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pos(x: f64, y: f64) -> Option<Position> {
    Some(Position::new(x, y))
}

/// History for actor `a1` with one sample per entry, starting at step 0.
fn history(samples: &[(Option<Position>, Status)]) -> ActorHistory {
    let mut h = ActorHistory::new(ActorId::new("a1"));
    for (i, (p, s)) in samples.iter().enumerate() {
        h.record(Step(i), *p, s.clone()).unwrap();
    }
    h
}

fn points(features: &[Feature]) -> Vec<([f64; 2], String, usize)> {
    features
        .iter()
        .filter_map(|f| match &f.geometry {
            Geometry::Point { coordinates } => Some((
                *coordinates,
                f.properties.status.as_ref().map(|s| s.to_string()).unwrap_or_default(),
                f.properties.order.unwrap_or(usize::MAX),
            )),
            Geometry::LineString { .. } => None,
        })
        .collect()
}

fn lines(features: &[Feature]) -> Vec<Vec<[f64; 2]>> {
    features
        .iter()
        .filter_map(|f| match &f.geometry {
            Geometry::LineString { coordinates } => Some(coordinates.clone()),
            Geometry::Point { .. } => None,
        })
        .collect()
}

// ── record ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod record {
    use super::*;

    #[test]
    fn contiguous_writes_accepted() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(2.0, 2.0), Status::Infected),
        ]);
        assert_eq!(h.len(), 2);
        assert_eq!(h.position_at(Step(1)), pos(2.0, 2.0));
        assert_eq!(h.status_at(Step(0)), Some(&Status::Susceptible));
    }

    #[test]
    fn gap_rejected() {
        let mut h = ActorHistory::new(ActorId::new("a1"));
        let err = h.record(Step(1), pos(1.0, 1.0), Status::Susceptible).unwrap_err();
        assert_eq!(
            err,
            ActorError::OutOfSequence {
                actor:    ActorId::new("a1"),
                expected: Step(0),
                got:      Step(1),
            }
        );
        assert!(h.is_empty());
    }

    #[test]
    fn rewrite_of_existing_step_rejected() {
        let mut h = history(&[(pos(1.0, 1.0), Status::Susceptible)]);
        assert!(h.record(Step(0), pos(9.0, 9.0), Status::Dead).is_err());
        assert_eq!(h.len(), 1);
        assert_eq!(h.position_at(Step(0)), pos(1.0, 1.0));
    }

    #[test]
    fn unknown_status_still_recorded() {
        let h = history(&[(pos(1.0, 1.0), Status::Other("Q".into()))]);
        assert_eq!(h.status_at(Step(0)), Some(&Status::Other("Q".into())));
    }

    #[test]
    fn positions_beyond_history_are_none() {
        let h = history(&[(pos(1.0, 1.0), Status::Susceptible)]);
        assert_eq!(h.position_at(Step(1)), None);
        assert_eq!(h.status_at(Step(1)), None);
    }
}

// ── trail_at ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trail {
    use super::*;

    #[test]
    fn single_point_for_trail_of_one() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(2.0, 2.0), Status::Exposed),
        ]);
        let features: Vec<_> = h.trail_at(Step(1), 1).collect();
        assert_eq!(features.len(), 1);
        assert_eq!(points(&features), vec![([2.0, 2.0], "E".to_string(), 0)]);
    }

    #[test]
    fn two_points_and_chronological_line() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(2.0, 2.0), Status::Infected),
        ]);
        let features: Vec<_> = h.trail_at(Step(1), 5).collect();
        assert_eq!(
            points(&features),
            vec![
                ([2.0, 2.0], "I".to_string(), 0),
                ([1.0, 1.0], "S".to_string(), 1),
            ]
        );
        assert_eq!(lines(&features), vec![vec![[1.0, 1.0], [2.0, 2.0]]]);
        assert_eq!(features[2].properties.id, ActorId::new("a1"));
        assert!(features[2].properties.status.is_none());
    }

    #[test]
    fn repeated_positions_collapse() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(1.0, 1.0), Status::Exposed),
        ]);
        let features: Vec<_> = h.trail_at(Step(2), 5).collect();
        assert_eq!(points(&features), vec![([1.0, 1.0], "E".to_string(), 0)]);
        assert!(lines(&features).is_empty(), "a single point draws no line");
    }

    #[test]
    fn unset_positions_skipped_but_order_preserved() {
        let h = history(&[
            (pos(3.0, 3.0), Status::Susceptible),
            (None, Status::Susceptible),
            (pos(4.0, 4.0), Status::Infected),
        ]);
        let features: Vec<_> = h.trail_at(Step(2), 5).collect();
        assert_eq!(
            points(&features),
            vec![
                ([4.0, 4.0], "I".to_string(), 0),
                ([3.0, 3.0], "S".to_string(), 2),
            ]
        );
        assert_eq!(lines(&features), vec![vec![[3.0, 3.0], [4.0, 4.0]]]);
    }

    #[test]
    fn window_is_bounded_by_max_trail_length() {
        let samples: Vec<_> = (1..=10)
            .map(|i| (pos(i as f64, i as f64), Status::Susceptible))
            .collect();
        let h = history(&samples);
        let features: Vec<_> = h.trail_at(Step(9), 3).collect();
        let orders: Vec<usize> = points(&features).into_iter().map(|(_, _, o)| o).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(lines(&features), vec![vec![[8.0, 8.0], [9.0, 9.0], [10.0, 10.0]]]);
    }

    #[test]
    fn window_stops_at_step_zero() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(2.0, 2.0), Status::Susceptible),
        ]);
        assert_eq!(h.trail_at(Step(1), 50).filter(Feature::is_point).count(), 2);
    }

    #[test]
    fn step_beyond_history_is_empty() {
        let h = history(&[(pos(1.0, 1.0), Status::Susceptible)]);
        assert_eq!(h.trail_at(Step(1), 5).count(), 0);
        assert_eq!(ActorHistory::new(ActorId::new("x")).trail_at(Step(0), 5).count(), 0);
    }

    #[test]
    fn unplaced_actor_has_no_features() {
        let h = history(&[(None, Status::Susceptible)]);
        assert_eq!(h.trail_at(Step(0), 5).count(), 0);
    }

    #[test]
    fn unknown_status_is_rendered() {
        let h = history(&[(pos(1.0, 1.0), Status::Other("X".into()))]);
        let features: Vec<_> = h.trail_at(Step(0), 5).collect();
        assert_eq!(points(&features), vec![([1.0, 1.0], "X".to_string(), 0)]);
    }

    #[test]
    fn size_hint_is_exact() {
        let h = history(&[
            (pos(1.0, 1.0), Status::Susceptible),
            (pos(2.0, 2.0), Status::Infected),
        ]);
        let trail = h.trail_at(Step(1), 5);
        assert_eq!(trail.len(), 3);
    }
}

// ── is_in_region ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod region {
    use cv_core::Region;

    use super::*;

    fn square() -> Region {
        Region::rectangle(Position::new(0.0, 0.0), Position::new(10.0, 10.0))
    }

    #[test]
    fn inside_and_outside() {
        let h = history(&[
            (pos(5.0, 5.0), Status::Susceptible),
            (pos(15.0, 5.0), Status::Susceptible),
        ]);
        assert!(h.is_in_region(Step(0), &square()));
        assert!(!h.is_in_region(Step(1), &square()));
    }

    #[test]
    fn non_polygonal_never_matches() {
        let h = history(&[(pos(5.0, 5.0), Status::Susceptible)]);
        assert!(!h.is_in_region(Step(0), &Region::NonPolygonal));
    }

    #[test]
    fn unplaced_or_missing_never_matches() {
        let h = history(&[(None, Status::Susceptible)]);
        assert!(!h.is_in_region(Step(0), &square()));
        assert!(!h.is_in_region(Step(3), &square()));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn out_of_sequence_write_never_changes_length(
            recorded in 0usize..20,
            attempt in 0usize..40,
        ) {
            prop_assume!(attempt != recorded);
            let mut h = ActorHistory::new(ActorId::new("p"));
            for i in 0..recorded {
                h.record(Step(i), pos(1.0 + i as f64, 1.0), Status::Susceptible).unwrap();
            }
            prop_assert!(h.record(Step(attempt), pos(99.0, 99.0), Status::Dead).is_err());
            prop_assert_eq!(h.len(), recorded);
        }

        #[test]
        fn latest_sample_is_order_zero(
            x in 1.0f64..100.0,
            y in 1.0f64..100.0,
            prior in 0usize..10,
        ) {
            let mut h = ActorHistory::new(ActorId::new("p"));
            for i in 0..prior {
                h.record(Step(i), pos(-(i as f64) - 1.0, 1.0), Status::Susceptible).unwrap();
            }
            h.record(Step(prior), pos(x, y), Status::Recovered).unwrap();
            let features: Vec<_> = h.trail_at(Step(prior), 1).collect();
            prop_assert_eq!(points(&features), vec![([x, y], "R".to_string(), 0)]);
        }

        #[test]
        fn trail_never_exceeds_window(
            steps in 1usize..30,
            max in 1usize..8,
        ) {
            let mut h = ActorHistory::new(ActorId::new("p"));
            for i in 0..steps {
                h.record(Step(i), pos(1.0 + (i % 3) as f64, 1.0), Status::Susceptible).unwrap();
            }
            let n_points = h.trail_at(Step(steps - 1), max).filter(Feature::is_point).count();
            prop_assert!(n_points <= max);
            prop_assert!(n_points >= 1);
        }
    }
}
