//! Unit tests for cv-store.

use cv_core::{ActorId, Geometry, Position, Region, Sample, Status, Step, TimeLabel, UnsetMarker, ViewerConfig};

use crate::SimulationStore;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sample(id: &str, x: f64, y: f64, status: &str) -> Sample {
    Sample::new(id, [x, y], Status::parse(status))
}

fn t(label: &str) -> TimeLabel {
    TimeLabel::new(label)
}

/// Two steps for actor `a1`: (1,1) S → (2,2) I.
fn two_step_store() -> SimulationStore {
    let mut store = SimulationStore::default();
    store.append_step(t("0"), vec![sample("a1", 1.0, 1.0, "S")]);
    store.append_step(t("1"), vec![sample("a1", 2.0, 2.0, "I")]);
    store
}

fn square() -> Region {
    Region::rectangle(Position::new(0.0, 0.0), Position::new(10.0, 10.0))
}

// ── Ingestion ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ingest {
    use super::*;

    #[test]
    fn steps_are_numbered_in_arrival_order() {
        let mut store = SimulationStore::default();
        let r0 = store.append_step(t("a"), vec![sample("x", 1.0, 1.0, "S")]);
        let r1 = store.append_step(t("b"), vec![]);
        assert_eq!(r0.step, Step(0));
        assert_eq!(r1.step, Step(1));
        assert_eq!(store.step_count(), 2);
        assert_eq!(store.last_step(), Some(Step(1)));
        assert_eq!(store.time_at(Step(1)), Some(&t("b")));
    }

    #[test]
    fn actors_created_lazily() {
        let mut store = SimulationStore::default();
        let r = store.append_step(
            t("0"),
            vec![sample("a", 1.0, 1.0, "S"), sample("b", 2.0, 2.0, "E")],
        );
        assert_eq!(r.new_actors, 2);
        assert_eq!(r.accepted, 2);
        assert!(r.is_clean());
        assert_eq!(store.actor_count(), 2);

        let r = store.append_step(t("1"), vec![sample("a", 1.5, 1.0, "S")]);
        assert_eq!(r.new_actors, 0);
        assert_eq!(store.actor(&ActorId::new("a")).unwrap().len(), 2);
        assert_eq!(store.actor(&ActorId::new("b")).unwrap().len(), 1);
    }

    #[test]
    fn duplicate_sample_in_batch_rejected() {
        let mut store = SimulationStore::default();
        let r = store.append_step(
            t("0"),
            vec![sample("a", 1.0, 1.0, "S"), sample("a", 5.0, 5.0, "I")],
        );
        assert_eq!(r.accepted, 1);
        assert_eq!(r.rejected.len(), 1);
        let a = store.actor(&ActorId::new("a")).unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a.position_at(Step(0)), Some(Position::new(1.0, 1.0)));
    }

    #[test]
    fn actor_joining_late_is_out_of_sequence() {
        let mut store = SimulationStore::default();
        store.append_step(t("0"), vec![sample("a", 1.0, 1.0, "S")]);
        let r = store.append_step(t("1"), vec![sample("late", 1.0, 1.0, "S")]);
        assert_eq!(r.new_actors, 1);
        assert_eq!(r.rejected.len(), 1);
        assert!(store.actor(&ActorId::new("late")).unwrap().is_empty());
    }

    #[test]
    fn unset_marker_from_config() {
        let config = ViewerConfig { unset_marker: UnsetMarker::Never, ..ViewerConfig::default() };
        let mut store = SimulationStore::new(&config);
        store.append_step(t("0"), vec![sample("a", 0.0, 0.0, "S")]);
        assert_eq!(store.snapshot_at(0).len(), 1, "origin is a real position");

        let mut store = SimulationStore::default();
        store.append_step(t("0"), vec![sample("a", 0.0, 0.0, "S")]);
        assert!(store.snapshot_at(0).is_empty(), "origin means unplaced");
    }
}

// ── clamp_step ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clamp {
    use super::*;

    #[test]
    fn clamps_both_ends() {
        let store = two_step_store();
        assert_eq!(store.clamp_step(-5), Step(0));
        assert_eq!(store.clamp_step(0), Step(0));
        assert_eq!(store.clamp_step(1), Step(1));
        assert_eq!(store.clamp_step(i64::MAX), Step(1));
    }

    #[test]
    fn empty_store_clamps_to_zero() {
        let store = SimulationStore::default();
        assert_eq!(store.clamp_step(-1), Step(0));
        assert_eq!(store.clamp_step(10), Step(0));
        assert_eq!(store.last_step(), None);
        assert!(store.snapshot_at(0).is_empty());
        assert_eq!(store.occupancy_at(0, &square()).total, 0);
    }
}

// ── Snapshots ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot {
    use super::*;

    #[test]
    fn end_to_end_trail() {
        let store = two_step_store();
        let fc = store.snapshot_at(1);
        assert_eq!(fc.len(), 3);

        let points: Vec<_> = fc
            .features
            .iter()
            .filter_map(|f| match &f.geometry {
                Geometry::Point { coordinates } => Some((
                    *coordinates,
                    f.properties.status.clone(),
                    f.properties.order,
                )),
                _ => None,
            })
            .collect();
        assert_eq!(
            points,
            vec![
                ([2.0, 2.0], Some(Status::Infected), Some(0)),
                ([1.0, 1.0], Some(Status::Susceptible), Some(1)),
            ]
        );

        let lines: Vec<_> = fc
            .features
            .iter()
            .filter_map(|f| match &f.geometry {
                Geometry::LineString { coordinates } => Some(coordinates.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![vec![[1.0, 1.0], [2.0, 2.0]]]);
    }

    #[test]
    fn snapshot_is_idempotent() {
        let mut store = two_step_store();
        store.append_step(t("2"), vec![sample("b", 3.0, 3.0, "E")]);
        assert_eq!(store.snapshot_at(1), store.snapshot_at(1));
        assert_eq!(store.snapshot_at(2), store.snapshot_at(2));
    }

    #[test]
    fn out_of_range_request_shows_last_step() {
        let store = two_step_store();
        assert_eq!(store.snapshot_at(99), store.snapshot_at(1));
        assert_eq!(store.snapshot_at(-3), store.snapshot_at(0));
    }

    #[test]
    fn lagging_actor_contributes_nothing() {
        let mut store = two_step_store();
        store.append_step(t("2"), vec![]);
        assert!(store.snapshot_at(2).is_empty());
    }

    #[test]
    fn actors_listed_in_first_seen_order() {
        let mut store = SimulationStore::default();
        store.append_step(
            t("0"),
            vec![
                sample("zeta", 1.0, 1.0, "S"),
                sample("alpha", 2.0, 2.0, "S"),
                sample("mid", 3.0, 3.0, "S"),
            ],
        );
        let ids: Vec<_> = store
            .snapshot_at(0)
            .features
            .iter()
            .map(|f| f.properties.id.to_string())
            .collect();
        assert_eq!(ids, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn by_time_label() {
        let store = two_step_store();
        assert_eq!(store.step_of_time(&t("1")), Some(Step(1)));
        assert_eq!(store.snapshot_at_time(&t("1")), store.snapshot_at(1));
        assert_eq!(store.snapshot_at_time(&t("nope")), store.snapshot_at(0));
    }

    #[test]
    fn first_matching_label_wins() {
        let mut store = SimulationStore::default();
        store.append_step(t("dup"), vec![sample("a", 1.0, 1.0, "S")]);
        store.append_step(t("dup"), vec![sample("a", 2.0, 2.0, "S")]);
        assert_eq!(store.step_of_time(&t("dup")), Some(Step(0)));
    }

    #[test]
    fn serializes_as_geojson() {
        let store = two_step_store();
        let json: serde_json::Value = serde_json::from_str(&store.snapshot_at(0).to_json().unwrap()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["properties"]["status"], "S");
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use super::*;

    #[test]
    fn counts_by_status() {
        let mut store = SimulationStore::default();
        store.append_step(
            t("0"),
            vec![
                sample("a", 1.0, 1.0, "S"),
                sample("b", 2.0, 2.0, "I"),
                sample("c", 3.0, 3.0, "I"),
                sample("d", 20.0, 20.0, "I"),
                sample("e", 4.0, 4.0, "D"),
            ],
        );
        let occ = store.occupancy_at(0, &square());
        assert_eq!(occ.total, 4);
        assert_eq!(occ.susceptible, 1);
        assert_eq!(occ.infected, 2);
        assert_eq!(occ.dead, 1);
        assert_eq!(occ.exposed + occ.recovered, 0);
    }

    #[test]
    fn unknown_status_only_in_total() {
        let mut store = SimulationStore::default();
        store.append_step(
            t("0"),
            vec![sample("a", 1.0, 1.0, "S"), sample("b", 2.0, 2.0, "??")],
        );
        let occ = store.occupancy_at(0, &square());
        assert_eq!(occ.total, 2);
        assert_eq!(occ.known(), 1);
    }

    #[test]
    fn non_polygonal_region_is_empty() {
        let store = two_step_store();
        assert_eq!(store.occupancy_at(1, &Region::NonPolygonal).total, 0);
    }

    #[test]
    fn movement_changes_occupancy() {
        let mut store = SimulationStore::default();
        store.append_step(t("0"), vec![sample("a", 5.0, 5.0, "S")]);
        store.append_step(t("1"), vec![sample("a", 50.0, 5.0, "E")]);
        assert_eq!(store.occupancy_at(0, &square()).total, 1);
        assert_eq!(store.occupancy_at(1, &square()).total, 0);
        assert_eq!(store.occupancy_at(7, &square()).total, 0, "clamped to step 1");
    }

    #[test]
    fn serializes_with_status_letters() {
        let mut store = SimulationStore::default();
        store.append_step(t("0"), vec![sample("a", 1.0, 1.0, "R")]);
        let json = serde_json::to_value(store.occupancy_at(0, &square())).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["R"], 1);
        assert_eq!(json["S"], 0);
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use super::*;

    fn status_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("S".to_string()),
            Just("E".to_string()),
            Just("I".to_string()),
            Just("R".to_string()),
            Just("D".to_string()),
            "[a-z]{1,3}",
        ]
    }

    proptest! {
        #[test]
        fn clamp_is_total_and_in_range(steps in 0usize..20, requested in any::<i64>()) {
            let mut store = SimulationStore::default();
            for i in 0..steps {
                store.append_step(TimeLabel::new(i.to_string()), vec![]);
            }
            let clamped = store.clamp_step(requested);
            prop_assert!(clamped.index() <= steps.saturating_sub(1));
            if requested < 0 {
                prop_assert_eq!(clamped, Step(0));
            }
        }

        #[test]
        fn clamp_is_monotone(steps in 1usize..20, a in -50i64..50, b in -50i64..50) {
            let mut store = SimulationStore::default();
            for i in 0..steps {
                store.append_step(TimeLabel::new(i.to_string()), vec![]);
            }
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(store.clamp_step(lo) <= store.clamp_step(hi));
        }

        #[test]
        fn bucket_sum_never_exceeds_total(
            actors in proptest::collection::vec((0.0f64..20.0, 0.0f64..20.0, status_strategy()), 0..40),
        ) {
            let mut store = SimulationStore::default();
            let samples = actors
                .iter()
                .enumerate()
                .map(|(i, (x, y, s))| sample(&i.to_string(), *x, *y, s));
            store.append_step(t("0"), samples);
            let occ = store.occupancy_at(0, &square());
            prop_assert!(occ.known() <= occ.total);
        }
    }
}
