//! A made-up epidemic for running the viewer without a server.
//!
//! Actors random-walk on an integer grid.  Each step a susceptible actor
//! may be exposed, an exposed one may fall ill, and an infected one either
//! recovers or dies.  A few actors are left unplaced at the origin for the
//! first steps so the trail logic sees unset positions.

use cv_core::{Sample, Status, TimeLabel};
use cv_playback::{DataPayload, Message, MetadataPayload};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── Constants ─────────────────────────────────────────────────────────────────

const P_INITIALLY_INFECTED: f64 = 0.05;
const P_EXPOSE:             f64 = 0.04;
const P_FALL_ILL:           f64 = 0.20;
const P_RECOVER:            f64 = 0.10;
const P_DIE:                f64 = 0.01;
const P_UNPLACED:           f64 = 0.10;
const UNPLACED_STEPS:       usize = 3;

pub struct SyntheticRun {
    pub actors: usize,
    pub steps:  usize,
    /// Side of the square grid; coordinates span `1..=grid`.
    pub grid:   u32,
    pub seed:   u64,
}

struct Walker {
    id:       String,
    x:        f64,
    y:        f64,
    status:   Status,
    unplaced: bool,
}

impl SyntheticRun {
    /// The full message sequence a server would stream: one `metadata`
    /// announcement followed by one `data` message per step.
    pub fn messages(&self) -> Vec<Message> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let max = f64::from(self.grid.max(1));

        let mut walkers: Vec<Walker> = (0..self.actors)
            .map(|i| Walker {
                id:       format!("p{i:04}"),
                x:        f64::from(rng.gen_range(1..=self.grid.max(1))),
                y:        f64::from(rng.gen_range(1..=self.grid.max(1))),
                status:   if rng.gen_bool(P_INITIALLY_INFECTED) { Status::Infected } else { Status::Susceptible },
                unplaced: rng.gen_bool(P_UNPLACED),
            })
            .collect();

        let mut out = Vec::with_capacity(self.steps + 1);
        out.push(Message::Metadata(MetadataPayload::Simulation { length: self.steps }));

        for step in 0..self.steps {
            let data = walkers
                .iter()
                .map(|w| {
                    let position = if w.unplaced && step < UNPLACED_STEPS { [0.0, 0.0] } else { [w.x, w.y] };
                    Sample::new(w.id.as_str(), position, w.status.clone())
                })
                .collect();
            out.push(Message::Data(DataPayload::Simulation {
                timestamp: TimeLabel::new(format!("day {step}")),
                data,
            }));

            for w in &mut walkers {
                advance(w, &mut rng, max);
            }
        }
        out
    }
}

fn advance(w: &mut Walker, rng: &mut SmallRng, max: f64) {
    w.status = match w.status {
        Status::Susceptible if rng.gen_bool(P_EXPOSE) => Status::Exposed,
        Status::Exposed if rng.gen_bool(P_FALL_ILL) => Status::Infected,
        Status::Infected if rng.gen_bool(P_DIE) => Status::Dead,
        Status::Infected if rng.gen_bool(P_RECOVER) => Status::Recovered,
        ref s => s.clone(),
    };
    if w.status == Status::Dead {
        return;
    }
    let dx = f64::from(rng.gen_range(-1i32..=1));
    let dy = f64::from(rng.gen_range(-1i32..=1));
    w.x = (w.x + dx).clamp(1.0, max);
    w.y = (w.y + dy).clamp(1.0, max);
}
