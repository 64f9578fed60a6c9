//! replay: drives the epidemic map viewer from a recorded or synthetic run.
//!
//! Stands in for the browser: inbound messages arrive a few per frame as if
//! streamed over a socket, frames fire at roughly 60 Hz, and the rendering
//! surface just logs what it would draw.
//!
//! ```text
//! replay --input run.jsonl --region 0,0,20,20 --out frames.csv
//! replay --actors 500 --steps 120 --period-ms 10000
//! ```
//!
//! Set `RUST_LOG=debug` to see every frame.

mod synthetic;

use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};

use cv_core::{FeatureCollection, Position, Region, ViewerConfig};
use cv_output::CsvFrameRecorder;
use cv_playback::{
    ControlPanel, FrameQueue, Outbox, PlaybackListener, PlaybackState, Player, RenderSurface,
    RenderedFrame,
};
use cv_store::Occupancy;

use synthetic::SyntheticRun;

// ── Constants ─────────────────────────────────────────────────────────────────

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667); // ~60 Hz

// ── Command line ──────────────────────────────────────────────────────────────

/// Replay an epidemic simulation on a headless map surface.
#[derive(Parser, Debug)]
#[command(name = "replay")]
struct Args {
    /// Newline-delimited JSON messages; a synthetic run is generated if omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Viewer configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured animation period
    #[arg(long)]
    period_ms: Option<u64>,

    /// Rectangular selection `x0,y0,x1,y1` for occupancy counts
    #[arg(long, value_parser = parse_region)]
    region: Option<[f64; 4]>,

    /// Write one CSV row per rendered step
    #[arg(long)]
    out: Option<PathBuf>,

    /// Inbound messages delivered per frame
    #[arg(long, default_value_t = 4)]
    batch: usize,

    /// Start date sent with the start request
    #[arg(long, default_value = "2020-03-01")]
    start_date: String,

    /// Synthetic run: number of actors
    #[arg(long, default_value_t = 200)]
    actors: usize,

    /// Synthetic run: number of steps
    #[arg(long, default_value_t = 60)]
    steps: usize,

    /// Synthetic run: grid side length
    #[arg(long, default_value_t = 40)]
    grid: u32,

    /// Synthetic run: random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn parse_region(s: &str) -> Result<[f64; 4], String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>().map_err(|e| format!("{p:?}: {e}")))
        .collect::<Result<_, _>>()?;
    <[f64; 4]>::try_from(parts).map_err(|v| format!("expected 4 numbers, got {}", v.len()))
}

// ── Surface ───────────────────────────────────────────────────────────────────

/// Logs what a map would draw.
#[derive(Default)]
struct LogSurface {
    pushes:         usize,
    last_features:  usize,
    last_occupancy: Option<Occupancy>,
}

impl RenderSurface for LogSurface {
    fn set_simulation_features(&mut self, features: &FeatureCollection) {
        self.pushes += 1;
        self.last_features = features.len();
        let points = features.features.iter().filter(|f| f.is_point()).count();
        debug!(points, lines = features.len() - points, "simulation layer updated");
    }

    fn set_occupancy(&mut self, occupancy: Option<&Occupancy>) {
        self.last_occupancy = occupancy.copied();
    }

    fn show_geojson(&mut self, geojson: &str) {
        info!(bytes = geojson.len(), "geojson layer received");
    }
}

// ── Listener ──────────────────────────────────────────────────────────────────

/// Progress logging plus optional CSV recording.
struct Progress {
    rendered: usize,
    recorder: Option<CsvFrameRecorder<File>>,
}

impl PlaybackListener for Progress {
    fn on_state_change(&mut self, from: PlaybackState, to: PlaybackState) {
        info!(?from, ?to, "playback state");
        if let Some(rec) = self.recorder.as_mut() {
            rec.on_state_change(from, to);
        }
    }

    fn on_step_rendered(&mut self, frame: &RenderedFrame<'_>) {
        self.rendered += 1;
        let time = frame.time.map(|t| t.as_str()).unwrap_or("-");
        match &frame.occupancy {
            Some(o) => debug!(step = %frame.step, time, occupants = o.total, infected = o.infected, "frame"),
            None => debug!(step = %frame.step, time, "frame"),
        }
        if let Some(rec) = self.recorder.as_mut() {
            rec.on_step_rendered(frame);
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>, period_ms: Option<u64>) -> Result<ViewerConfig> {
    let mut config = match path {
        Some(p) => {
            let src = std::fs::read_to_string(p)
                .with_context(|| format!("reading {}", p.display()))?;
            ViewerConfig::from_toml_str(&src)?
        }
        None => ViewerConfig::default(),
    };
    if let Some(ms) = period_ms {
        config.animation_period_ms = ms;
        config.validate()?;
    }
    Ok(config)
}

/// Inbound JSON text frames, in delivery order.
fn load_feed(args: &Args) -> Result<VecDeque<String>> {
    if let Some(path) = &args.input {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        return Ok(text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_owned)
            .collect());
    }

    let run = SyntheticRun {
        actors: args.actors,
        steps:  args.steps,
        grid:   args.grid,
        seed:   args.seed,
    };
    info!(actors = run.actors, steps = run.steps, grid = run.grid, "generating synthetic run");
    run.messages()
        .iter()
        .map(|m| m.to_json().context("encoding synthetic message"))
        .collect()
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    if args.batch == 0 {
        bail!("--batch must be at least 1");
    }

    let config = load_config(args.config.as_deref(), args.period_ms)?;
    info!(
        max_trail_length = config.max_trail_length,
        period_ms = config.animation_period_ms,
        unset_marker = ?config.unset_marker,
        "viewer config"
    );

    let mut feed = load_feed(&args)?;
    info!(messages = feed.len(), "feed ready");

    let recorder = args.out.as_deref().map(CsvFrameRecorder::<File>::create).transpose()?;
    let listener = (ControlPanel::new(), Progress { rendered: 0, recorder });
    let mut player = Player::new(config, LogSurface::default(), FrameQueue::new(), Outbox::new(), listener)?;

    if let Some([x0, y0, x1, y1]) = args.region {
        player.select_region(Some(Region::rectangle(Position::new(x0, y0), Position::new(x1, y1))));
    }

    player.request_start(&args.start_date);
    for message in player.transport_mut().drain() {
        info!(message = %message.to_json()?, "outbound");
    }

    let t0 = Instant::now();
    loop {
        for text in feed.drain(..args.batch.min(feed.len())) {
            player.receive_json(&text);
        }
        player.process_inbox();

        if let Some(token) = player.frames_mut().pop() {
            player.on_animation_frame(token, t0.elapsed().as_secs_f64() * 1_000.0);
        }

        if feed.is_empty() && player.state() != PlaybackState::Running {
            break;
        }
        thread::sleep(FRAME_INTERVAL);
    }

    if player.state() == PlaybackState::Idle {
        warn!("input never announced a run");
    }

    let store = player.store();
    info!(
        steps = store.step_count(),
        actors = store.actor_count(),
        elapsed_s = t0.elapsed().as_secs_f64(),
        "replay finished"
    );

    let surface = player.surface();
    let occupancy = surface.last_occupancy;
    info!(pushes = surface.pushes, features = surface.last_features, "surface");
    if let Some(o) = occupancy {
        info!(
            occupants = o.total,
            S = o.susceptible,
            E = o.exposed,
            I = o.infected,
            R = o.recovered,
            D = o.dead,
            "final occupancy"
        );
    }

    let (_, _, _, (panel, mut progress)) = player.into_parts();
    debug!(start_enabled = panel.start_enabled(), "controls");
    info!(rendered = progress.rendered, "frames rendered");

    if let Some(rec) = progress.recorder.as_mut() {
        if let Some(e) = rec.take_error() {
            warn!("output error: {e}");
        }
        rec.finish()?;
        info!(rows = rec.rows(), "frames recorded");
    }

    Ok(())
}
