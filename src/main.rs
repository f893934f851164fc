//! Headless run of the trail loader's timing core.
//!
//! Drives the state machine with a synthetic 60 Hz clock and logs every wrap
//! and trail marker. Configuration comes from the environment:
//! `TRAIL_SIM_SECONDS`, `TRAIL_CONTAINER_WIDTH` and one `TRAIL_*` variable per
//! loader attribute (`TRAIL_SPEED`, `TRAIL_HEIGHT_IN_PIXELS`, ...).
//! Set `RUST_LOG=trail_sim=debug,motion=debug` to see every tick.

use motion::{
    drive, AnimationStateMachine, LoaderConfig, TickStatus, TrailHost, TrailMarkers, ATTRIBUTE_NAMES,
};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const FRAME_MILLIS: f64 = 1000.0 / 60.0;
const DEFAULT_SECONDS: f64 = 3.0;
const DEFAULT_CONTAINER_WIDTH: f64 = 200.0;

/// `heightInPixels` -> `TRAIL_HEIGHT_IN_PIXELS`
fn env_key(attribute: &str) -> String {
    let mut key = String::from("TRAIL_");
    for c in attribute.chars() {
        if c.is_ascii_uppercase() {
            key.push('_');
        }
        key.push(c.to_ascii_uppercase());
    }
    key
}

fn env_number(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring non-numeric setting");
            default
        }),
        Err(_) => default,
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct SimSummary {
    frames: usize,
    moved: usize,
    throttled: usize,
    wraps: usize,
    markers: usize,
    peak_live_markers: usize,
}

/// Logs what a browser host would draw.
struct LogHost {
    trail: TrailMarkers,
    last_offset: f64,
}

impl TrailHost for LogHost {
    fn move_mover(&mut self, pixel_offset: f64) {
        self.last_offset = pixel_offset;
    }

    fn spawn_marker(&mut self, pixel_offset: f64, now_millis: f64) {
        let marker = self.trail.spawn(pixel_offset, now_millis);
        info!(id = marker.id, at = now_millis, pixel_offset, "Trail marker");
    }
}

fn simulate(config: &LoaderConfig, seconds: f64, frame_millis: f64) -> SimSummary {
    let mut machine = AnimationStateMachine::new(config.animator);
    let mut host = LogHost {
        trail: TrailMarkers::new(config.fade.lifetime_millis),
        last_offset: 0.0,
    };
    let mut summary = SimSummary::default();

    let end = seconds * 1000.0;
    let mut now = frame_millis;
    while now <= end {
        summary.frames += 1;
        let result = drive(&mut machine, &mut host, now);
        match result.status {
            TickStatus::Advanced => summary.moved += 1,
            TickStatus::Wrapped => {
                summary.moved += 1;
                summary.wraps += 1;
                info!(at = now, pixel_offset = host.last_offset, "Mover wrapped");
            }
            TickStatus::Throttled => summary.throttled += 1,
            TickStatus::Inactive => debug!(at = now, "Container has no width"),
        }
        if result.marker_spawned() {
            summary.markers += 1;
        }
        host.trail.expire(now);
        summary.peak_live_markers = summary.peak_live_markers.max(host.trail.len());
        now += frame_millis;
    }
    summary
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "trail_sim=info,motion=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let overrides: Vec<(&str, String)> = ATTRIBUTE_NAMES
        .iter()
        .filter_map(|name| std::env::var(env_key(name)).ok().map(|value| (*name, value)))
        .collect();
    let mut config =
        LoaderConfig::from_attributes(overrides.iter().map(|(name, value)| (*name, value.as_str())));
    config.animator.container_width_px = env_number("TRAIL_CONTAINER_WIDTH", DEFAULT_CONTAINER_WIDTH);
    let seconds = env_number("TRAIL_SIM_SECONDS", DEFAULT_SECONDS);

    info!(?config, seconds, "Starting simulation");
    let summary = simulate(&config, seconds, FRAME_MILLIS);
    info!(
        frames = summary.frames,
        moved = summary.moved,
        throttled = summary.throttled,
        wraps = summary.wraps,
        markers = summary.markers,
        peak_live_markers = summary.peak_live_markers,
        "Simulation finished"
    );
}
