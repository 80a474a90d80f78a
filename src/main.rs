//! Swept Pong entry point
//!
//! Native builds run a headless demo match: both paddles are driven by the
//! autopilot and every frame is simulated and turned into vertex data, with
//! the match flow reported through the log.
//!
//! Usage: `swept-pong [settings.json]` (seed from `SWEPT_PONG_SEED`)

use std::time::{SystemTime, UNIX_EPOCH};

use swept_pong::Settings;
use swept_pong::renderer;
use swept_pong::sim::{GameEvent, GameState, TickInput, tick};

/// Give up on a demo match after ten simulated minutes
const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Swept Pong (headless demo) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let seed = std::env::var("SWEPT_PONG_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });
    log::info!("Game initialized with seed: {seed}");

    let mut state = GameState::new(seed, settings);
    let mut uploaded_bytes = 0usize;

    while state.time_ticks < MAX_DEMO_TICKS {
        let input = TickInput::autopilot(&state);
        tick(&mut state, &input);

        let vertices = renderer::frame_vertices(&state);
        uploaded_bytes += renderer::as_bytes(&vertices).len();

        let over = state
            .drain_events()
            .into_iter()
            .any(|event| matches!(event, GameEvent::MatchOver { .. }));
        if over {
            let (p1, p2) = state.scores();
            log::info!(
                "Match finished {p1}-{p2} after {} frames ({} KiB of vertex data)",
                state.time_ticks,
                uploaded_bytes / 1024
            );
            return;
        }
    }

    log::warn!("Demo match still running after {MAX_DEMO_TICKS} frames, stopping");
}
