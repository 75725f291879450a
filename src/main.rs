//! Orb Hunt headless entry point
//!
//! Runs the simulation without a headset: a scripted pilot stands in for the
//! XR runtime, `LogHost` stands in for audio, haptics, HUD and renderer.
//!
//! Usage: `orb-hunt [settings.json] [frames]`

use serde::Serialize;

use orb_hunt::Settings;
use orb_hunt::platform::{LogHost, ScriptedPilot};
use orb_hunt::sim::{GameState, Snapshot, frame};

/// Display refresh the session is simulated at
const FRAME_RATE: f64 = 72.0;
/// Default session length (frames)
const DEFAULT_FRAMES: u64 = 72 * 30;
/// Host time at which the hit clip finishes "loading"
const CLIP_LOAD_SECS: f64 = 0.5;

#[derive(Serialize)]
struct Summary {
    state: Snapshot,
    host: LogHost,
}

fn main() {
    env_logger::init();
    log::info!("Orb Hunt (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut state = match GameState::new(settings) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Cannot start: {err}");
            std::process::exit(1);
        }
    };
    let mut host = LogHost::default();
    let pilot = ScriptedPilot::default();

    for i in 0..frames {
        let now = i as f64 / FRAME_RATE;
        host.clip_loaded = now >= CLIP_LOAD_SECS;

        // Timer callback first, then the display frame
        state.run_timers(now, &mut host);
        let input = pilot.next_input(&state, i, now);
        frame(&mut state, &input, &mut host);
    }

    log::info!(
        "{} frames, score {}, {} cues still playing",
        state.frames,
        state.score,
        state.emitters.len()
    );

    let summary = Summary {
        state: state.snapshot(),
        host,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize summary: {err}"),
    }
}
