//! Surf Dash entry point
//!
//! Headless demo: runs a scripted pilot through a level at a fixed timestep
//! and appends the outcome to the run log. A windowed build drives the same
//! tick with real input and consumes the camera/audio outputs.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use surf_dash::Settings;
use surf_dash::audio::AudioMixer;
use surf_dash::camera::FollowCamera;
use surf_dash::consts::SIM_DT;
use surf_dash::sim::{GamePhase, GameState, RunOutcome, TickInput, tick};
use surf_dash::stats::{RunLog, RunRecord};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level: u8 = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);
    let max_secs: f32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(180.0);

    let settings = Settings::load(&PathBuf::from("stats/settings.json"));
    let mut mixer = AudioMixer::new();
    mixer.set_master_volume(settings.master_volume);
    mixer.set_sfx_volume(settings.sfx_volume);
    mixer.set_muted(settings.muted);

    let mut state = GameState::new(level, seed);
    let mut camera = FollowCamera::new(state.actor.pos);
    camera.smoothing = settings.effective_camera_smoothing();

    log::info!("piloting level {level} (seed {seed})");

    let mut last_report = 0u64;
    while state.phase == GamePhase::Playing && state.time_secs() < max_secs {
        let input = pilot(&state);
        tick(&mut state, &input, SIM_DT);
        camera.update(&state.actor);
        let frame = mixer.mix(&state.actor, SIM_DT);

        // One progress line per simulated second
        let secs = state.time_secs() as u64;
        if secs > last_report {
            last_report = secs;
            log::debug!(
                "t={secs:>3}s x={:>7.0} speed={:>6.0} grounded={} wind={} cam=({:.0},{:.0})",
                state.actor.pos.x,
                state.actor.speed(),
                state.actor.grounded,
                frame.wind.is_some(),
                camera.pos.x,
                camera.pos.y,
            );
        }
    }

    let outcome = match state.phase {
        GamePhase::Complete(outcome) => outcome,
        _ => {
            log::warn!("pilot ran out of time after {max_secs}s");
            RunOutcome::Wrecked
        }
    };

    let log_path = PathBuf::from("stats/runs.json");
    let mut run_log = RunLog::load(&log_path);
    run_log.record(RunRecord {
        level,
        outcome,
        time_secs: state.time_secs(),
        health: state.health,
        timestamp_ms: unix_millis(),
    });
    if let Err(err) = run_log.save(&log_path) {
        log::error!("could not save run log: {err}");
    }

    match run_log.best_time(level) {
        Some(best) => log::info!(
            "level {level} {outcome:?} in {:.2}s (best {best:.2}s over {} clears)",
            state.time_secs(),
            run_log.clear_count(level)
        ),
        None => log::info!("level {level} {outcome:?} in {:.2}s", state.time_secs()),
    }
}

/// Scripted input: hold right, hop when stalled against an upslope, dive
/// once there's speed to spend
fn pilot(state: &GameState) -> TickInput {
    let actor = &state.actor;
    let stalled = actor.grounded && actor.vel.x.abs() < 20.0 && state.time_secs() > 1.0;
    TickInput {
        right: true,
        jump: stalled,
        dive: actor.grounded && actor.vel.x > 300.0,
        ..Default::default()
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
