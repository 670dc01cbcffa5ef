//! Skyward entry point
//!
//! Runs a headless scripted session of the simulation: useful for smoke
//! testing determinism and for profiling the tick loop without a renderer.

use skyward::consts::*;
use skyward::sim::{GamePhase, GameState, TickInput, tick};
use skyward::{AudioSink, LogAudioSink, Settings};

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let ticks: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(60 * TICK_HZ);

    let settings = Settings::load(&Settings::default_path());
    let mut sink = LogAudioSink::new();
    sink.set_master_volume(settings.master_volume);
    sink.set_sfx_volume(settings.sfx_volume);
    sink.set_muted(settings.muted);

    let mut state = GameState::new(seed);
    log::info!("running seed {seed:#x} for {ticks} ticks");

    // Skip the menus
    let start = TickInput {
        start: true,
        ..TickInput::default()
    };
    tick(&mut state, &start);
    tick(&mut state, &start);

    // Scripted input: run right, jumping periodically, attacking on sight
    for t in 0..ticks {
        let input = TickInput {
            right: true,
            jump: t % 45 == 0,
            attack: t % 90 == 0,
            interact: t % 30 == 0,
            ..TickInput::default()
        };
        tick(&mut state, &input);
        for cue in state.sound_queue.drain(..) {
            sink.play(cue);
        }
        if matches!(state.phase, GamePhase::GameOver | GamePhase::GameComplete) {
            break;
        }
    }

    println!(
        "seed {seed:#x}: level {} ({:?}) after {} ticks, {} coins, {:.0} health, x={:.0}",
        state.level_index + 1,
        state.phase,
        state.time_ticks,
        state.coin_count,
        state.player.health,
        state.player.pos.x,
    );
}
