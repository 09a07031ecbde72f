#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Hydrogen Bombs experience.

mod session;

use anyhow::Result;
use clap::Parser;
use hydrogen_bombs_core::KeyAction;
use hydrogen_bombs_rendering::Renderer;
use hydrogen_bombs_rendering_terminal::{TerminalInput, TerminalRenderer};
use hydrogen_bombs_system_simulation::{Config, Simulation};
use hydrogen_bombs_system_wave_spawning::{self as wave_spawning, RngSource, WaveSpawning};
use hydrogen_bombs_world::query;

use self::session::{run_session, MonotonicClock, Pacing, SessionEnd};

/// Dodge hydrogen bombs falling down a 40x20 terminal playfield.
///
/// Move with `a`/`d` or the arrow keys and quit with `q`. The game takes no
/// options; set `RUST_LOG` to see diagnostics on stderr.
#[derive(Debug, Parser)]
#[command(name = "hydrogen-bombs", version, about, long_about = None)]
struct CliArgs {}

/// Entry point for the Hydrogen Bombs command-line interface.
fn main() -> Result<()> {
    let _args = CliArgs::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let spawning = WaveSpawning::new(wave_spawning::Config::default(), RngSource::from_clock());
    let mut simulation = Simulation::new(Config::default(), spawning);
    let mut renderer = TerminalRenderer::stdout();
    let mut input = TerminalInput::new();

    renderer.render_instructions(query::welcome_banner(simulation.world()))?;
    let outcome = match input.wait_for_key() {
        Ok(KeyAction::Quit) => Ok(SessionEnd::Quit),
        Ok(_) => run_session(
            &mut simulation,
            &mut input,
            &mut renderer,
            &MonotonicClock::new(),
            Pacing::default(),
        ),
        Err(error) => Err(error),
    };
    renderer.finish()?;

    if let SessionEnd::GameOver(summary) = outcome? {
        log::info!(
            "game over: score {} at {} bombs per wave",
            summary.score.get(),
            summary.difficulty.hazards_per_wave()
        );
    }
    Ok(())
}
