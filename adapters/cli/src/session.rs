//! Real-time driver that connects the simulation to its collaborators.

use std::{thread, time::Duration, time::Instant};

use anyhow::Result;
use hydrogen_bombs_core::{Clock, GamePhase, InputSource, EXPLOSION_FRAME_DURATION, TICK_INTERVAL};
use hydrogen_bombs_rendering::{GameSummary, Renderer, Scene};
use hydrogen_bombs_system_simulation::{Simulation, TickScheduler};
use hydrogen_bombs_system_wave_spawning::RandomSource;
use hydrogen_bombs_world::query;

/// Monotonic clock measuring seconds since the process started playing.
#[derive(Debug)]
pub(crate) struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub(crate) fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Real-time pacing of a session.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pacing {
    /// Fixed simulation step.
    pub(crate) tick_interval: Duration,
    /// Pause between loop iterations when no tick is due.
    pub(crate) idle_sleep: Duration,
    /// Time each explosion frame stays on screen.
    pub(crate) explosion_frame: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            idle_sleep: Duration::from_millis(1),
            explosion_frame: EXPLOSION_FRAME_DURATION,
        }
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SessionEnd {
    /// The player quit.
    Quit,
    /// The player was hit.
    GameOver(GameSummary),
}

/// Runs the game until the player quits or is hit.
pub(crate) fn run_session<R, I, D, C>(
    simulation: &mut Simulation<R>,
    input: &mut I,
    renderer: &mut D,
    clock: &C,
    pacing: Pacing,
) -> Result<SessionEnd>
where
    R: RandomSource,
    I: InputSource<Error = anyhow::Error>,
    D: Renderer,
    C: Clock,
{
    let mut scheduler = TickScheduler::new(pacing.tick_interval, clock.now());
    while simulation.phase() == GamePhase::Playing {
        if !scheduler.poll(clock.now()) {
            thread::sleep(pacing.idle_sleep);
            continue;
        }

        let key = input.poll_key()?;
        let _ = simulation.tick(key);
        if simulation.phase() == GamePhase::Playing {
            renderer.render(&scene(simulation))?;
        }
    }

    if simulation.phase() == GamePhase::Stopped {
        log::info!("player quit with score {}", simulation.score().get());
        return Ok(SessionEnd::Quit);
    }

    let grid = query::grid(simulation.world());
    let player = query::player(simulation.world());
    while let Some(frame) = simulation.next_explosion_frame() {
        renderer.render_explosion(grid, player, frame)?;
        thread::sleep(pacing.explosion_frame);
    }

    let summary = GameSummary {
        score: simulation.score(),
        difficulty: simulation.difficulty(),
    };
    renderer.render_game_over(&summary)?;
    Ok(SessionEnd::GameOver(summary))
}

fn scene<R: RandomSource>(simulation: &Simulation<R>) -> Scene {
    let world = simulation.world();
    Scene {
        grid: query::grid(world),
        player: query::player(world),
        hazards: query::hazards(world),
        score: query::score(world),
        difficulty: query::difficulty(world),
    }
}
