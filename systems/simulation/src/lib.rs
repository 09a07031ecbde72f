#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-tick game loop that orchestrates the world and its systems.
//!
//! A [`Simulation`] owns the authoritative [`World`] together with the wave
//! spawner and collision judge. Adapters feed it one [`KeyAction`] per tick and
//! drive the explosion animation once a collision occurs. [`TickScheduler`]
//! decides, from a monotonic [`Clock`](hydrogen_bombs_core::Clock) reading,
//! whether a tick is due.

mod scheduler;

pub use scheduler::TickScheduler;

use hydrogen_bombs_core::{
    Command, Difficulty, Event, ExplosionFrame, GamePhase, HazardError, HazardSnapshot,
    KeyAction, Score, WAVE_INTERVAL_TICKS,
};
use hydrogen_bombs_system_collision::CollisionJudge;
use hydrogen_bombs_system_wave_spawning::{RandomSource, WaveReport, WaveSpawning};
use hydrogen_bombs_world::{self as world, query, World};

/// Configuration parameters required to construct the simulation.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    wave_interval_ticks: u32,
}

impl Config {
    /// Creates a new configuration spawning a wave every `wave_interval_ticks` ticks.
    #[must_use]
    pub const fn new(wave_interval_ticks: u32) -> Self {
        Self {
            wave_interval_ticks,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WAVE_INTERVAL_TICKS)
    }
}

/// Everything that happened during a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Whether the tick advanced the simulation at all.
    pub advanced: bool,
    /// Report of the wave spawned on this tick, if any.
    pub wave: Option<WaveReport>,
    /// Number of hazards that left the playfield.
    pub exited: usize,
    /// Hazard that struck the player.
    pub collision: Option<HazardSnapshot>,
}

/// Game loop state machine: `Playing -> Exploding -> GameOver`, or `Playing -> Stopped`.
#[derive(Debug)]
pub struct Simulation<R> {
    config: Config,
    world: World,
    spawning: WaveSpawning<R>,
    judge: CollisionJudge,
    wave_counter: u32,
    explosion_cursor: u8,
    events: Vec<Event>,
}

impl<R: RandomSource> Simulation<R> {
    /// Creates a simulation for a fresh world.
    #[must_use]
    pub fn new(config: Config, spawning: WaveSpawning<R>) -> Self {
        Self {
            config,
            world: World::new(),
            spawning,
            judge: CollisionJudge::new(),
            wave_counter: 0,
            explosion_cursor: 0,
            events: Vec::new(),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, used to stage scenarios.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Phase the game is currently in.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        query::phase(&self.world)
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> Score {
        query::score(&self.world)
    }

    /// Difficulty derived from the current score.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        query::difficulty(&self.world)
    }

    /// Executes one fixed tick with the key consumed for it.
    ///
    /// Outside [`GamePhase::Playing`] the call does nothing.
    pub fn tick(&mut self, input: KeyAction) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase() != GamePhase::Playing {
            return outcome;
        }
        outcome.advanced = true;

        self.submit(Command::Tick);
        if input == KeyAction::Quit {
            self.submit(Command::SetPhase {
                phase: GamePhase::Stopped,
            });
            self.flush_events();
            return outcome;
        }
        if let Some(direction) = input.direction() {
            self.submit(Command::MovePlayer { direction });
        }

        self.wave_counter += 1;
        if self.wave_counter >= self.config.wave_interval_ticks {
            self.wave_counter = 0;
            outcome.wave = self.spawn_wave();
        }

        let exited_before = self.events.len();
        self.submit(Command::AdvanceHazards);
        outcome.exited = self.events[exited_before..]
            .iter()
            .map(|event| match event {
                Event::HazardsExited { hazards } => hazards.len(),
                _ => 0,
            })
            .sum();

        let player = query::player(&self.world);
        outcome.collision = self
            .judge
            .first_hit(query::hazard_field(&self.world), player);
        if let Some(hazard) = outcome.collision {
            log::info!(
                "player at column {} struck by hazard {} with score {}",
                player.column(),
                hazard.id.get(),
                self.score().get()
            );
            self.submit(Command::SetPhase {
                phase: GamePhase::Exploding,
            });
        }

        self.flush_events();
        outcome
    }

    /// Yields the next explosion frame while exploding.
    ///
    /// Once every frame has been handed out the game moves to
    /// [`GamePhase::GameOver`] and `None` is returned.
    pub fn next_explosion_frame(&mut self) -> Option<ExplosionFrame> {
        if self.phase() != GamePhase::Exploding {
            return None;
        }

        if let Some(frame) = ExplosionFrame::new(self.explosion_cursor) {
            self.explosion_cursor += 1;
            return Some(frame);
        }

        self.submit(Command::SetPhase {
            phase: GamePhase::GameOver,
        });
        self.flush_events();
        None
    }

    fn spawn_wave(&mut self) -> Option<WaveReport> {
        let score = query::score(&self.world);
        match self.spawning.spawn_wave(self.world.hazards_mut(), score) {
            Ok(report) => Some(report),
            Err(HazardError::NoCandidateColumns) => None,
            Err(error) => {
                log::warn!("wave skipped: {error}");
                None
            }
        }
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.events);
    }

    fn flush_events(&mut self) {
        for event in self.events.drain(..) {
            match event {
                Event::PhaseChanged { from, to } => log::info!("phase {from:?} -> {to:?}"),
                other => log::trace!("{other:?}"),
            }
        }
    }
}
