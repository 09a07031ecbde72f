#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Hydrogen Bombs.
//!
//! The [`World`] owns the hazard pool, the player, the score and the current
//! [`GamePhase`]. The game loop mutates it through [`apply`]; the wave spawner
//! is the only other writer and reaches the pool through
//! [`World::hazards_mut`]. That handle is the whole [`HazardField`]; advancing
//! it directly skips the scoring done by [`apply`], so writers outside the
//! game loop stick to activating hazards and clearing rows.

mod hazards;

pub use hazards::HazardField;

use hydrogen_bombs_core::{
    Command, Event, GamePhase, GridSize, PlayerPosition, Score, WELCOME_BANNER,
};

/// Represents the authoritative Hydrogen Bombs world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: GridSize,
    hazards: HazardField,
    player: PlayerPosition,
    score: Score,
    phase: GamePhase,
    tick_index: u64,
}

impl World {
    /// Creates a new world on the standard grid, ready for the first tick.
    #[must_use]
    pub fn new() -> Self {
        Self::with_grid(GridSize::STANDARD)
    }

    fn with_grid(grid: GridSize) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid,
            hazards: HazardField::new(grid),
            player: PlayerPosition::spawn_point(grid),
            score: Score::default(),
            phase: GamePhase::Playing,
            tick_index: 0,
        }
    }

    /// Grants the wave spawner exclusive access to the hazard pool.
    ///
    /// Only [`apply`] turns exits into score; use it to advance hazards.
    pub fn hazards_mut(&mut self) -> &mut HazardField {
        &mut self.hazards
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TickAdvanced {
                tick: world.tick_index,
            });
        }
        Command::MovePlayer { direction } => {
            if world.phase != GamePhase::Playing {
                return;
            }

            let from = world.player;
            let to = from.stepped(direction, world.grid);
            if to != from {
                world.player = to;
                out_events.push(Event::PlayerMoved { from, to });
            }
        }
        Command::AdvanceHazards => {
            let mut exited = Vec::new();
            let count = world.hazards.advance(&mut exited);
            if count == 0 {
                return;
            }

            // Every exit scores, including a hazard that would have hit the player.
            world.score = world.score.saturating_add(count as u32);
            out_events.push(Event::HazardsExited { hazards: exited });
            out_events.push(Event::ScoreChanged { score: world.score });
        }
        Command::SetPhase { phase } => {
            let from = world.phase;
            if from == phase || from.is_terminal() {
                return;
            }

            world.phase = phase;
            out_events.push(Event::PhaseChanged { from, to: phase });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use hydrogen_bombs_core::{
        Difficulty, GamePhase, GridSize, HazardSnapshot, PlayerPosition, Score,
    };

    use super::{HazardField, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the playfield.
    #[must_use]
    pub fn grid(world: &World) -> GridSize {
        world.grid
    }

    /// Provides read-only access to the hazard pool.
    #[must_use]
    pub fn hazard_field(world: &World) -> &HazardField {
        &world.hazards
    }

    /// Copies the active hazards into an owned list.
    #[must_use]
    pub fn hazards(world: &World) -> Vec<HazardSnapshot> {
        world.hazards.iter_active().collect()
    }

    /// Current position of the player.
    #[must_use]
    pub fn player(world: &World) -> PlayerPosition {
        world.player
    }

    /// Number of hazards that have left the playfield so far.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Difficulty derived from the current score.
    #[must_use]
    pub fn difficulty(world: &World) -> Difficulty {
        Difficulty::for_score(world.score, world.grid)
    }

    /// Phase the game is currently in.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}
