#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hydrogen Bombs engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The game loop submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values that the loop
//! may log or react to. Gameplay constants and the collaborator traits that
//! adapters implement ([`InputSource`], [`Clock`]) live here as well.

use std::time::Duration;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "=== C HYDROGEN BOMBS, RUN! ===";

/// Number of columns in the playfield.
pub const GRID_WIDTH: u32 = 40;

/// Number of rows in the playfield.
pub const GRID_HEIGHT: u32 = 20;

/// Fixed number of hazard slots available to the hazard field.
pub const HAZARD_POOL_CAPACITY: usize = 50;

/// Simulated time between two consecutive ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Number of ticks between two waves.
pub const WAVE_INTERVAL_TICKS: u32 = 20;

/// Maximum number of placement attempts performed for a single wave.
pub const WAVE_RETRY_LIMIT: u32 = 100;

/// Score required to raise the difficulty level by one.
pub const SCORE_PER_LEVEL: u32 = 10;

/// Number of frames in the explosion animation.
pub const EXPLOSION_FRAME_COUNT: u8 = 3;

/// Real time each explosion frame stays on screen.
pub const EXPLOSION_FRAME_DURATION: Duration = Duration::from_millis(200);

/// Immutable dimensions of the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Playfield used by the game for the lifetime of the process.
    pub const STANDARD: Self = Self::new(GRID_WIDTH, GRID_HEIGHT);

    /// Creates a new grid description.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Right-most column the player's two-cell footprint may start on.
    #[must_use]
    pub const fn max_player_column(&self) -> u32 {
        self.width.saturating_sub(2)
    }

    /// Row the player occupies. Hazards reaching it can collide with the player.
    #[must_use]
    pub const fn player_row(&self) -> u32 {
        self.height.saturating_sub(2)
    }

    /// Number of future ticks inspected when verifying a safe path.
    #[must_use]
    pub const fn full_fall_lookahead(&self) -> u32 {
        self.height.saturating_sub(2)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Position of the player's left cell. The player also covers `column + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlayerPosition {
    column: u32,
    row: u32,
}

impl PlayerPosition {
    /// Creates a new player position.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Starting position used at the beginning of a game.
    #[must_use]
    pub const fn spawn_point(grid: GridSize) -> Self {
        Self::new(grid.width() / 2, grid.player_row())
    }

    /// Left column of the footprint.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row of the footprint.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether the two-cell footprint covers the provided column.
    #[must_use]
    pub const fn covers_column(&self, column: u32) -> bool {
        column == self.column || column == self.column + 1
    }

    /// Returns the position shifted one column in `direction`, clamped to the grid.
    #[must_use]
    pub fn stepped(self, direction: Direction, grid: GridSize) -> Self {
        let column = match direction {
            Direction::Left => self.column.saturating_sub(1),
            Direction::Right => (self.column + 1).min(grid.max_player_column()),
        };
        Self::new(column, self.row)
    }
}

/// Horizontal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

/// Key event delivered by an [`InputSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum KeyAction {
    /// Shift the player one column to the left.
    Left,
    /// Shift the player one column to the right.
    Right,
    /// Stop the game without penalty.
    Quit,
    /// No actionable key was pressed.
    #[default]
    None,
}

impl KeyAction {
    /// Maps a typed character onto an action using the classic bindings.
    #[must_use]
    pub fn from_char(key: char) -> Self {
        match key.to_ascii_lowercase() {
            'a' => Self::Left,
            'd' => Self::Right,
            'q' => Self::Quit,
            _ => Self::None,
        }
    }

    /// Movement direction requested by the action, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Quit | Self::None => None,
        }
    }
}

/// Identifier of a hazard slot. The value is the slot index inside the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HazardId(u32);

impl HazardId {
    /// Creates a new hazard identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Read-only view of an active hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HazardSnapshot {
    /// Identifier of the slot holding the hazard.
    pub id: HazardId,
    /// Column the hazard falls along.
    pub column: u32,
    /// Row the hazard currently occupies.
    pub row: u32,
}

/// Number of hazards that left the bottom of the playfield.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(u32);

impl Score {
    /// Creates a score with the provided value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric value of the score.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the score raised by `amount`, saturating at the numeric bound.
    #[must_use]
    pub const fn saturating_add(self, amount: u32) -> Self {
        Self(self.0.saturating_add(amount))
    }
}

/// Difficulty derived from the score. It is never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Difficulty {
    level: u32,
    hazards_per_wave: u32,
}

impl Difficulty {
    /// Computes the difficulty reached by `score` on `grid`.
    ///
    /// Every [`SCORE_PER_LEVEL`] points add one hazard to each wave, capped at
    /// `width - 2` so a wave can never cover every player column.
    #[must_use]
    pub fn for_score(score: Score, grid: GridSize) -> Self {
        let level = score.get() / SCORE_PER_LEVEL;
        let hazards_per_wave = level
            .saturating_add(1)
            .min(grid.width().saturating_sub(2));
        Self {
            level,
            hazards_per_wave,
        }
    }

    /// Number of completed difficulty steps.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Number of hazards a wave tries to place.
    #[must_use]
    pub const fn hazards_per_wave(&self) -> u32 {
        self.hazards_per_wave
    }
}

/// Lifecycle of a single game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// The player is dodging hazards and ticks advance the simulation.
    Playing,
    /// The player collided with a hazard and the explosion animation runs.
    Exploding,
    /// The explosion finished. Terminal.
    GameOver,
    /// The player quit. Terminal.
    Stopped,
}

impl GamePhase {
    /// Reports whether no further transitions can occur.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::GameOver | Self::Stopped)
    }
}

/// One frame of the explosion animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExplosionFrame(u8);

impl ExplosionFrame {
    /// Creates a frame index when it lies inside the animation.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < EXPLOSION_FRAME_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Iterates every frame of the animation in playback order.
    pub fn sequence() -> impl Iterator<Item = Self> {
        (0..EXPLOSION_FRAME_COUNT).map(Self)
    }

    /// Zero-based frame index.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the tick counter by one.
    Tick,
    /// Shifts the player one column, clamped to the grid.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Moves every active hazard one row down and scores the ones that exit.
    AdvanceHazards,
    /// Moves the game into a new phase.
    SetPhase {
        /// Phase the world should enter.
        phase: GamePhase,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the tick counter advanced.
    TickAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that the player changed columns.
    PlayerMoved {
        /// Position before the move.
        from: PlayerPosition,
        /// Position after the move.
        to: PlayerPosition,
    },
    /// Reports that hazards left the bottom edge during an advance.
    HazardsExited {
        /// Slots freed by the advance.
        hazards: Vec<HazardId>,
    },
    /// Reports that the score changed.
    ScoreChanged {
        /// Score after the change.
        score: Score,
    },
    /// Announces that the game entered a new phase.
    PhaseChanged {
        /// Phase that was left.
        from: GamePhase,
        /// Phase that became active.
        to: GamePhase,
    },
}

/// Non-fatal failures raised while placing hazards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HazardError {
    /// Every slot of the hazard pool is already active.
    #[error("hazard pool exhausted: all {capacity} slots are active")]
    PoolExhausted {
        /// Capacity of the pool.
        capacity: usize,
    },
    /// No column is free at the spawn row, so the wave was skipped.
    #[error("no candidate columns are free at the spawn row")]
    NoCandidateColumns,
}

/// Non-blocking keyboard source consulted once per tick.
pub trait InputSource {
    /// Error raised when the underlying device cannot be read.
    type Error;

    /// Returns the pending key action or [`KeyAction::None`] without blocking.
    fn poll_key(&mut self) -> Result<KeyAction, Self::Error>;
}

/// Monotonic time source used for fixed-tick scheduling.
pub trait Clock {
    /// Seconds elapsed since an arbitrary fixed origin.
    fn now(&self) -> f64;
}
