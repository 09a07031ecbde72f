#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wave spawning system that injects hazards while keeping a survivable lane.
//!
//! Each wave draws distinct spawn columns without replacement, activates them
//! at the top row and then forward-simulates the whole field. If no player
//! column keeps a clear tick at the player row, the placement is rolled back
//! and redrawn. After the retry budget runs out the last placement is kept so
//! the game never stalls waiting for a fair layout.

use std::time::{SystemTime, UNIX_EPOCH};

use hydrogen_bombs_core::{Difficulty, GridSize, HazardError, Score, WAVE_RETRY_LIMIT};
use hydrogen_bombs_world::HazardField;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SPAWN_ROW: u32 = 0;

/// Source of uniform indices used to pick spawn columns.
pub trait RandomSource {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

/// Adapts any [`RngCore`] into a [`RandomSource`].
#[derive(Clone, Debug)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    /// Wraps the provided generator.
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Creates a reproducible source from a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a source seeded from the wall clock so every process plays differently.
    #[must_use]
    pub fn from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos() as u64);
        log::debug!("seeding wave spawner with {seed:#x}");
        Self::from_seed(seed)
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Configuration parameters required to construct the wave spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    retry_limit: u32,
    lookahead_rows: u32,
}

impl Config {
    /// Creates a new configuration with an explicit retry budget and safety window.
    #[must_use]
    pub const fn new(retry_limit: u32, lookahead_rows: u32) -> Self {
        Self {
            retry_limit,
            lookahead_rows,
        }
    }

    /// Maximum number of placement attempts per wave. Never lower than one.
    #[must_use]
    pub const fn retry_limit(&self) -> u32 {
        if self.retry_limit == 0 {
            1
        } else {
            self.retry_limit
        }
    }

    /// Number of future ticks inspected when looking for a safe column.
    #[must_use]
    pub const fn lookahead_rows(&self) -> u32 {
        self.lookahead_rows
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WAVE_RETRY_LIMIT, GridSize::STANDARD.full_fall_lookahead())
    }
}

/// Summary of a committed wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveReport {
    /// Hazards the difficulty asked for.
    pub requested: u32,
    /// Hazards that were actually activated.
    pub placed: u32,
    /// Placement attempts consumed, including the committed one.
    pub attempts: u32,
    /// Whether the committed layout leaves at least one safe column.
    pub safe_path: bool,
    /// Whether the pool ran out of slots while placing the committed layout.
    pub pool_exhausted: bool,
}

#[derive(Clone, Copy, Debug, Default)]
struct Placement {
    placed: u32,
    pool_exhausted: bool,
}

/// Pure system that places waves of hazards into a [`HazardField`].
#[derive(Debug)]
pub struct WaveSpawning<R> {
    config: Config,
    random: R,
    workspace: Vec<u32>,
}

impl<R: RandomSource> WaveSpawning<R> {
    /// Creates a new spawning system drawing columns from `random`.
    #[must_use]
    pub fn new(config: Config, random: R) -> Self {
        Self {
            config,
            random,
            workspace: Vec::new(),
        }
    }

    /// Random source used to draw spawn columns.
    #[must_use]
    pub fn random(&self) -> &R {
        &self.random
    }

    /// Places the next wave for the provided score.
    ///
    /// Returns [`HazardError::NoCandidateColumns`] without touching the field
    /// when every player column is already occupied at the spawn row.
    pub fn spawn_wave(
        &mut self,
        field: &mut HazardField,
        score: Score,
    ) -> Result<WaveReport, HazardError> {
        let grid = field.grid();
        let requested = Difficulty::for_score(score, grid).hazards_per_wave();
        let occupied = field.occupied_columns_at_row(SPAWN_ROW);
        let candidates: Vec<u32> = (0..=grid.max_player_column())
            .filter(|column| !occupied.contains(column))
            .collect();
        if candidates.is_empty() {
            log::debug!("skipping wave: spawn row is full");
            return Err(HazardError::NoCandidateColumns);
        }

        let retry_limit = self.config.retry_limit();
        let mut attempts = 0;
        loop {
            attempts += 1;
            let placement = self.place(field, &candidates, requested);
            let safe_path = has_safe_path(field, self.config.lookahead_rows());

            if safe_path || attempts >= retry_limit {
                let report = WaveReport {
                    requested,
                    placed: placement.placed,
                    attempts,
                    safe_path,
                    pool_exhausted: placement.pool_exhausted,
                };
                if safe_path {
                    log::debug!(
                        "wave committed: {}/{} hazards after {} attempt(s)",
                        report.placed,
                        report.requested,
                        report.attempts
                    );
                } else {
                    log::warn!(
                        "no safe layout within {retry_limit} attempts; committing last placement of {} hazards",
                        report.placed
                    );
                }
                return Ok(report);
            }

            // Waves fire before hazards advance, so the spawn row only holds this attempt.
            let _ = field.deactivate_row(SPAWN_ROW);
        }
    }

    fn place(&mut self, field: &mut HazardField, candidates: &[u32], requested: u32) -> Placement {
        self.workspace.clear();
        self.workspace.extend_from_slice(candidates);

        let mut placement = Placement::default();
        for _ in 0..requested {
            if self.workspace.is_empty() {
                break;
            }

            let index = self.random.pick_index(self.workspace.len()) % self.workspace.len();
            let column = self.workspace.swap_remove(index);
            match field.activate(column) {
                Ok(_) => placement.placed += 1,
                Err(error) => {
                    log::warn!("wave truncated at {} hazards: {error}", placement.placed);
                    placement.pool_exhausted = true;
                    break;
                }
            }
        }
        placement
    }
}

/// Reports whether any player column survives the forward simulation.
#[must_use]
pub fn has_safe_path(field: &HazardField, lookahead_rows: u32) -> bool {
    (0..=field.grid().max_player_column())
        .any(|column| field.is_safe_column(column, lookahead_rows))
}
