#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides whether the player was struck by a hazard.

use hydrogen_bombs_core::{HazardSnapshot, PlayerPosition};
use hydrogen_bombs_world::HazardField;

/// Collision judge consulted after hazards advance each tick.
#[derive(Debug, Default)]
pub struct CollisionJudge;

impl CollisionJudge {
    /// Creates a new collision judge.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Reports whether any active hazard overlaps the player's footprint.
    #[must_use]
    pub fn check(&self, field: &HazardField, column: u32, row: u32) -> bool {
        self.first_hit(field, PlayerPosition::new(column, row)).is_some()
    }

    /// Returns the first hazard, in slot order, that overlaps the player.
    #[must_use]
    pub fn first_hit(&self, field: &HazardField, player: PlayerPosition) -> Option<HazardSnapshot> {
        field
            .iter_active()
            .find(|hazard| hazard.row == player.row() && player.covers_column(hazard.column))
    }
}
