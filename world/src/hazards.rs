//! Fixed-capacity pool of falling hazards.

use std::collections::BTreeSet;

use hydrogen_bombs_core::{GridSize, HazardError, HazardId, HazardSnapshot, HAZARD_POOL_CAPACITY};

/// Single slot inside the hazard pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Hazard {
    column: u32,
    row: u32,
    active: bool,
}

/// Arena that owns every hazard. The slot index doubles as the [`HazardId`].
#[derive(Clone, Debug)]
pub struct HazardField {
    grid: GridSize,
    slots: [Hazard; HAZARD_POOL_CAPACITY],
}

impl HazardField {
    /// Creates an empty field covering `grid`.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            grid,
            slots: [Hazard::default(); HAZARD_POOL_CAPACITY],
        }
    }

    /// Dimensions the field was created with.
    #[must_use]
    pub const fn grid(&self) -> GridSize {
        self.grid
    }

    /// Claims the first free slot and places a hazard at row 0 of `column`.
    ///
    /// Fails with [`HazardError::PoolExhausted`] when every slot is active;
    /// callers are expected to continue with fewer hazards than requested.
    pub fn activate(&mut self, column: u32) -> Result<HazardId, HazardError> {
        debug_assert!(column < self.grid.width(), "hazard column outside grid");
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.active)
            .ok_or(HazardError::PoolExhausted {
                capacity: HAZARD_POOL_CAPACITY,
            })?;

        *slot = Hazard {
            column,
            row: 0,
            active: true,
        };
        Ok(slot_id(index))
    }

    /// Moves every active hazard down one row.
    ///
    /// Hazards reaching the bottom edge are freed and their identifiers pushed
    /// to `exited`. Returns the number of hazards that exited.
    pub fn advance(&mut self, exited: &mut Vec<HazardId>) -> usize {
        let height = self.grid.height();
        let mut count = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if !slot.active {
                continue;
            }

            slot.row += 1;
            if slot.row >= height {
                slot.active = false;
                exited.push(slot_id(index));
                count += 1;
            }
        }
        count
    }

    /// Frees every active hazard located on `row`. Returns how many were freed.
    pub fn deactivate_row(&mut self, row: u32) -> usize {
        let mut count = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.active && slot.row == row) {
            slot.active = false;
            count += 1;
        }
        count
    }

    /// Columns occupied by active hazards on `row`.
    #[must_use]
    pub fn occupied_columns_at_row(&self, row: u32) -> BTreeSet<u32> {
        self.active_slots()
            .filter(|slot| slot.row == row)
            .map(|slot| slot.column)
            .collect()
    }

    /// Reports whether a player standing on `column` has a clear tick ahead.
    ///
    /// Existing hazards are simulated forward for offsets `0..lookahead_rows`.
    /// The column is safe when at least one offset leaves both footprint cells
    /// free at the player row.
    #[must_use]
    pub fn is_safe_column(&self, column: u32, lookahead_rows: u32) -> bool {
        let critical_row = self.grid.player_row();
        (0..lookahead_rows).any(|offset| {
            !self.active_slots().any(|slot| {
                slot.row + offset == critical_row
                    && (slot.column == column || slot.column == column + 1)
            })
        })
    }

    /// Iterates the active hazards in slot order.
    pub fn iter_active(&self) -> impl Iterator<Item = HazardSnapshot> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(|(index, slot)| HazardSnapshot {
                id: slot_id(index),
                column: slot.column,
                row: slot.row,
            })
    }

    /// Number of active hazards.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active_slots().count()
    }

    /// Reports whether every slot is active.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active_count() == HAZARD_POOL_CAPACITY
    }

    fn active_slots(&self) -> impl Iterator<Item = &Hazard> + '_ {
        self.slots.iter().filter(|slot| slot.active)
    }
}

fn slot_id(index: usize) -> HazardId {
    HazardId::new(index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_reuses_freed_slots() {
        let mut field = HazardField::new(GridSize::STANDARD);
        let first = field.activate(3).expect("pool has room");
        let second = field.activate(4).expect("pool has room");
        assert_eq!(first, HazardId::new(0));
        assert_eq!(second, HazardId::new(1));

        assert_eq!(field.deactivate_row(0), 2);
        let reused = field.activate(7).expect("slots were freed");
        assert_eq!(reused, HazardId::new(0));
    }

    #[test]
    fn occupied_columns_only_report_the_requested_row() {
        let mut field = HazardField::new(GridSize::STANDARD);
        let _ = field.activate(5).expect("pool has room");
        let mut exited = Vec::new();
        let _ = field.advance(&mut exited);
        let _ = field.activate(9).expect("pool has room");

        assert_eq!(field.occupied_columns_at_row(0), BTreeSet::from([9]));
        assert_eq!(field.occupied_columns_at_row(1), BTreeSet::from([5]));
    }
}
