use hydrogen_bombs_core::{GridSize, HazardError, HazardId, HAZARD_POOL_CAPACITY};
use hydrogen_bombs_world::HazardField;

fn advance_rows(field: &mut HazardField, rows: u32) -> Vec<HazardId> {
    let mut exited = Vec::new();
    for _ in 0..rows {
        let _ = field.advance(&mut exited);
    }
    exited
}

#[test]
fn activation_places_hazards_on_the_spawn_row() {
    let mut field = HazardField::new(GridSize::STANDARD);
    let id = field.activate(12).expect("empty pool accepts hazards");

    let hazards: Vec<_> = field.iter_active().collect();
    assert_eq!(hazards.len(), 1);
    assert_eq!(hazards[0].id, id);
    assert_eq!(hazards[0].column, 12);
    assert_eq!(hazards[0].row, 0);
}

#[test]
fn full_pool_rejects_activation_without_side_effects() {
    let mut field = HazardField::new(GridSize::STANDARD);
    for index in 0..HAZARD_POOL_CAPACITY {
        let _ = field
            .activate((index % 39) as u32)
            .expect("pool has room until capacity");
    }
    assert!(field.is_full());

    let before: Vec<_> = field.iter_active().collect();
    let error = field.activate(0).expect_err("pool is exhausted");
    assert_eq!(
        error,
        HazardError::PoolExhausted {
            capacity: HAZARD_POOL_CAPACITY
        }
    );
    let after: Vec<_> = field.iter_active().collect();
    assert_eq!(before, after, "rejected activation must not touch the pool");
}

#[test]
fn advance_moves_every_hazard_down_one_row() {
    let mut field = HazardField::new(GridSize::STANDARD);
    let _ = field.activate(1).expect("pool has room");
    let _ = advance_rows(&mut field, 4);
    let _ = field.activate(30).expect("pool has room");

    let before: Vec<_> = field.iter_active().collect();
    let mut exited = Vec::new();
    assert_eq!(field.advance(&mut exited), 0);
    assert!(exited.is_empty());

    for (old, new) in before.iter().zip(field.iter_active()) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.column, new.column);
        assert_eq!(old.row + 1, new.row);
    }
}

#[test]
fn hazards_exit_when_they_pass_the_bottom_edge() {
    let grid = GridSize::STANDARD;
    let mut field = HazardField::new(grid);
    let id = field.activate(7).expect("pool has room");

    let exited = advance_rows(&mut field, grid.height() - 1);
    assert!(exited.is_empty(), "hazard is still on the last row");
    assert_eq!(field.active_count(), 1);

    let mut exited = Vec::new();
    assert_eq!(field.advance(&mut exited), 1);
    assert_eq!(exited, vec![id]);
    assert_eq!(field.active_count(), 0);
}

#[test]
fn active_hazards_stay_inside_the_grid() {
    let grid = GridSize::STANDARD;
    let mut field = HazardField::new(grid);
    for step in 0..60 {
        if step % 3 == 0 {
            let _ = field.activate(step % (grid.max_player_column() + 1));
        }
        let _ = advance_rows(&mut field, 1);
        for hazard in field.iter_active() {
            assert!(hazard.row < grid.height());
            assert!(hazard.column <= grid.max_player_column());
        }
    }
}

#[test]
fn advancing_an_empty_field_is_a_no_op() {
    let mut field = HazardField::new(GridSize::STANDARD);
    let mut exited = Vec::new();
    assert_eq!(field.advance(&mut exited), 0);
    assert_eq!(field.advance(&mut exited), 0);
    assert!(exited.is_empty());
    assert_eq!(field.active_count(), 0);
}

#[test]
fn deactivate_row_only_frees_the_requested_row() {
    let mut field = HazardField::new(GridSize::STANDARD);
    let _ = field.activate(2).expect("pool has room");
    let _ = advance_rows(&mut field, 1);
    let _ = field.activate(3).expect("pool has room");
    let _ = field.activate(4).expect("pool has room");

    assert_eq!(field.deactivate_row(0), 2);
    assert_eq!(field.deactivate_row(0), 0);
    let remaining: Vec<_> = field.iter_active().map(|hazard| hazard.column).collect();
    assert_eq!(remaining, vec![2]);
}

#[test]
fn column_is_unsafe_when_every_offset_collides() {
    let grid = GridSize::STANDARD;
    let mut field = HazardField::new(grid);
    // Hazards at rows 18 and 17 hit column 19 at offsets 0 and 1.
    let _ = field.activate(19).expect("pool has room");
    let _ = advance_rows(&mut field, 1);
    let _ = field.activate(20).expect("pool has room");
    let _ = advance_rows(&mut field, grid.player_row() - 1);

    assert!(!field.is_safe_column(19, 2));
    assert!(field.is_safe_column(19, 3), "offset 2 is clear");
    assert!(!field.is_safe_column(18, 1), "right footprint cell is hit");
    assert!(field.is_safe_column(21, 1));
    assert!(!field.is_safe_column(19, 0), "empty window has no clear tick");
}

#[test]
fn fresh_field_is_safe_everywhere() {
    let grid = GridSize::STANDARD;
    let field = HazardField::new(grid);
    for column in 0..=grid.max_player_column() {
        assert!(field.is_safe_column(column, grid.full_fall_lookahead()));
    }
}
