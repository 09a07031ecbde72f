use hydrogen_bombs_core::{Command, Direction, Event, GridSize, PlayerPosition, Score};
use hydrogen_bombs_world::{self as world, query, World};

#[test]
fn player_column_stays_within_bounds() {
    let mut world = World::new();
    let grid = query::grid(&world);
    let mut events = Vec::new();

    for _ in 0..(grid.width() * 2) {
        world::apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Left,
            },
            &mut events,
        );
        assert!(query::player(&world).column() <= grid.max_player_column());
    }
    assert_eq!(query::player(&world).column(), 0);

    for _ in 0..(grid.width() * 2) {
        world::apply(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Right,
            },
            &mut events,
        );
    }
    assert_eq!(query::player(&world).column(), grid.max_player_column());
}

#[test]
fn moving_emits_player_moved_only_on_change() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::MovePlayer {
            direction: Direction::Right,
        },
        &mut events,
    );

    assert_eq!(
        events,
        vec![Event::PlayerMoved {
            from: PlayerPosition::new(20, 18),
            to: PlayerPosition::new(21, 18),
        }]
    );
}

#[test]
fn exited_hazards_raise_the_score() {
    let mut world = World::new();
    let grid = GridSize::STANDARD;
    let first = world.hazards_mut().activate(0).expect("pool has room");
    let second = world.hazards_mut().activate(5).expect("pool has room");

    let mut events = Vec::new();
    for _ in 0..(grid.height() - 1) {
        world::apply(&mut world, Command::AdvanceHazards, &mut events);
    }
    assert!(events.is_empty(), "no hazard has exited yet");
    assert_eq!(query::score(&world), Score::new(0));

    world::apply(&mut world, Command::AdvanceHazards, &mut events);
    assert_eq!(query::score(&world), Score::new(2));
    assert_eq!(
        events,
        vec![
            Event::HazardsExited {
                hazards: vec![first, second],
            },
            Event::ScoreChanged {
                score: Score::new(2),
            },
        ]
    );
    assert!(query::hazards(&world).is_empty());
}

#[test]
fn ticks_are_counted() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::Tick, &mut events);
    world::apply(&mut world, Command::Tick, &mut events);

    assert_eq!(query::tick_index(&world), 2);
    assert_eq!(events.last(), Some(&Event::TickAdvanced { tick: 2 }));
}

#[test]
fn only_apply_scores_hazards_leaving_the_pool() {
    let mut world = World::new();
    let grid = GridSize::STANDARD;
    let _ = world.hazards_mut().activate(0).expect("pool has room");
    let _ = world.hazards_mut().activate(7).expect("pool has room");
    assert_eq!(query::hazards(&world).len(), 2);

    let mut exited = Vec::new();
    for _ in 0..grid.height() {
        let _ = world.hazards_mut().advance(&mut exited);
    }
    assert_eq!(exited.len(), 2);
    assert!(query::hazards(&world).is_empty());
    assert_eq!(query::score(&world), Score::new(0));

    let _ = world.hazards_mut().activate(3).expect("pool has room");
    let mut events = Vec::new();
    for _ in 0..grid.height() {
        world::apply(&mut world, Command::AdvanceHazards, &mut events);
    }
    assert_eq!(query::score(&world), Score::new(1));
}
