use day6::{Error, Guard, Heading, Laboratory, Patrol, Position, Step};

fn sample_lab() -> Laboratory {
    "....#.....\n\
     .........#\n\
     ..........\n\
     ..#.......\n\
     .......#..\n\
     ..........\n\
     .#..^.....\n\
     ........#.\n\
     #.........\n\
     ......#..."
        .parse()
        .unwrap()
}

fn trapped_lab() -> Laboratory {
    ".#.\n#^#\n.#.".parse().unwrap()
}

#[test]
fn sample_guard_starts_north_at_marker() {
    let lab = sample_lab();

    assert_eq!((lab.row_n(), lab.col_n()), (10, 10));
    assert_eq!(*lab.guard(), Guard::new(Position::new(6, 4), Heading::North));
    assert!(!lab.is_blocked(lab.guard().pos()));
}

#[test]
fn sample_patrol_visits_41_positions() {
    assert_eq!(sample_lab().patrol_len().unwrap(), 41);
}

#[test]
fn patrol_is_repeatable() {
    let lab = sample_lab();
    let first = lab.patrol();

    assert_eq!(lab.patrol(), first);
    assert_eq!(lab.patrol_len().unwrap(), lab.patrol_len().unwrap());
}

#[test]
fn guard_facing_edge_leaves_after_one_step() {
    let lab: Laboratory = "^..\n...\n...".parse().unwrap();
    let mut guard = *lab.guard();

    assert_eq!(lab.step(&mut guard), Step::Moved);
    assert_eq!(*guard.pos(), Position::new(-1, 0));
    assert!(!lab.is_inside(guard.pos()));

    let patrol = lab.patrol();
    let visited = patrol.visited().unwrap();
    assert_eq!(visited.len(), 1);
    assert!(visited.contains(&Position::new(0, 0)));
}

#[test]
fn visited_always_contains_start() {
    let lab = sample_lab();
    let patrol = lab.patrol();

    assert!(patrol.visited().unwrap().contains(lab.guard().pos()));
}

#[test]
fn each_step_either_turns_or_moves() {
    let lab = sample_lab();
    let mut guard = *lab.guard();
    while lab.is_inside(guard.pos()) {
        let before = guard;
        let step = lab.step(&mut guard);
        let turned = before.heading() != guard.heading();
        let moved = before.pos() != guard.pos();

        assert!(turned != moved);
        match step {
            Step::Turned => assert!(turned),
            Step::Moved => assert!(moved),
        }
    }
}

#[test]
fn blocked_guard_turns_clockwise_in_place() {
    let lab = trapped_lab();
    let mut guard = *lab.guard();
    let start = *guard.pos();

    let mut headings = Vec::new();
    for _ in 0..4 {
        assert_eq!(lab.step(&mut guard), Step::Turned);
        assert_eq!(*guard.pos(), start);
        headings.push(guard.heading());
    }

    assert_eq!(
        headings,
        vec![Heading::East, Heading::South, Heading::West, Heading::North]
    );
}

#[test]
fn heading_rotation_wraps_around() {
    let mut heading = Heading::West;
    heading = heading.turn_right();
    assert_eq!(heading, Heading::North);
    assert_eq!(
        Heading::North.turn_right().turn_right().turn_right(),
        Heading::West
    );
}

#[test]
fn trapped_guard_is_reported_as_loop() {
    let lab = trapped_lab();

    assert_eq!(lab.patrol(), Patrol::Looped);
    assert!(matches!(lab.patrol_len(), Err(Error::EndlessPatrol(_))));
    assert!(matches!(
        lab.loop_obstructions(),
        Err(Error::EndlessPatrol(_))
    ));
}

#[test]
fn cells_outside_map_are_never_blocked() {
    let lab = sample_lab();

    assert!(!lab.is_blocked(&Position::new(-1, 4)));
    assert!(!lab.is_blocked(&Position::new(4, 10)));
    assert!(lab.is_blocked(&Position::new(0, 4)));
}

#[test]
fn sample_has_six_loop_obstructions() {
    let lab = sample_lab();
    let obstructions = lab.loop_obstructions().unwrap();

    assert_eq!(obstructions.len(), 6);
    assert!(obstructions.contains(&Position::new(6, 3)));
    assert!(!obstructions.contains(lab.guard().pos()));
}

#[test]
fn obstacle_walk_leaves_map_untouched() {
    let lab = sample_lab();

    assert!(lab.patrol_with_obstacle(&Position::new(6, 3)).is_loop());
    assert!(!lab.is_blocked(&Position::new(6, 3)));
    assert_eq!(lab.patrol_len().unwrap(), 41);
}

#[test]
fn rows_of_different_width_are_rejected() {
    let result = "..\n...\n^..".parse::<Laboratory>();

    assert!(matches!(result, Err(Error::InconsistentRow(1, 2, 3))));
}

#[test]
fn second_guard_is_rejected() {
    let result = "^.^".parse::<Laboratory>();

    assert!(matches!(result, Err(Error::MultipleGuards(_, _))));
}

#[test]
fn missing_guard_is_rejected() {
    assert!(matches!("...\n.#.".parse::<Laboratory>(), Err(Error::NoGuard)));
    assert!(matches!("".parse::<Laboratory>(), Err(Error::NoGuard)));
}

#[test]
fn unknown_tile_is_rejected() {
    let result = "^x".parse::<Laboratory>();

    match result {
        Err(Error::InvalidChar(c, pos)) => {
            assert_eq!(c, 'x');
            assert_eq!(pos, Position::new(0, 1));
        }
        other => panic!("expect invalid character error, given {:?}", other),
    }
}
