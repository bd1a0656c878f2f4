use std::iter;

use door_maze::{
    build_maze, exit_candidates, generate_seeded, reachable_set, seeded_rng, step,
    straight_connected, Difficulty, Dir, GenConfig, Grid, MazeError, PlacementConfig, Pos, Session,
    Settings,
};
use rand::seq::SliceRandom;
use rstest::rstest;

#[rstest]
fn random_walk_never_leaves_the_grid(
    #[values(Difficulty::Easy, Difficulty::Normal, Difficulty::Hard)] difficulty: Difficulty,
    #[values(5, 6)] seed: u64,
) {
    let mut rng = seeded_rng(Some(seed));
    let mut session = Session::new(Settings::for_difficulty(difficulty), &mut rng).unwrap();
    for _ in 0..500 {
        let before = session.player();
        let dir = *Dir::ALL.choose(&mut rng).unwrap();
        let open = session.maze().grid.is_open(before, dir);
        let moved = session.move_player(dir);
        assert_eq!(moved, open);
        assert!(session.maze().grid.contains(session.player()));
        if !open {
            assert_eq!(session.player(), before);
        }
    }
}

#[test]
fn bump_into_wall_at_center() {
    let mut grid = Grid::new(3, 3).unwrap();
    grid.open_passage(Pos::new(1, 1), Dir::East);
    grid.open_passage(Pos::new(1, 1), Dir::South);
    assert_eq!(step(&grid, Pos::new(1, 1), Dir::North), Pos::new(1, 1));
    assert_eq!(step(&grid, Pos::new(1, 1), Dir::South), Pos::new(2, 1));
}

#[test]
fn corridor_from_start_rules_out_far_end() {
    let mut grid = Grid::new(3, 5).unwrap();
    for col in 0..4 {
        grid.open_passage(Pos::new(0, col), Dir::East);
    }
    grid.open_passage(Pos::new(0, 4), Dir::South);
    grid.open_passage(Pos::new(1, 4), Dir::South);

    let start = Pos::new(0, 0);
    assert!(straight_connected(&grid, start, Pos::new(0, 2)));
    let reach = reachable_set(&grid, start);
    let candidates = exit_candidates(&grid, start, &reach, true);
    assert!(!candidates.contains(&Pos::new(0, 2)));
    assert!(!candidates.contains(&Pos::new(0, 4)));
    assert_eq!(candidates, vec![Pos::new(1, 4), Pos::new(2, 4)]);
}

#[rstest]
fn placed_mazes_hold_their_guarantees(#[values(10, 20, 30, 40)] seed: u64) {
    let mut rng = seeded_rng(Some(seed));
    let placement = PlacementConfig {
        relax_visibility: false,
        ..PlacementConfig::default()
    };
    let maze = build_maze(9, 9, &GenConfig::default(), &placement, &mut rng).unwrap();
    let grid = &maze.grid;

    for pos in grid.cells() {
        assert!((2..=4).contains(&grid.degree(pos)));
    }
    assert!(reachable_set(grid, maze.start).contains(&maze.exit));
    assert!(
        maze.start.row.abs_diff(maze.exit.row) > 1 || maze.start.col.abs_diff(maze.exit.col) > 1
    );
    for s in iter::once(maze.start).chain(grid.orthogonal_neighbors(maze.start)) {
        assert!(!straight_connected(grid, s, maze.exit));
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    assert_eq!(
        generate_seeded(6, 6, Some(8)).unwrap(),
        generate_seeded(6, 6, Some(8)).unwrap()
    );
}

#[test]
fn invalid_settings_fail_fast() {
    let mut rng = seeded_rng(Some(1));
    let mut settings = Settings::default();
    settings.cols = 0;
    assert!(matches!(
        Session::new(settings, &mut rng),
        Err(MazeError::InvalidDimensions { rows: 6, cols: 0 })
    ));
}
