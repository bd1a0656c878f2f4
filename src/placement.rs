use std::collections::BTreeSet;
use std::iter;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{GenConfig, PlacementConfig};
use crate::error::{MazeError, Result};
use crate::generate::generate_maze;
use crate::grid::{Grid, Pos};
use crate::reach::reachable_set;
use crate::sight::straight_connected;

/// A generated grid together with its start and exit cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub grid: Grid,
    pub start: Pos,
    pub exit: Pos,
}

/// Generates a fresh grid and places start and exit on it.
pub fn build_maze(
    rows: usize,
    cols: usize,
    gen: &GenConfig,
    placement: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<Maze> {
    let grid = generate_maze(rows, cols, gen, rng)?;
    place_start_and_exit(grid, gen, placement, rng)
}

/// Picks a random start, then an exit reachable from it that is outside the
/// 3x3 block around the start and not visible down a straight corridor from
/// the start or any of its orthogonal neighbors.
///
/// The given grid is always tried first. When no exit qualifies the grid is
/// thrown away and regenerated. After `max_attempts` failures (at least one)
/// the corridor rule is dropped for another `max_attempts` tries if
/// `relax_visibility` is set; past that the call fails with
/// `PlacementUnsatisfiable`.
pub fn place_start_and_exit(
    mut grid: Grid,
    gen: &GenConfig,
    placement: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<Maze> {
    let strict = placement.max_attempts.max(1);
    let relaxed = if placement.relax_visibility {
        placement.max_attempts
    } else {
        0
    };
    let total = strict + relaxed;
    for attempt in 1..=total {
        let enforce_visibility = attempt <= strict;
        if attempt == strict + 1 {
            warn!(
                attempts = strict,
                "no placement under the corridor rule, relaxing it"
            );
        }
        if let Some((start, exit)) = try_pick(&grid, enforce_visibility, rng) {
            info!(%start, %exit, attempts = attempt, "placed start and exit");
            return Ok(Maze { grid, start, exit });
        }
        if attempt < total {
            debug!(attempt, "no valid exit, regenerating grid");
            grid = generate_maze(grid.rows(), grid.cols(), gen, rng)?;
        }
    }
    Err(MazeError::PlacementUnsatisfiable { attempts: total })
}

fn try_pick(grid: &Grid, enforce_visibility: bool, rng: &mut impl Rng) -> Option<(Pos, Pos)> {
    let start = Pos::new(rng.gen_range(0..grid.rows()), rng.gen_range(0..grid.cols()));
    let reach = reachable_set(grid, start);
    let candidates = exit_candidates(grid, start, &reach, enforce_visibility);
    candidates.choose(rng).map(|&exit| (start, exit))
}

/// True for `start` and the eight cells around it.
pub fn in_banned_zone(start: Pos, pos: Pos) -> bool {
    start.row.abs_diff(pos.row) <= 1 && start.col.abs_diff(pos.col) <= 1
}

/// Valid exits for `start`, in row-major order.
pub fn exit_candidates(
    grid: &Grid,
    start: Pos,
    reach: &BTreeSet<Pos>,
    enforce_visibility: bool,
) -> Vec<Pos> {
    let origins: Vec<Pos> = iter::once(start)
        .chain(grid.orthogonal_neighbors(start))
        .collect();
    reach
        .iter()
        .copied()
        .filter(|&p| !in_banned_zone(start, p))
        .filter(|&p| {
            !enforce_visibility || !origins.iter().any(|&s| straight_connected(grid, s, p))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::seeded_rng;
    use crate::grid::Dir;
    use rstest::rstest;

    fn hook_grid() -> Grid {
        // top row open end to end, then down the right side and back left
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_passage(Pos::new(0, 0), Dir::East);
        grid.open_passage(Pos::new(0, 1), Dir::East);
        grid.open_passage(Pos::new(0, 2), Dir::South);
        grid.open_passage(Pos::new(1, 2), Dir::South);
        grid.open_passage(Pos::new(2, 2), Dir::West);
        grid
    }

    #[test]
    fn corridor_exit_is_rejected() {
        let grid = hook_grid();
        let start = Pos::new(0, 0);
        let reach = reachable_set(&grid, start);
        assert!(reach.contains(&Pos::new(0, 2)));

        let candidates = exit_candidates(&grid, start, &reach, true);
        assert_eq!(
            candidates,
            vec![Pos::new(1, 2), Pos::new(2, 1), Pos::new(2, 2)]
        );
    }

    #[test]
    fn relaxed_policy_keeps_corridor_exit() {
        let grid = hook_grid();
        let start = Pos::new(0, 0);
        let reach = reachable_set(&grid, start);
        let candidates = exit_candidates(&grid, start, &reach, false);
        assert_eq!(candidates[0], Pos::new(0, 2));
        assert_eq!(candidates.len(), 4);
    }

    #[test]
    fn banned_zone_is_the_3x3_block() {
        let start = Pos::new(2, 2);
        let banned: Vec<Pos> = (0..5)
            .flat_map(|row| (0..5).map(move |col| Pos::new(row, col)))
            .filter(|&p| in_banned_zone(start, p))
            .collect();
        assert_eq!(banned.len(), 9);
        assert!(in_banned_zone(Pos::new(0, 0), Pos::new(1, 1)));
        assert!(!in_banned_zone(Pos::new(0, 0), Pos::new(0, 2)));
    }

    #[rstest]
    fn placement_is_valid(
        #[values((4, 4), (6, 6), (9, 9), (3, 7))] dims: (usize, usize),
        #[values(1, 2, 3, 50, 777)] seed: u64,
    ) {
        let mut rng = seeded_rng(Some(seed));
        let placement = PlacementConfig {
            relax_visibility: false,
            ..PlacementConfig::default()
        };
        let maze = build_maze(dims.0, dims.1, &GenConfig::default(), &placement, &mut rng).unwrap();
        let Maze { grid, start, exit } = &maze;

        assert!(grid.contains(*start) && grid.contains(*exit));
        assert!(!in_banned_zone(*start, *exit));
        assert!(reachable_set(grid, *start).contains(exit));
        for s in iter::once(*start).chain(grid.orthogonal_neighbors(*start)) {
            assert!(!straight_connected(grid, s, *exit), "{exit} visible from {s}");
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let build = |seed| {
            let mut rng = seeded_rng(Some(seed));
            build_maze(6, 6, &GenConfig::default(), &PlacementConfig::default(), &mut rng).unwrap()
        };
        assert_eq!(build(31), build(31));
    }

    #[test]
    fn closed_grid_is_regenerated_until_placeable() {
        // every start only reaches itself, so the first attempt always fails
        let closed = Grid::new(6, 6).unwrap();
        let mut rng = seeded_rng(Some(1));
        let maze = place_start_and_exit(
            closed.clone(),
            &GenConfig::default(),
            &PlacementConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert_ne!(maze.grid, closed);
        assert!(!in_banned_zone(maze.start, maze.exit));
        assert!(reachable_set(&maze.grid, maze.start).contains(&maze.exit));
    }

    #[test]
    fn zero_attempt_budget_still_tries_given_grid() {
        let mut open = Grid::new(9, 9).unwrap();
        let cells: Vec<Pos> = open.cells().collect();
        for pos in cells {
            open.open_passage(pos, Dir::East);
            open.open_passage(pos, Dir::South);
        }
        let placement = PlacementConfig {
            max_attempts: 0,
            relax_visibility: false,
        };
        let mut rng = seeded_rng(Some(2));
        let maze = place_start_and_exit(open.clone(), &GenConfig::default(), &placement, &mut rng)
            .unwrap();

        assert_eq!(maze.grid, open);
        assert!(!in_banned_zone(maze.start, maze.exit));
        for s in iter::once(maze.start).chain(open.orthogonal_neighbors(maze.start)) {
            assert!(!straight_connected(&open, s, maze.exit));
        }
    }

    #[rstest]
    #[case(true, 6)]
    #[case(false, 3)]
    fn tiny_grid_is_unsatisfiable(#[case] relax: bool, #[case] attempts: usize) {
        let mut rng = seeded_rng(Some(9));
        let placement = PlacementConfig {
            max_attempts: 3,
            relax_visibility: relax,
        };
        let result = build_maze(2, 2, &GenConfig::default(), &placement, &mut rng);
        assert_eq!(result, Err(MazeError::PlacementUnsatisfiable { attempts }));
    }
}
