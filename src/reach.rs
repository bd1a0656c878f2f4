use std::collections::{BTreeSet, VecDeque};

use crate::grid::{Grid, Pos};

/// Every cell reachable from `start` through open doors, `start` included.
/// Empty when `start` is off the grid.
pub fn reachable_set(grid: &Grid, start: Pos) -> BTreeSet<Pos> {
    let mut seen = BTreeSet::new();
    if !grid.contains(start) {
        return seen;
    }
    let mut q = VecDeque::new();
    seen.insert(start);
    q.push_back(start);

    while let Some(pos) = q.pop_front() {
        for dir in grid.doors_at(pos).iter() {
            let Some(next) = grid.neighbor(pos, dir) else {
                continue;
            };
            if seen.insert(next) {
                q.push_back(next);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate_seeded;
    use crate::grid::Dir;
    use rstest::rstest;

    #[test]
    fn isolated_cell_reaches_itself() {
        let grid = Grid::new(3, 3).unwrap();
        let reach = reachable_set(&grid, Pos::new(1, 1));
        assert_eq!(reach.into_iter().collect::<Vec<_>>(), vec![Pos::new(1, 1)]);
    }

    #[test]
    fn follows_doors_only() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_passage(Pos::new(0, 0), Dir::East);
        grid.open_passage(Pos::new(0, 1), Dir::South);
        grid.open_passage(Pos::new(2, 2), Dir::West);

        let reach = reachable_set(&grid, Pos::new(0, 0));
        let expected: BTreeSet<Pos> = [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1)].into();
        assert_eq!(reach, expected);

        let other = reachable_set(&grid, Pos::new(2, 1));
        assert_eq!(other.len(), 2);
        assert!(other.contains(&Pos::new(2, 2)));
    }

    #[test]
    fn off_grid_start_is_empty() {
        let grid = Grid::new(2, 2).unwrap();
        assert!(reachable_set(&grid, Pos::new(2, 0)).is_empty());
    }

    #[rstest]
    fn components_are_symmetric(#[values(3, 17, 256)] seed: u64) {
        let grid = generate_seeded(6, 6, Some(seed)).unwrap();
        let before = grid.clone();
        for a in grid.cells() {
            let reach = reachable_set(&grid, a);
            assert!(reach.contains(&a));
            for b in &reach {
                assert!(reachable_set(&grid, *b).contains(&a));
            }
            assert_eq!(reach, reachable_set(&grid, a));
        }
        assert_eq!(grid, before);
    }
}
