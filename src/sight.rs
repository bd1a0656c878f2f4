use crate::grid::{Dir, Grid, Pos};

/// True when `a` and `b` share a row or column and every door on the
/// straight line between them is open. A cell is straight-connected to
/// itself.
pub fn straight_connected(grid: &Grid, a: Pos, b: Pos) -> bool {
    let dir = if a.row == b.row {
        if b.col >= a.col {
            Dir::East
        } else {
            Dir::West
        }
    } else if a.col == b.col {
        if b.row > a.row {
            Dir::South
        } else {
            Dir::North
        }
    } else {
        return false;
    };

    let mut pos = a;
    while pos != b {
        let Some(next) = grid.neighbor(pos, dir) else {
            return false;
        };
        if !grid.is_open(pos, dir) || !grid.is_open(next, dir.opposite()) {
            return false;
        }
        pos = next;
    }
    true
}
