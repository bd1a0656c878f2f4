use std::fmt;

use crate::error::{MazeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    North,
    East,
    South,
    West,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::North, Dir::East, Dir::South, Dir::West];

    /// Row/column offset of one step in this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::North => (-1, 0),
            Dir::East => (0, 1),
            Dir::South => (1, 0),
            Dir::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::North => Dir::South,
            Dir::East => Dir::West,
            Dir::South => Dir::North,
            Dir::West => Dir::East,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Dir::North => 0b0001,
            Dir::East => 0b0010,
            Dir::South => 0b0100,
            Dir::West => 0b1000,
        }
    }
}

/// A cell coordinate, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The set of open doors of one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DoorSet(u8);

impl DoorSet {
    pub const EMPTY: DoorSet = DoorSet(0);

    pub fn contains(self, dir: Dir) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Dir> {
        Dir::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    fn insert(&mut self, dir: Dir) {
        self.0 |= dir.bit();
    }

    fn remove(&mut self, dir: Dir) {
        self.0 &= !dir.bit();
    }
}

impl FromIterator<Dir> for DoorSet {
    fn from_iter<I: IntoIterator<Item = Dir>>(iter: I) -> Self {
        let mut set = DoorSet::EMPTY;
        for dir in iter {
            set.insert(dir);
        }
        set
    }
}

/// Rectangular grid of cells joined by doors.
///
/// Doors are only ever added or removed in pairs, so a door from `a` towards
/// `b` exists exactly when the opposite door from `b` towards `a` exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    doors: Vec<DoorSet>,
}

impl Grid {
    /// Creates a grid with every door closed.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0 && len <= isize::MAX as usize)
            .ok_or(MazeError::InvalidDimensions { rows, cols })?;
        Ok(Grid {
            rows,
            cols,
            doors: vec![DoorSet::EMPTY; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dr, dc) = dir.delta();
        let row = pos.row.checked_add_signed(dr)?;
        let col = pos.col.checked_add_signed(dc)?;
        let next = Pos { row, col };
        self.contains(next).then_some(next)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Pos { row, col }))
    }

    pub fn orthogonal_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        Dir::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir))
    }

    /// Open doors of `pos`; empty for cells outside the grid.
    pub fn doors_at(&self, pos: Pos) -> DoorSet {
        if self.contains(pos) {
            self.doors[self.idx(pos)]
        } else {
            DoorSet::EMPTY
        }
    }

    pub fn degree(&self, pos: Pos) -> usize {
        self.doors_at(pos).len()
    }

    pub fn is_open(&self, pos: Pos, dir: Dir) -> bool {
        self.doors_at(pos).contains(dir)
    }

    /// Opens the door from `pos` towards `dir` and its mirror on the
    /// neighbor. Returns false when the neighbor is off the grid.
    pub fn open_passage(&mut self, pos: Pos, dir: Dir) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let Some(next) = self.neighbor(pos, dir) else {
            return false;
        };
        let (a, b) = (self.idx(pos), self.idx(next));
        self.doors[a].insert(dir);
        self.doors[b].insert(dir.opposite());
        true
    }

    pub fn remove_passage(&mut self, pos: Pos, dir: Dir) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let Some(next) = self.neighbor(pos, dir) else {
            return false;
        };
        let (a, b) = (self.idx(pos), self.idx(next));
        self.doors[a].remove(dir);
        self.doors[b].remove(dir.opposite());
        true
    }

    fn idx(&self, pos: Pos) -> usize {
        pos.row * self.cols + pos.col
    }
}

/// Moves one cell towards `dir` when the door is open; otherwise stays put.
pub fn step(grid: &Grid, pos: Pos, dir: Dir) -> Pos {
    if !grid.is_open(pos, dir) {
        return pos;
    }
    grid.neighbor(pos, dir).unwrap_or(pos)
}
