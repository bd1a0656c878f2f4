//! Random door mazes: every cell records which of its four sides are open,
//! generation keeps each cell's door count within a bounded range, and start
//! and exit are placed so the exit is reachable but never a straight walk
//! away.

pub mod config;
pub mod error;
pub mod generate;
pub mod grid;
pub mod placement;
pub mod reach;
pub mod session;
pub mod sight;

pub use config::{Difficulty, GenConfig, PlacementConfig, Settings};
pub use error::{MazeError, Result};
pub use generate::{generate_maze, generate_seeded, seeded_rng};
pub use grid::{step, Dir, DoorSet, Grid, Pos};
pub use placement::{build_maze, exit_candidates, place_start_and_exit, Maze};
pub use reach::reachable_set;
pub use session::Session;
pub use sight::straight_connected;
