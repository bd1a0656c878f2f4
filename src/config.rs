use clap::ValueEnum;

use crate::error::{MazeError, Result};

pub const DOOR_PROBABILITY: f64 = 0.22;
pub const MIN_DEGREE: usize = 2;
pub const MAX_DEGREE: usize = 4;
pub const MAX_SWEEPS: usize = 64;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 256;

/// Tunables for the maze generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenConfig {
    /// Chance of opening each door during the seeding pass.
    pub door_probability: f64,
    pub min_degree: usize,
    pub max_degree: usize,
    /// Upper bound on correction sweeps before the grid is returned as-is.
    pub max_sweeps: usize,
}

impl Default for GenConfig {
    fn default() -> Self {
        GenConfig {
            door_probability: DOOR_PROBABILITY,
            min_degree: MIN_DEGREE,
            max_degree: MAX_DEGREE,
            max_sweeps: MAX_SWEEPS,
        }
    }
}

impl GenConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.door_probability) {
            return Err(MazeError::InvalidProbability(self.door_probability));
        }
        if self.min_degree > self.max_degree || self.max_degree > MAX_DEGREE {
            return Err(MazeError::InvalidDegreeBounds {
                min: self.min_degree,
                max: self.max_degree,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Maze regenerations allowed before giving up (per policy).
    pub max_attempts: usize,
    /// Drop the straight-corridor rule once strict attempts run out.
    pub relax_visibility: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        PlacementConfig {
            max_attempts: MAX_PLACEMENT_ATTEMPTS,
            relax_visibility: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (4, 4),
            Difficulty::Normal => (6, 6),
            Difficulty::Hard => (9, 9),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub rows: usize,
    pub cols: usize,
    pub gen: GenConfig,
    pub placement: PlacementConfig,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (rows, cols) = difficulty.dimensions();
        Settings {
            rows,
            cols,
            gen: GenConfig::default(),
            placement: PlacementConfig::default(),
            seed: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::for_difficulty(Difficulty::Normal)
    }
}
