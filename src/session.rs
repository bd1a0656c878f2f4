use rand::Rng;
use tracing::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::grid::{step, Dir, Pos};
use crate::placement::{build_maze, Maze};

/// One play-through: the current maze plus the player's position on it.
#[derive(Debug, Clone)]
pub struct Session {
    maze: Maze,
    player: Pos,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings, rng: &mut impl Rng) -> Result<Self> {
        let maze = build(&settings, rng)?;
        Ok(Session {
            player: maze.start,
            maze,
            settings,
        })
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Takes effect on the next `regenerate`.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Returns whether the player actually moved.
    pub fn move_player(&mut self, dir: Dir) -> bool {
        let next = step(&self.maze.grid, self.player, dir);
        let moved = next != self.player;
        self.player = next;
        moved
    }

    pub fn reset_position(&mut self) {
        self.player = self.maze.start;
    }

    /// Swaps in a brand-new maze. On error the current maze is kept.
    pub fn regenerate(&mut self, rng: &mut impl Rng) -> Result<()> {
        let maze = build(&self.settings, rng)?;
        debug!(start = %maze.start, exit = %maze.exit, "maze regenerated");
        self.player = maze.start;
        self.maze = maze;
        Ok(())
    }

    pub fn has_escaped(&self) -> bool {
        self.player == self.maze.exit
    }
}

fn build(settings: &Settings, rng: &mut impl Rng) -> Result<Maze> {
    build_maze(
        settings.rows,
        settings.cols,
        &settings.gen,
        &settings.placement,
        rng,
    )
}
