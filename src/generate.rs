use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::config::GenConfig;
use crate::error::Result;
use crate::grid::{Dir, Grid, Pos};

/// A fixed seed gives a reproducible stream; `None` draws one from the OS.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Builds a random door grid whose cell degrees lie within
/// `cfg.min_degree..=cfg.max_degree` wherever the grid shape allows it.
///
/// Every in-bounds door is first opened independently with probability
/// `cfg.door_probability` (an edge gets one trial from each endpoint), then
/// correction sweeps add doors to under-connected cells and drop doors from
/// over-connected ones until a sweep changes nothing or `cfg.max_sweeps` is
/// reached. Cells with too few neighbors, as in a 1x1 grid, stay below the
/// minimum.
pub fn generate_maze(rows: usize, cols: usize, cfg: &GenConfig, rng: &mut impl Rng) -> Result<Grid> {
    cfg.validate()?;
    let mut grid = Grid::new(rows, cols)?;
    seed_doors(&mut grid, cfg.door_probability, rng);
    let sweeps = correct_degrees(&mut grid, cfg, rng);
    debug!(rows, cols, sweeps, "generated door grid");
    Ok(grid)
}

/// `generate_maze` with default tunables and an optional fixed seed.
pub fn generate_seeded(rows: usize, cols: usize, seed: Option<u64>) -> Result<Grid> {
    let mut rng = seeded_rng(seed);
    generate_maze(rows, cols, &GenConfig::default(), &mut rng)
}

fn seed_doors(grid: &mut Grid, p: f64, rng: &mut impl Rng) {
    let cells: Vec<Pos> = grid.cells().collect();
    for pos in cells {
        for dir in Dir::ALL {
            if grid.neighbor(pos, dir).is_some() && rng.gen::<f64>() < p {
                grid.open_passage(pos, dir);
            }
        }
    }
}

fn correct_degrees(grid: &mut Grid, cfg: &GenConfig, rng: &mut impl Rng) -> usize {
    let cells: Vec<Pos> = grid.cells().collect();
    for sweep in 1..=cfg.max_sweeps {
        let mut changed = false;
        for &pos in &cells {
            while grid.degree(pos) < cfg.min_degree {
                let options: Vec<Dir> = Dir::ALL
                    .into_iter()
                    .filter(|&d| {
                        !grid.is_open(pos, d)
                            && grid
                                .neighbor(pos, d)
                                .is_some_and(|n| grid.degree(n) < cfg.max_degree)
                    })
                    .collect();
                let Some(&dir) = options.choose(rng) else {
                    break;
                };
                grid.open_passage(pos, dir);
                changed = true;
            }
            while grid.degree(pos) > cfg.max_degree {
                let options: Vec<Dir> = grid
                    .doors_at(pos)
                    .iter()
                    .filter(|&d| {
                        grid.neighbor(pos, d)
                            .is_some_and(|n| grid.degree(n) > cfg.min_degree)
                    })
                    .collect();
                let Some(&dir) = options.choose(rng) else {
                    break;
                };
                grid.remove_passage(pos, dir);
                changed = true;
            }
        }
        if !changed {
            return sweep;
        }
    }
    warn!(
        rows = grid.rows(),
        cols = grid.cols(),
        max_sweeps = cfg.max_sweeps,
        "degree correction hit its sweep cap"
    );
    cfg.max_sweeps
}
