//! Maze carving using the recursive backtracker algorithm.
//!
//! Algorithm: randomized depth-first search from the START cell.
//! 1. On entering a cell, shuffle the four directions.
//! 2. For each direction in that order, if the neighbor is inside the grid
//!    and not yet CARVED, open the wall, tag the neighbor CARVED and descend.
//! 3. When a cell runs out of directions, backtrack to its parent.
//!
//! The descent uses an explicit stack so the deepest path (every cell of a
//! 50x50 grid) never touches the native call stack. Shuffles happen in the
//! same order the recursive form would make them, so the carve is governed
//! only by the seeded draw order. Because CARVED cells are never revisited,
//! the result is a spanning tree over the grid: a perfect maze.

use serde::{Deserialize, Serialize};

use crate::config::MazeConfig;
use crate::error::{MazeError, Result};
use crate::grid::Grid;
use crate::rng::MazeRng;
use crate::types::{CellTag, Direction, GridCoordinate};
use crate::{CHALLENGE_MAX, CHALLENGE_MIN, TEXT_LEN_MAX, TEXT_LEN_MIN};

/// Everything a maze is derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeParams {
    pub height: usize,
    pub width: usize,
    pub challenge: u8,
    pub name: String,
    pub seed: String,
}

impl MazeParams {
    pub fn new(
        height: usize,
        width: usize,
        challenge: u8,
        name: impl Into<String>,
        seed: impl Into<String>,
    ) -> Self {
        Self {
            height,
            width,
            challenge,
            name: name.into(),
            seed: seed.into(),
        }
    }

    /// Check every parameter against `config` and report all violations
    /// together.
    pub fn validate(&self, config: &MazeConfig) -> Result<()> {
        let mut problems = Vec::new();

        if self.height < config.min_height || self.height > config.max_height {
            problems.push(format!(
                "Height must be between {} and {}, got {}",
                config.min_height, config.max_height, self.height
            ));
        }
        if self.width < config.min_width || self.width > config.max_width {
            problems.push(format!(
                "Width must be between {} and {}, got {}",
                config.min_width, config.max_width, self.width
            ));
        }
        if !(CHALLENGE_MIN..=CHALLENGE_MAX).contains(&self.challenge) {
            problems.push(format!(
                "Challenge must be between {} and {}, got {}",
                CHALLENGE_MIN, CHALLENGE_MAX, self.challenge
            ));
        }
        let name_len = self.name.chars().count();
        if !(TEXT_LEN_MIN..=TEXT_LEN_MAX).contains(&name_len) {
            problems.push(format!(
                "Name length must be between {} and {} characters, got {}",
                TEXT_LEN_MIN, TEXT_LEN_MAX, name_len
            ));
        }
        let seed_len = self.seed.chars().count();
        if !(TEXT_LEN_MIN..=TEXT_LEN_MAX).contains(&seed_len) {
            problems.push(format!(
                "Seed length must be between {} and {} characters, got {}",
                TEXT_LEN_MIN, TEXT_LEN_MAX, seed_len
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            for problem in &problems {
                tracing::error!("{}", problem);
            }
            Err(MazeError::InvalidParameters(problems))
        }
    }
}

/// Diagnostics from one carve. Not used for any decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveReport {
    pub max_depth: usize,
    pub carved: usize,
}

/// A carved grid with its two doors.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: GridCoordinate,
    pub finish: GridCoordinate,
    pub report: CarveReport,
}

/// Allocate a `height` x `width` grid, place the doors and carve it.
pub fn build_layout(height: usize, width: usize, rng: &mut MazeRng) -> Result<Layout> {
    let mut grid = Grid::new(height, width);
    let (start, finish) = place_doors(&mut grid, rng)?;
    let report = carve(&mut grid, rng, start);

    tracing::debug!(
        "Carved {} of {} cells, max depth {}",
        report.carved,
        height * width,
        report.max_depth
    );

    Ok(Layout {
        grid,
        start,
        finish,
        report,
    })
}

/// Pick the START column on the north edge and the FINISH column on the
/// south edge, tag them and open their boundary doors.
fn place_doors(grid: &mut Grid, rng: &mut MazeRng) -> Result<(GridCoordinate, GridCoordinate)> {
    let start_col = rng.choice_index(grid.width());
    let finish_col = rng.choice_index(grid.width());

    let start = GridCoordinate::new(0, start_col as i32);
    let finish = GridCoordinate::new(grid.height() as i32 - 1, finish_col as i32);

    let cell = grid.get_cell_mut(start)?;
    cell.add_tag(CellTag::START);
    cell.add_tag(CellTag::CARVED);
    grid.open_boundary(Direction::NORTH, start)?;

    grid.get_cell_mut(finish)?.add_tag(CellTag::FINISH);
    grid.open_boundary(Direction::SOUTH, finish)?;

    tracing::debug!("Start cell {}, finish cell {}", start, finish);
    Ok((start, finish))
}

struct CarveFrame {
    pos: GridCoordinate,
    dirs: [Direction; 4],
    next: usize,
}

impl CarveFrame {
    fn enter(pos: GridCoordinate, rng: &mut MazeRng) -> Self {
        let mut dirs = Direction::ALL;
        rng.shuffle(&mut dirs);
        Self { pos, dirs, next: 0 }
    }
}

/// Carve passages outward from `start`, which must already be CARVED.
fn carve(grid: &mut Grid, rng: &mut MazeRng, start: GridCoordinate) -> CarveReport {
    let mut report = CarveReport {
        max_depth: 1,
        carved: 1,
    };
    let mut stack = vec![CarveFrame::enter(start, rng)];

    while let Some(frame) = stack.last_mut() {
        let Some(&dir) = frame.dirs.get(frame.next) else {
            tracing::trace!("Backtracking from {}", frame.pos);
            stack.pop();
            continue;
        };
        frame.next += 1;
        let pos = frame.pos;
        let next = dir.step(pos);

        match grid.get_cell(next) {
            Ok(neighbor) if neighbor.has_tag(CellTag::CARVED) => continue,
            Ok(_) => {}
            Err(_) => continue,
        }

        if !grid.add_exit(dir, pos) {
            tracing::warn!("Skipping {} from {}: exit could not be opened", dir, pos);
            continue;
        }
        match grid.get_cell_mut(next) {
            Ok(cell) => {
                cell.add_tag(CellTag::CARVED);
            }
            Err(e) => {
                tracing::error!("Carve step {} -> {} failed: {}", pos, next, e);
                continue;
            }
        }
        tracing::trace!("Carved {} from {} to {}", dir, pos, next);

        report.carved += 1;
        stack.push(CarveFrame::enter(next, rng));
        report.max_depth = report.max_depth.max(stack.len());
    }

    report
}
