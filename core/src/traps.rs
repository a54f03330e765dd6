//! Challenge-driven trap placement.
//!
//! Runs after the solver so it can see PATH tags. Each cell gets one roll;
//! a cell that passes the roll is then checked against the placement rules
//! below and, if accepted, draws a trap kind uniformly from every `Trap`
//! variant including `Trap::None`.

use strum::{Display, EnumCount};

use crate::config::MazeConfig;
use crate::grid::Grid;
use crate::rng::MazeRng;
use crate::types::{CellTag, Direction, GridCoordinate, Trap};

/// Why a cell that passed its roll did not get a trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Rejection {
    #[strum(to_string = "cell is outside the grid")]
    Missing,
    #[strum(to_string = "cell already has a trap")]
    Occupied,
    #[strum(to_string = "cell is START or FINISH")]
    Door,
    #[strum(to_string = "no opposite exits to jump the trap")]
    NotJumpable,
    #[strum(to_string = "challenge too low for a trap on the path")]
    PathTooEasy,
    #[strum(to_string = "path junction on the grid edge")]
    EdgeJunction,
    #[strum(to_string = "adjacent cell already has a trap")]
    Adjacent,
}

/// Percent chance that a cell skips placement outright.
pub fn trap_chance(challenge: u8) -> u32 {
    100u32.saturating_sub(u32::from(challenge) * 10)
}

/// Check whether the cell at `pos` may hold a trap.
pub fn check_cell(
    grid: &Grid,
    pos: GridCoordinate,
    challenge: u8,
    config: &MazeConfig,
) -> Result<(), Rejection> {
    let Ok(cell) = grid.get_cell(pos) else {
        return Err(Rejection::Missing);
    };

    if !cell.trap().is_none() {
        return Err(Rejection::Occupied);
    }
    if cell.tags().intersects(CellTag::START | CellTag::FINISH) {
        return Err(Rejection::Door);
    }

    let exits = cell.exits();
    let jumpable = exits.contains(Direction::NORTH | Direction::SOUTH)
        || exits.contains(Direction::EAST | Direction::WEST);
    if !jumpable {
        return Err(Rejection::NotJumpable);
    }

    if cell.has_tag(CellTag::PATH) {
        if challenge < config.traps_on_path_min_challenge {
            return Err(Rejection::PathTooEasy);
        }
        if grid.is_edge(pos) && cell.exit_count() > 2 {
            return Err(Rejection::EdgeJunction);
        }
    }

    for dir in Direction::ALL {
        if !cell.is_open(dir) {
            continue;
        }
        if let Ok(neighbor) = grid.get_neighbor(pos, dir) {
            if !neighbor.trap().is_none() {
                return Err(Rejection::Adjacent);
            }
        }
    }

    Ok(())
}

/// Roll and place traps over the whole grid in row-major order.
///
/// Returns the number of traps placed. Does nothing below
/// `config.traps_min_challenge`.
pub fn place_traps(
    grid: &mut Grid,
    challenge: u8,
    config: &MazeConfig,
    rng: &mut MazeRng,
) -> usize {
    if challenge < config.traps_min_challenge {
        tracing::debug!(
            "Challenge {} is below {}, no traps placed",
            challenge,
            config.traps_min_challenge
        );
        return 0;
    }

    let chance = trap_chance(challenge);
    let mut count = 0;

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let pos = GridCoordinate::new(row as i32, col as i32);

            if rng.roll_percent() < chance {
                continue;
            }
            if let Err(reason) = check_cell(grid, pos, challenge, config) {
                tracing::trace!("No trap at {}: {}", pos, reason);
                continue;
            }

            let trap = Trap::from_repr(rng.choice_index(Trap::COUNT) as u8).unwrap_or_default();
            if trap.is_none() {
                continue;
            }
            if let Ok(cell) = grid.get_cell_mut(pos) {
                cell.set_trap(trap);
                count += 1;
                tracing::debug!("Placed {} at {}", trap, pos);
            }
        }
    }

    tracing::debug!("Placed {} traps at challenge {}", count, challenge);
    count
}
