//! Fixed-width ASCII rendering of a grid.
//!
//! Each cell becomes a block 4 characters wide and 3 lines tall:
//!
//! ```text
//! +---    top wall, or "+   " when open, "+ S " on the START door
//! | . |   west side, 3-char center, east side on the last column
//! +---    bottom wall, or "+   " when open, "+ F " on the FINISH door
//! ```
//!
//! The top and bottom lines close with `+`, the body line closes with the
//! east side of the last cell in the row.

use crate::cell::Cell;
use crate::grid::Grid;
use crate::types::{CellTag, Direction, GridCoordinate};

const H_WALL: &str = "+---";
const H_DOOR: &str = "+   ";
const S_DOOR: &str = "+ S ";
const F_DOOR: &str = "+ F ";
const CORNER: char = '+';
const V_WALL: char = '|';
const V_DOOR: char = ' ';

const EMPTY: &str = "   ";
const PATH: &str = " . ";
const TRAP: &str = " x ";
const PLAYER: &str = " @ ";
const PLAYER_TRAPPED: &str = " & ";

/// Render `grid`, marking `live` as the player's position when given.
pub fn render(grid: &Grid, live: Option<GridCoordinate>) -> String {
    let mut out = String::with_capacity(grid.height() * 3 * (grid.width() * 4 + 2));

    for row in grid.rows() {
        for cell in row {
            out.push_str(if cell.has_tag(CellTag::START) {
                S_DOOR
            } else if cell.is_open(Direction::NORTH) {
                H_DOOR
            } else {
                H_WALL
            });
        }
        out.push(CORNER);
        out.push('\n');

        for cell in row {
            out.push(side(cell, Direction::WEST));
            out.push_str(center(cell, live));
        }
        if let Some(last) = row.last() {
            out.push(side(last, Direction::EAST));
        }
        out.push('\n');

        for cell in row {
            out.push_str(if cell.has_tag(CellTag::FINISH) {
                F_DOOR
            } else if cell.is_open(Direction::SOUTH) {
                H_DOOR
            } else {
                H_WALL
            });
        }
        out.push(CORNER);
        out.push('\n');
    }

    out
}

fn side(cell: &Cell, dir: Direction) -> char {
    if cell.is_open(dir) {
        V_DOOR
    } else {
        V_WALL
    }
}

/// Player over trap over path over nothing.
fn center(cell: &Cell, live: Option<GridCoordinate>) -> &'static str {
    let trapped = !cell.trap().is_none();
    if live == Some(cell.pos()) {
        if trapped {
            PLAYER_TRAPPED
        } else {
            PLAYER
        }
    } else if trapped {
        TRAP
    } else if cell.has_tag(CellTag::PATH) {
        PATH
    } else {
        EMPTY
    }
}
