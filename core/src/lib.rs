//! Maze generation, solving and rendering engine.
//!
//! A maze is a pure function of (height, width, challenge, name, seed):
//! the same inputs always give the same grid, solution path and traps.
//!
//! The crate emits diagnostics through `tracing` and never installs a
//! subscriber; the host decides where logs go.

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod maze;
pub mod maze_gen;
pub mod render;
pub mod rng;
pub mod solver;
pub mod traps;
pub mod types;

pub use cell::Cell;
pub use config::MazeConfig;
pub use error::{ConfigError, MazeError, Result};
pub use grid::Grid;
pub use maze::{maze_id, Maze, MazeStub};
pub use maze_gen::MazeParams;
pub use rng::MazeRng;
pub use types::{CellTag, Direction, GridCoordinate, Trap};

/// Challenge levels accepted by generation.
pub const CHALLENGE_MIN: u8 = 1;
pub const CHALLENGE_MAX: u8 = 10;

/// Allowed length, in characters, of maze names and seeds.
pub const TEXT_LEN_MIN: usize = 3;
pub const TEXT_LEN_MAX: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(CHALLENGE_MIN < CHALLENGE_MAX);
        assert!(TEXT_LEN_MIN <= TEXT_LEN_MAX);
    }

    #[test]
    fn test_maze_id_format() {
        assert_eq!(maze_id(3, 3, 1, "Maze"), "3:3:1:Maze");
        assert_eq!(maze_id(50, 20, 10, "a:b"), "50:20:10:a:b");
    }
}
