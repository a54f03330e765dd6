//! Rectangular array of cells plus the neighbor and exit operations that
//! keep exits symmetric across shared walls.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{MazeError, Result};
use crate::types::{Direction, GridCoordinate};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// A `height` x `width` grid of walled-in cells.
    pub fn new(height: usize, width: usize) -> Self {
        let rows = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| Cell::new(row as i32, col as i32))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn contains(&self, pos: GridCoordinate) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height()
            && (pos.col as usize) < self.width()
    }

    /// True for cells on the outer ring of the grid.
    pub fn is_edge(&self, pos: GridCoordinate) -> bool {
        self.contains(pos)
            && (pos.row == 0
                || pos.col == 0
                || pos.row as usize == self.height() - 1
                || pos.col as usize == self.width() - 1)
    }

    pub fn get_cell(&self, pos: GridCoordinate) -> Result<&Cell> {
        self.check_bounds(pos)?;
        Ok(&self.rows[pos.row as usize][pos.col as usize])
    }

    pub fn get_cell_mut(&mut self, pos: GridCoordinate) -> Result<&mut Cell> {
        self.check_bounds(pos)?;
        Ok(&mut self.rows[pos.row as usize][pos.col as usize])
    }

    /// The cell one step from `pos` in `dir`. Edge cells may yield
    /// `OutOfBounds`.
    pub fn get_neighbor(&self, pos: GridCoordinate, dir: Direction) -> Result<&Cell> {
        self.get_cell(dir.step(pos))
    }

    /// Open the wall between `pos` and its neighbor in `dir`.
    ///
    /// Returns `false` without changing anything if the exit already exists,
    /// the neighbor is outside the grid, or `dir` is not a single direction.
    pub fn add_exit(&mut self, dir: Direction, pos: GridCoordinate) -> bool {
        let Some(next) = self.wall_partner(dir, pos) else {
            return false;
        };
        if self.rows[pos.row as usize][pos.col as usize].is_open(dir) {
            tracing::warn!("Exit {} already exists on cell {}", dir, pos);
            return false;
        }
        self.rows[pos.row as usize][pos.col as usize].open(dir);
        self.rows[next.row as usize][next.col as usize].open(dir.opposite());
        tracing::trace!("Exit {} added between {} and {}", dir, pos, next);
        true
    }

    /// Close the wall between `pos` and its neighbor in `dir`.
    ///
    /// Returns `false` without changing anything if the exit is absent, the
    /// neighbor is outside the grid, or `dir` is not a single direction.
    pub fn remove_exit(&mut self, dir: Direction, pos: GridCoordinate) -> bool {
        let Some(next) = self.wall_partner(dir, pos) else {
            return false;
        };
        if !self.rows[pos.row as usize][pos.col as usize].is_open(dir) {
            tracing::warn!("Exit {} does not exist on cell {}", dir, pos);
            return false;
        }
        self.rows[pos.row as usize][pos.col as usize].close(dir);
        self.rows[next.row as usize][next.col as usize].close(dir.opposite());
        tracing::trace!("Exit {} removed between {} and {}", dir, pos, next);
        true
    }

    /// Open an exit through the outer boundary. Only the START and FINISH
    /// doors use this; there is no neighbor to mirror the bit onto.
    pub(crate) fn open_boundary(&mut self, dir: Direction, pos: GridCoordinate) -> Result<()> {
        self.get_cell_mut(pos)?.open(dir);
        Ok(())
    }

    /// Coordinate of the cell sharing the wall `dir` of `pos`, if both exist.
    fn wall_partner(&self, dir: Direction, pos: GridCoordinate) -> Option<GridCoordinate> {
        if !dir.is_single() {
            tracing::warn!("Exit mutation needs a single direction, got {:?}", dir);
            return None;
        }
        if !self.contains(pos) {
            tracing::warn!("Exit mutation on invalid cell {}", pos);
            return None;
        }
        let next = dir.step(pos);
        if !self.contains(next) {
            tracing::warn!("No neighbor {} of cell {}", dir, pos);
            return None;
        }
        Some(next)
    }

    fn check_bounds(&self, pos: GridCoordinate) -> Result<()> {
        if self.contains(pos) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                height: self.height(),
                width: self.width(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.cells().count(), 12);
        for cell in grid.cells() {
            assert_eq!(cell.exit_count(), 0);
        }
        assert_eq!(
            grid.get_cell(GridCoordinate::new(2, 3)).unwrap().pos(),
            GridCoordinate::new(2, 3)
        );
    }

    #[test]
    fn test_get_cell_out_of_bounds() {
        let grid = Grid::new(3, 3);
        let err = grid.get_cell(GridCoordinate::new(-1, -1)).unwrap_err();
        assert!(err.to_string().contains("(-1, -1)"));
        assert!(grid.get_cell(GridCoordinate::new(3, 0)).is_err());
        // column bound is strict
        assert!(grid.get_cell(GridCoordinate::new(0, 3)).is_err());
    }

    #[test]
    fn test_get_neighbor() {
        let grid = Grid::new(3, 3);
        let center = GridCoordinate::new(1, 1);
        assert_eq!(
            grid.get_neighbor(center, Direction::WEST).unwrap().pos(),
            GridCoordinate::new(1, 0)
        );
        assert!(grid
            .get_neighbor(GridCoordinate::new(0, 0), Direction::NORTH)
            .is_err());
    }

    #[test]
    fn test_add_exit_twice() {
        let mut grid = Grid::new(3, 3);
        let pos = GridCoordinate::new(1, 1);
        assert!(grid.add_exit(Direction::NORTH, pos));
        assert!(!grid.add_exit(Direction::NORTH, pos));
        assert!(grid.get_cell(pos).unwrap().is_open(Direction::NORTH));
        assert!(grid
            .get_cell(GridCoordinate::new(0, 1))
            .unwrap()
            .is_open(Direction::SOUTH));
    }

    #[test]
    fn test_add_exit_to_missing_neighbor() {
        let mut grid = Grid::new(3, 3);
        let corner = GridCoordinate::new(0, 0);
        assert!(!grid.add_exit(Direction::NORTH, corner));
        assert!(!grid.add_exit(Direction::WEST, corner));
        assert_eq!(grid.get_cell(corner).unwrap().exit_count(), 0);
    }

    #[test]
    fn test_remove_exit_is_symmetric() {
        let mut grid = Grid::new(2, 2);
        let pos = GridCoordinate::new(0, 0);
        assert!(!grid.remove_exit(Direction::EAST, pos));
        assert!(grid.add_exit(Direction::EAST, pos));
        assert!(grid.remove_exit(Direction::EAST, pos));
        assert_eq!(grid.get_cell(pos).unwrap().exit_count(), 0);
        assert_eq!(
            grid.get_cell(GridCoordinate::new(0, 1)).unwrap().exit_count(),
            0
        );
    }

    #[test]
    fn test_combined_direction_rejected() {
        let mut grid = Grid::new(3, 3);
        assert!(!grid.add_exit(
            Direction::NORTH | Direction::SOUTH,
            GridCoordinate::new(1, 1)
        ));
    }

    #[test]
    fn test_is_edge() {
        let grid = Grid::new(3, 3);
        assert!(grid.is_edge(GridCoordinate::new(0, 1)));
        assert!(grid.is_edge(GridCoordinate::new(1, 2)));
        assert!(!grid.is_edge(GridCoordinate::new(1, 1)));
        assert!(!grid.is_edge(GridCoordinate::new(5, 5)));
    }
}
