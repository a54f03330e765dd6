//! Solution tagging.
//!
//! Depth-first search from START, trying NORTH, SOUTH, EAST, WEST in that
//! order at every cell. The boundary doors of START and FINISH are not
//! moves. Once FINISH is reached the search stops and every cell on the
//! route back to START is tagged PATH.
//!
//! On a perfect maze the route between two cells is unique, so the first
//! route found is also the shortest. On a grid with cycles it is only the
//! first route in search order; branch lengths are never compared.

use std::collections::HashSet;

use crate::error::Result;
use crate::grid::Grid;
use crate::types::{CellTag, Direction, GridCoordinate};

/// Outcome of one solve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    /// START to FINISH inclusive, or empty if FINISH is unreachable.
    pub path: Vec<GridCoordinate>,
    /// Cells examined while searching.
    pub explored: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// Whether leaving `pos` through `dir` is a real move. The boundary doors
/// of START and FINISH lead nowhere.
fn is_move(
    start: GridCoordinate,
    finish: GridCoordinate,
    pos: GridCoordinate,
    dir: Direction,
) -> bool {
    !(pos == start && dir == Direction::NORTH) && !(pos == finish && dir == Direction::SOUTH)
}

struct SolveFrame {
    pos: GridCoordinate,
    next: usize,
}

/// Per-call search state. Nothing here outlives one `solve` call.
struct SolveContext<'g> {
    grid: &'g Grid,
    start: GridCoordinate,
    finish: GridCoordinate,
    visited: HashSet<GridCoordinate>,
    stack: Vec<SolveFrame>,
}

impl<'g> SolveContext<'g> {
    fn new(grid: &'g Grid, start: GridCoordinate, finish: GridCoordinate) -> Self {
        Self {
            grid,
            start,
            finish,
            visited: HashSet::new(),
            stack: Vec::new(),
        }
    }

    /// Next unvisited neighbor reachable from the top frame, advancing its
    /// direction cursor past everything it rejects.
    fn next_candidate(&mut self) -> Option<GridCoordinate> {
        let (start, finish) = (self.start, self.finish);
        let frame = self.stack.last_mut()?;
        let pos = frame.pos;
        let exits = match self.grid.get_cell(pos) {
            Ok(cell) => cell.exits(),
            Err(e) => {
                tracing::warn!("Dead end at {}: {}", pos, e);
                frame.next = Direction::ALL.len();
                return None;
            }
        };

        while let Some(&dir) = Direction::ALL.get(frame.next) {
            frame.next += 1;
            if !exits.contains(dir) {
                continue;
            }
            if !is_move(start, finish, pos, dir) {
                continue;
            }
            let next = dir.step(pos);
            if let Err(e) = self.grid.get_cell(next) {
                tracing::warn!("Dead end moving {} from {}: {}", dir, pos, e);
                continue;
            }
            if !self.visited.contains(&next) {
                return Some(next);
            }
        }
        None
    }

    fn run(mut self) -> Solution {
        let mut explored = 0;

        self.visited.insert(self.start);
        self.stack.push(SolveFrame {
            pos: self.start,
            next: 0,
        });

        while let Some(top) = self.stack.last() {
            let pos = top.pos;
            if pos == self.finish {
                explored += 1;
                tracing::debug!("Solution found at {} after {} cells", pos, explored);
                let path = self.stack.iter().map(|frame| frame.pos).collect();
                return Solution { path, explored };
            }
            if top.next == 0 {
                explored += 1;
            }

            match self.next_candidate() {
                Some(next) => {
                    self.visited.insert(next);
                    self.stack.push(SolveFrame { pos: next, next: 0 });
                }
                None => {
                    tracing::trace!("Dead end at {}", pos);
                    self.stack.pop();
                }
            }
        }

        tracing::warn!("No route from {} to {}", self.start, self.finish);
        Solution {
            path: Vec::new(),
            explored,
        }
    }
}

/// Find a route from `start` to `finish` without changing the grid.
pub fn solve(grid: &Grid, start: GridCoordinate, finish: GridCoordinate) -> Solution {
    SolveContext::new(grid, start, finish).run()
}

/// Find a route and tag each cell on it with PATH.
///
/// Returns the solution; its length is the maze's shortest path length.
pub fn solve_and_tag(
    grid: &mut Grid,
    start: GridCoordinate,
    finish: GridCoordinate,
) -> Result<Solution> {
    let solution = solve(grid, start, finish);
    for &pos in &solution.path {
        grid.get_cell_mut(pos)?.add_tag(CellTag::PATH);
    }
    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_gen::build_layout;
    use crate::rng::MazeRng;

    /// 3x3 grid with a hand-carved S-shaped route:
    /// (0,0) -> (1,0) -> (1,1) -> (1,2) -> (2,2), plus a spur to (0,1).
    fn hand_grid() -> (Grid, GridCoordinate, GridCoordinate) {
        let mut grid = Grid::new(3, 3);
        let start = GridCoordinate::new(0, 0);
        let finish = GridCoordinate::new(2, 2);
        grid.open_boundary(Direction::NORTH, start).unwrap();
        grid.open_boundary(Direction::SOUTH, finish).unwrap();
        assert!(grid.add_exit(Direction::SOUTH, start));
        assert!(grid.add_exit(Direction::EAST, GridCoordinate::new(1, 0)));
        assert!(grid.add_exit(Direction::NORTH, GridCoordinate::new(1, 1)));
        assert!(grid.add_exit(Direction::EAST, GridCoordinate::new(1, 1)));
        assert!(grid.add_exit(Direction::SOUTH, GridCoordinate::new(1, 2)));
        (grid, start, finish)
    }

    #[test]
    fn test_hand_carved_route() {
        let (mut grid, start, finish) = hand_grid();
        let solution = solve_and_tag(&mut grid, start, finish).unwrap();
        assert_eq!(
            solution.path,
            vec![
                GridCoordinate::new(0, 0),
                GridCoordinate::new(1, 0),
                GridCoordinate::new(1, 1),
                GridCoordinate::new(1, 2),
                GridCoordinate::new(2, 2),
            ]
        );
        // the spur is explored but not tagged
        assert!(!grid
            .get_cell(GridCoordinate::new(0, 1))
            .unwrap()
            .has_tag(CellTag::PATH));
        let tagged = grid.cells().filter(|c| c.has_tag(CellTag::PATH)).count();
        assert_eq!(tagged, solution.len());
    }

    #[test]
    fn test_boundary_doors_are_not_moves() {
        let (_, start, finish) = hand_grid();
        assert!(!is_move(start, finish, start, Direction::NORTH));
        assert!(!is_move(start, finish, finish, Direction::SOUTH));
        assert!(is_move(start, finish, start, Direction::SOUTH));
        assert!(is_move(start, finish, finish, Direction::NORTH));
    }

    #[test]
    fn test_unreachable_finish() {
        let mut grid = Grid::new(3, 3);
        let solution = solve_and_tag(
            &mut grid,
            GridCoordinate::new(0, 0),
            GridCoordinate::new(2, 2),
        )
        .unwrap();
        assert!(solution.is_empty());
        assert!(grid.cells().all(|c| !c.has_tag(CellTag::PATH)));
    }

    #[test]
    fn test_path_is_connected() {
        let mut rng = MazeRng::new("connected");
        let mut layout = build_layout(20, 20, &mut rng).unwrap();
        let solution = solve_and_tag(&mut layout.grid, layout.start, layout.finish).unwrap();

        assert_eq!(solution.path.first(), Some(&layout.start));
        assert_eq!(solution.path.last(), Some(&layout.finish));
        for pair in solution.path.windows(2) {
            let cell = layout.grid.get_cell(pair[0]).unwrap();
            let dir = Direction::ALL
                .into_iter()
                .find(|dir| dir.step(pair[0]) == pair[1])
                .expect("path steps are orthogonal");
            assert!(cell.is_open(dir));
        }
    }
}
