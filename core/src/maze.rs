//! The maze aggregate.
//!
//! A `Maze` starts empty. `generate` validates the parameters, then runs
//! carving, solving, trap placement and rendering in that order, each
//! drawing from one RNG seeded from the seed string. Calling `generate`
//! again on a populated maze logs a warning and changes nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::config::MazeConfig;
use crate::error::{MazeError, Result};
use crate::grid::Grid;
use crate::maze_gen::{build_layout, MazeParams};
use crate::render::render;
use crate::rng::MazeRng;
use crate::solver::solve_and_tag;
use crate::traps::place_traps;
use crate::types::{Direction, GridCoordinate};

/// The natural key of a maze: `"{height}:{width}:{challenge}:{seed}"`.
pub fn maze_id(height: usize, width: usize, challenge: u8, seed: &str) -> String {
    format!("{}:{}:{}:{}", height, width, challenge, seed)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maze {
    id: String,
    height: usize,
    width: usize,
    challenge: u8,
    name: String,
    seed: String,
    note: String,
    cells: Grid,
    start_cell: GridCoordinate,
    finish_cell: GridCoordinate,
    shortest_path_length: usize,
    trap_count: usize,
    text_render: String,
    last_updated: DateTime<Utc>,
}

impl Maze {
    /// An empty, ungenerated maze.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and generate a maze in one step.
    pub fn build(config: &MazeConfig, params: &MazeParams) -> Result<Self> {
        let mut maze = Self::new();
        maze.generate(config, params)?;
        Ok(maze)
    }

    /// Populate this maze from `params`.
    ///
    /// Fails with `InvalidParameters` before touching anything if any
    /// parameter is out of bounds. A maze that is already populated is
    /// returned unchanged.
    pub fn generate(&mut self, config: &MazeConfig, params: &MazeParams) -> Result<&mut Self> {
        if self.is_generated() {
            tracing::warn!("Maze {} has already been generated", self.id);
            return Ok(self);
        }
        params.validate(config)?;

        let id = maze_id(params.height, params.width, params.challenge, &params.seed);
        let span = tracing::info_span!("generate", id = %id);
        let _enter = span.enter();

        let mut rng = MazeRng::new(&params.seed);
        let mut layout = build_layout(params.height, params.width, &mut rng)?;
        let solution = solve_and_tag(&mut layout.grid, layout.start, layout.finish)?;
        let trap_count = place_traps(&mut layout.grid, params.challenge, config, &mut rng);

        self.id = id;
        self.height = params.height;
        self.width = params.width;
        self.challenge = params.challenge;
        self.name = params.name.clone();
        self.seed = params.seed.clone();
        self.text_render = render(&layout.grid, None);
        self.cells = layout.grid;
        self.start_cell = layout.start;
        self.finish_cell = layout.finish;
        self.shortest_path_length = solution.len();
        self.trap_count = trap_count;
        self.last_updated = Utc::now();

        tracing::info!(
            "Maze {} generated: path length {}, {} traps",
            self.id,
            self.shortest_path_length,
            self.trap_count
        );
        Ok(self)
    }

    pub fn is_generated(&self) -> bool {
        !self.cells.is_empty()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn challenge(&self) -> u8 {
        self.challenge
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.touch();
    }

    pub fn grid(&self) -> &Grid {
        &self.cells
    }

    pub fn start_cell(&self) -> GridCoordinate {
        self.start_cell
    }

    pub fn finish_cell(&self) -> GridCoordinate {
        self.finish_cell
    }

    pub fn shortest_path_length(&self) -> usize {
        self.shortest_path_length
    }

    pub fn trap_count(&self) -> usize {
        self.trap_count
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Mark the maze as updated now.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    pub fn cell(&self, pos: GridCoordinate) -> Result<&Cell> {
        self.cells.get_cell(pos)
    }

    /// Mutable access for gameplay updates (visits, notes).
    ///
    /// Clears the cached text render.
    pub fn cell_mut(&mut self, pos: GridCoordinate) -> Result<&mut Cell> {
        let cell = self.cells.get_cell_mut(pos)?;
        self.text_render.clear();
        Ok(cell)
    }

    pub fn get_neighbor(&self, pos: GridCoordinate, dir: Direction) -> Result<&Cell> {
        self.cells.get_neighbor(pos, dir)
    }

    /// Text render of the grid.
    ///
    /// Returns the cached render unless `force` is set or the cache is empty.
    /// The cache does not key on `live`, so overlaying a player position
    /// needs `force`. Whatever is rendered replaces the cache.
    pub fn render(&mut self, force: bool, live: Option<GridCoordinate>) -> &str {
        if force || self.text_render.is_empty() {
            self.text_render = render(&self.cells, live);
        }
        &self.text_render
    }

    /// The cached render, possibly empty.
    pub fn text_render(&self) -> &str {
        &self.text_render
    }

    pub fn stub(&self) -> MazeStub {
        MazeStub::from(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Restore a serialized maze, checking that its shape agrees with its
    /// own metadata.
    pub fn from_json(json: &str) -> Result<Self> {
        let maze: Maze =
            serde_json::from_str(json).map_err(|e| MazeError::InvalidData(e.to_string()))?;
        maze.check_structure()?;
        Ok(maze)
    }

    fn check_structure(&self) -> Result<()> {
        if !self.is_generated() {
            return Ok(());
        }

        let expected = maze_id(self.height, self.width, self.challenge, &self.seed);
        if self.id != expected {
            return Err(MazeError::InvalidData(format!(
                "id '{}' does not match '{}'",
                self.id, expected
            )));
        }
        if self.cells.height() != self.height {
            return Err(MazeError::InvalidData(format!(
                "expected {} rows, found {}",
                self.height,
                self.cells.height()
            )));
        }
        for (row, cells) in self.cells.rows().enumerate() {
            if cells.len() != self.width {
                return Err(MazeError::InvalidData(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    self.width
                )));
            }
            for (col, cell) in cells.iter().enumerate() {
                if cell.pos() != GridCoordinate::new(row as i32, col as i32) {
                    return Err(MazeError::InvalidData(format!(
                        "cell at ({}, {}) claims position {}",
                        row,
                        col,
                        cell.pos()
                    )));
                }
            }
        }
        for door in [self.start_cell, self.finish_cell] {
            if !self.cells.contains(door) {
                return Err(MazeError::InvalidData(format!(
                    "door {} is outside the grid",
                    door
                )));
            }
        }
        Ok(())
    }
}

/// List-friendly summary of a maze, without the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MazeStub {
    pub id: String,
    pub height: usize,
    pub width: usize,
    pub challenge: u8,
    pub name: String,
    pub seed: String,
    pub note: String,
    pub last_updated: DateTime<Utc>,
}

impl From<&Maze> for MazeStub {
    fn from(maze: &Maze) -> Self {
        Self {
            id: maze.id.clone(),
            height: maze.height,
            width: maze.width,
            challenge: maze.challenge,
            name: maze.name.clone(),
            seed: maze.seed.clone(),
            note: maze.note.clone(),
            last_updated: maze.last_updated,
        }
    }
}
