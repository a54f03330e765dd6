//! A single grid unit.
//!
//! Exit bits are only changed through [`crate::grid::Grid`], which keeps
//! both sides of a wall in agreement. Tags, traps, visits and notes are
//! changed directly by the generator, solver, trap placer and gameplay code.

use serde::{Deserialize, Serialize};

use crate::types::{CellTag, Direction, GridCoordinate, Trap};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pos: GridCoordinate,
    exits: Direction,
    tags: CellTag,
    trap: Trap,
    visits: u32,
    last_visit: u32,
    notes: Vec<String>,
}

impl Cell {
    /// A walled-in cell with no tags.
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            pos: GridCoordinate::new(row, col),
            ..Self::default()
        }
    }

    pub fn pos(&self) -> GridCoordinate {
        self.pos
    }

    pub fn exits(&self) -> Direction {
        self.exits
    }

    pub fn tags(&self) -> CellTag {
        self.tags
    }

    pub fn trap(&self) -> Trap {
        self.trap
    }

    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Move number of the most recent visit.
    pub fn last_visit(&self) -> u32 {
        self.last_visit
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn is_open(&self, dir: Direction) -> bool {
        !dir.is_empty() && self.exits.contains(dir)
    }

    pub fn exit_count(&self) -> u32 {
        self.exits.bits().count_ones()
    }

    /// Open exits in N, S, E, W order.
    pub fn open_directions(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|dir| self.exits.contains(*dir))
            .collect()
    }

    pub fn has_tag(&self, tag: CellTag) -> bool {
        self.tags.contains(tag)
    }

    /// Add a tag. Returns `false` if it was already present.
    pub fn add_tag(&mut self, tag: CellTag) -> bool {
        if self.tags.contains(tag) {
            tracing::warn!("Tag {:?} already set on cell {}", tag, self.pos);
            return false;
        }
        self.tags.insert(tag);
        true
    }

    /// Remove a tag. Returns `false` if it was not present.
    pub fn remove_tag(&mut self, tag: CellTag) -> bool {
        if !self.tags.contains(tag) {
            tracing::warn!("Tag {:?} not set on cell {}", tag, self.pos);
            return false;
        }
        self.tags.remove(tag);
        true
    }

    /// Place a trap, replacing whatever was there.
    pub fn set_trap(&mut self, trap: Trap) {
        self.trap = trap;
    }

    pub fn remove_trap(&mut self) -> Trap {
        std::mem::take(&mut self.trap)
    }

    /// Record a visit made on the given move number.
    pub fn add_visit(&mut self, move_number: u32) {
        self.visits += 1;
        self.last_visit = move_number;
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Set one exit bit. Returns `false` if it was already set or `dir`
    /// is not a single direction.
    pub(crate) fn open(&mut self, dir: Direction) -> bool {
        if !dir.is_single() || self.exits.contains(dir) {
            return false;
        }
        self.exits.insert(dir);
        true
    }

    /// Clear one exit bit. Returns `false` if it was not set.
    pub(crate) fn close(&mut self, dir: Direction) -> bool {
        if !dir.is_single() || !self.exits.contains(dir) {
            return false;
        }
        self.exits.remove(dir);
        true
    }
}
