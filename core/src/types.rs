//! Value types shared by every part of the engine: grid coordinates, the
//! direction and tag flag sets, and the closed set of trap kinds.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr};

/// A (row, col) position in a grid.
///
/// Signed so that callers can ask about positions one step outside the grid
/// and get an `OutOfBounds` error back instead of an underflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoordinate {
    pub row: i32,
    pub col: i32,
}

impl GridCoordinate {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

bitflags! {
    /// Exits of a cell, one bit per direction.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Direction: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
    }
}

impl Direction {
    /// The four single directions in the fixed order used by the solver.
    pub const ALL: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];

    /// True when exactly one direction bit is set.
    pub fn is_single(self) -> bool {
        self.bits().count_ones() == 1
    }

    /// The direction on the other side of a shared wall.
    ///
    /// Only meaningful for single directions; combined sets map to empty.
    pub fn opposite(self) -> Direction {
        if self == Direction::NORTH {
            Direction::SOUTH
        } else if self == Direction::SOUTH {
            Direction::NORTH
        } else if self == Direction::EAST {
            Direction::WEST
        } else if self == Direction::WEST {
            Direction::EAST
        } else {
            Direction::empty()
        }
    }

    /// The coordinate one step away in this direction. No bounds check.
    pub fn step(self, from: GridCoordinate) -> GridCoordinate {
        let (dr, dc) = self.offset();
        GridCoordinate::new(from.row + dr, from.col + dc)
    }

    /// Row and column deltas of a single direction, (0, 0) otherwise.
    pub fn offset(self) -> (i32, i32) {
        if self == Direction::NORTH {
            (-1, 0)
        } else if self == Direction::SOUTH {
            (1, 0)
        } else if self == Direction::EAST {
            (0, 1)
        } else if self == Direction::WEST {
            (0, -1)
        } else {
            (0, 0)
        }
    }

    pub fn name(self) -> &'static str {
        if self == Direction::NORTH {
            "NORTH"
        } else if self == Direction::SOUTH {
            "SOUTH"
        } else if self == Direction::EAST {
            "EAST"
        } else if self == Direction::WEST {
            "WEST"
        } else {
            "NONE"
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Flag sets are stored as their raw bits
impl Serialize for Direction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Direction::from_bits_truncate(bits))
    }
}

bitflags! {
    /// Role markers on a cell. A cell may carry several at once.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct CellTag: u8 {
        const START = 0x01;
        const FINISH = 0x02;
        const PATH = 0x04;
        const CARVED = 0x08;
        const LAVA = 0x10;
    }
}

impl Serialize for CellTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellTag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(CellTag::from_bits_truncate(bits))
    }
}

/// The trap occupying a cell. At most one per cell.
///
/// Discriminants are contiguous from zero: the trap placer draws an index in
/// `0..Trap::COUNT` and index 0 means "no trap".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
    FromRepr,
)]
#[repr(u8)]
pub enum Trap {
    #[default]
    None = 0,
    Pit,
    BearTrap,
    TarPit,
    FlameThrower,
}

impl Trap {
    pub fn is_none(self) -> bool {
        self == Trap::None
    }
}
