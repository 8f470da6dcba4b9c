use serde::{Deserialize, Serialize};

use crate::dims::Dims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Wall,
    Start,
    End,
    Path,
    Empty,
}

impl CellType {
    /// Whether the cell can be walked through: path or one of the seeds.
    pub fn is_open(self) -> bool {
        matches!(self, CellType::Path | CellType::Start | CellType::End)
    }
}

/// Orthogonal step on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Way {
    Left,
    Top,
    Right,
    Bottom,
}

impl Way {
    /// Move proposal order used by the generators.
    pub fn get_in_order() -> [Way; 4] {
        [Way::Left, Way::Top, Way::Right, Way::Bottom]
    }

    pub fn offset(self) -> Dims {
        match self {
            Way::Left => Dims(-1, 0),
            Way::Top => Dims(0, -1),
            Way::Right => Dims(1, 0),
            Way::Bottom => Dims(0, 1),
        }
    }

    pub fn reverse(self) -> Way {
        match self {
            Way::Left => Way::Right,
            Way::Top => Way::Bottom,
            Way::Right => Way::Left,
            Way::Bottom => Way::Top,
        }
    }

    /// The two ways at a right angle to this one.
    pub fn perpendicular_ways(self) -> [Way; 2] {
        match self {
            Way::Left | Way::Right => [Way::Top, Way::Bottom],
            Way::Top | Way::Bottom => [Way::Left, Way::Right],
        }
    }
}

/// Border row a seed is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    pub fn seed_cell(self) -> CellType {
        match self {
            Side::Top => CellType::Start,
            Side::Bottom => CellType::End,
        }
    }

    /// Way pointing from the seed into the grid interior.
    pub fn inward(self) -> Way {
        match self {
            Side::Top => Way::Bottom,
            Side::Bottom => Way::Top,
        }
    }
}
