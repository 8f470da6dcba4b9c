use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Position or size on the grid.
///
/// `.0` is the column (x), `.1` is the row (y). Sizes use the same layout, so a 13 rows by
/// 17 columns grid has size `Dims(17, 13)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    /// Builds a position from the `(row, col)` order used when talking about grids.
    pub const fn at(row: i32, col: i32) -> Dims {
        Dims(col, row)
    }

    pub const fn row(self) -> i32 {
        self.1
    }

    pub const fn col(self) -> i32 {
        self.0
    }

    /// Iterates all positions in `from..to`, row by row.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn product(self) -> i32 {
        self.0 * self.1
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}
