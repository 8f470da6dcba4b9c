//! Record of every decision taken while carving.
//!
//! The ledger keeps the carved and walled positions in the order they were committed, each
//! mirrored in a hash set for membership tests. The [`Grid`] it owns is only a rendering of
//! that record.

use hashbrown::HashSet;
use rand::Rng;

use crate::{
    dims::Dims,
    grid::{CellType, Grid, Side},
};

#[derive(Debug, Clone)]
pub struct Ledger {
    grid: Grid,
    carved: Vec<Dims>,
    carved_lookup: HashSet<Dims>,
    walls: Vec<Dims>,
    wall_lookup: HashSet<Dims>,
    start: Dims,
    end: Dims,
}

impl Ledger {
    /// Fresh wall-filled grid with start and end placed and every border cell walled.
    pub fn new(size: Dims, rng: &mut impl Rng, no_rng: bool) -> Self {
        let (mut grid, border) = Grid::create_empty(size);
        let start = grid.place_seed(Side::Top, rng, no_rng);
        let end = grid.place_seed(Side::Bottom, rng, no_rng);

        let wall_lookup = border.iter().copied().collect();

        Self {
            grid,
            carved: Vec::new(),
            carved_lookup: HashSet::new(),
            walls: border,
            wall_lookup,
            start,
            end,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn start(&self) -> Dims {
        self.start
    }

    pub fn end(&self) -> Dims {
        self.end
    }

    pub fn is_seed(&self, pos: Dims) -> bool {
        pos == self.start || pos == self.end
    }

    pub fn is_carved(&self, pos: Dims) -> bool {
        self.carved_lookup.contains(&pos)
    }

    pub fn is_wall(&self, pos: Dims) -> bool {
        self.wall_lookup.contains(&pos)
    }

    /// Neither carved nor walled yet.
    pub fn is_undecided(&self, pos: Dims) -> bool {
        !self.is_carved(pos) && !self.is_wall(pos)
    }

    /// Carved positions in commit order.
    pub fn carved(&self) -> &[Dims] {
        &self.carved
    }

    /// Walled positions in commit order, border first.
    pub fn walls(&self) -> &[Dims] {
        &self.walls
    }

    /// Commits `pos` as a path.
    ///
    /// Returns `false` without touching anything when `pos` is a seed or already carved.
    pub fn record_path(&mut self, pos: Dims) -> bool {
        if self.is_seed(pos) || self.is_carved(pos) {
            return false;
        }

        assert!(
            !self.is_wall(pos),
            "cannot carve {:?}, it is already a wall",
            pos
        );

        self.grid.set_cell(pos, CellType::Path);
        self.carved_lookup.insert(pos);
        self.carved.push(pos);
        true
    }

    /// Commits every position that is not carved as a wall.
    pub fn record_walls(&mut self, positions: impl IntoIterator<Item = Dims>) {
        for pos in positions {
            if self.is_carved(pos) || !self.wall_lookup.insert(pos) {
                continue;
            }

            self.grid.set_cell(pos, CellType::Wall);
            self.walls.push(pos);
        }
    }

    /// Whether the carved and walled records share no position.
    pub fn is_disjoint(&self) -> bool {
        self.carved_lookup.is_disjoint(&self.wall_lookup)
    }
}
