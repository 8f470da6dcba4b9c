pub mod cell;

pub use cell::{CellType, Side, Way};

use hashbrown::HashSet;
use rand::Rng;

use crate::{array::Array2D, dims::Dims};

/// Smallest supported width and height.
pub const MIN_SIDE: i32 = 5;

/// Character-cell grid of a maze, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2D<CellType>,
    start: Option<Dims>,
    end: Option<Dims>,
}

impl Grid {
    /// Allocates a grid filled with walls.
    ///
    /// Also returns every border position, row by row, which is what the wall ledger starts
    /// with.
    pub fn create_empty(size: Dims) -> (Grid, Vec<Dims>) {
        let cells = Array2D::new_dims(CellType::Wall, size)
            .unwrap_or_else(|| panic!("Invalid grid size: {:?}", size));

        let grid = Grid {
            cells,
            start: None,
            end: None,
        };

        let border = Dims::iter_fill(Dims::ZERO, size)
            .filter(|&pos| grid.is_border(pos))
            .collect();

        (grid, border)
    }

    pub fn size(&self) -> Dims {
        self.cells.size()
    }

    pub fn width(&self) -> i32 {
        self.size().0
    }

    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn is_border(&self, pos: Dims) -> bool {
        let Dims(w, h) = self.size();
        self.is_in_bounds(pos) && (pos.0 == 0 || pos.1 == 0 || pos.0 == w - 1 || pos.1 == h - 1)
    }

    pub fn get(&self, pos: Dims) -> Option<CellType> {
        self.cells.get(pos).copied()
    }

    pub fn is_open(&self, pos: Dims) -> bool {
        self.get(pos).is_some_and(CellType::is_open)
    }

    /// Writes a cell. Out-of-bounds positions are a caller bug and panic.
    pub fn set_cell(&mut self, pos: Dims, cell: CellType) {
        assert!(
            self.is_in_bounds(pos),
            "cell {:?} is outside of grid {:?}",
            pos,
            self.size()
        );
        self.cells[pos] = cell;
    }

    /// Picks a column in `1..=width - 2` on the given border row and marks it as start/end.
    ///
    /// With `no_rng` the leftmost interior column is used.
    pub fn place_seed(&mut self, side: Side, rng: &mut impl Rng, no_rng: bool) -> Dims {
        let Dims(w, h) = self.size();
        let col = if no_rng { 1 } else { rng.gen_range(1..w - 1) };
        let row = match side {
            Side::Top => 0,
            Side::Bottom => h - 1,
        };

        let pos = Dims::at(row, col);
        self.set_cell(pos, side.seed_cell());
        match side {
            Side::Top => self.start = Some(pos),
            Side::Bottom => self.end = Some(pos),
        }

        pos
    }

    pub fn start(&self) -> Option<Dims> {
        self.start
    }

    pub fn end(&self) -> Option<Dims> {
        self.end
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> {
        self.cells.rows()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Dims> + '_ {
        self.cells.iter_pos()
    }

    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Whether the end can be reached from the start by walking over open cells.
    pub fn start_reaches_end(&self) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };

        let mut visited = HashSet::new();
        let mut stack = vec![start];
        visited.insert(start);

        while let Some(pos) = stack.pop() {
            if pos == end {
                return true;
            }

            for way in Way::get_in_order() {
                let next = pos + way.offset();
                if self.is_open(next) && visited.insert(next) {
                    stack.push(next);
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::Random;

    #[test]
    fn empty_grid_border() {
        let (grid, border) = Grid::create_empty(Dims(17, 13));

        assert_eq!(grid.count(CellType::Wall), 17 * 13);
        assert_eq!(border.len(), 2 * 17 + 2 * 11);
        assert!(border.iter().all(|&pos| grid.is_border(pos)));
        assert!(!grid.is_border(Dims(1, 1)));
        assert!(!grid.is_border(Dims(-1, 0)));
    }

    #[test]
    fn seeds_on_border_rows() {
        let mut rng = Random::seed_from_u64(7);
        for _ in 0..50 {
            let (mut grid, _) = Grid::create_empty(Dims(5, 5));
            let start = grid.place_seed(Side::Top, &mut rng, false);
            let end = grid.place_seed(Side::Bottom, &mut rng, false);

            assert_eq!(start.row(), 0);
            assert_eq!(end.row(), 4);
            assert!((1..=3).contains(&start.col()));
            assert!((1..=3).contains(&end.col()));
            assert_eq!(grid.get(start), Some(CellType::Start));
            assert_eq!(grid.get(end), Some(CellType::End));
            assert_eq!(grid.start(), Some(start));
            assert_eq!(grid.end(), Some(end));
        }
    }

    #[test]
    fn seed_without_rng_is_leftmost() {
        let mut rng = Random::seed_from_u64(0);
        let (mut grid, _) = Grid::create_empty(Dims(9, 7));
        assert_eq!(grid.place_seed(Side::Top, &mut rng, true), Dims::at(0, 1));
        assert_eq!(grid.place_seed(Side::Bottom, &mut rng, true), Dims::at(6, 1));
    }

    #[test]
    #[should_panic]
    fn set_cell_out_of_bounds() {
        let (mut grid, _) = Grid::create_empty(Dims(5, 5));
        grid.set_cell(Dims(5, 0), CellType::Path);
    }

    #[test]
    fn reachability() {
        let mut rng = Random::seed_from_u64(0);
        let (mut grid, _) = Grid::create_empty(Dims(5, 5));
        let start = grid.place_seed(Side::Top, &mut rng, true);
        grid.place_seed(Side::Bottom, &mut rng, true);
        assert!(!grid.start_reaches_end());

        for row in 1..4 {
            grid.set_cell(Dims::at(row, start.col()), CellType::Path);
        }
        assert!(grid.start_reaches_end());
    }
}
