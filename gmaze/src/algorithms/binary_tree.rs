//! Binary tree carving over odd cells, with a repair pass against long dead-end walls.

use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{CellType, Grid, Side, Way},
};

use super::{pick, MazeAlgorithm, Params, Random};

/// Dead-end repair settings.
///
/// Before carving an odd cell, the `len` cells ending two columns to its left in the row above
/// are inspected. When at least `ratio` of them are walls, one odd column in there is opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepairWindow {
    pub len: usize,
    pub ratio: f32,
}

impl Default for RepairWindow {
    fn default() -> Self {
        Self { len: 5, ratio: 1.0 }
    }
}

impl RepairWindow {
    pub fn from_params(params: &Params) -> Self {
        let default = Self::default();
        Self {
            len: params.parsed_or_warn("repair_window", default.len).max(1),
            ratio: params.parsed_or_warn("repair_ratio", default.ratio),
        }
    }

    /// Walls needed inside the window to trigger a repair.
    pub fn threshold(&self) -> usize {
        ((self.len as f32 * self.ratio).ceil() as usize).clamp(1, self.len)
    }
}

/// Binary tree carving over odd rows and columns.
///
/// Every odd cell is opened together with either the cell above it or the next one to the
/// right (left on the last column). Rows are swept top to bottom.
#[derive(Debug)]
pub struct BinaryTree<'r> {
    grid: Grid,
    rng: &'r mut Random,
    no_rng: bool,
    window: RepairWindow,
}

impl<'r> BinaryTree<'r> {
    pub fn new(size: Dims, rng: &'r mut Random, no_rng: bool, window: RepairWindow) -> Self {
        let (mut grid, _) = Grid::create_empty(size);
        grid.place_seed(Side::Top, rng, no_rng);
        grid.place_seed(Side::Bottom, rng, no_rng);

        Self {
            grid,
            rng,
            no_rng,
            window,
        }
    }

    pub fn run(mut self) -> Grid {
        let Dims(w, h) = self.grid.size();

        for row in (1..h - 1).step_by(2) {
            for col in (1..w - 1).step_by(2) {
                self.repair(row, col);
                self.carve(row, col);
            }
        }

        for (seed, side) in [(self.grid.start(), Side::Top), (self.grid.end(), Side::Bottom)] {
            if let Some(seed) = seed {
                self.grid
                    .set_cell(seed + side.inward().offset(), CellType::Path);
            }
        }

        log::debug!(
            "binary tree done: {} paths",
            self.grid.count(CellType::Path)
        );

        self.grid
    }

    fn repair(&mut self, row: i32, col: i32) {
        let len = self.window.len as i32;
        if row - 1 == 0 || col <= len {
            return;
        }

        let window = (col - len - 1)..(col - 1);
        let walls = window
            .clone()
            .filter(|&c| self.grid.get(Dims::at(row - 1, c)) == Some(CellType::Wall))
            .count();

        if walls < self.window.threshold() {
            return;
        }

        let odd: SmallVec<[i32; 8]> = window.filter(|c| c % 2 != 0).collect();
        if let Some(c) = pick(&odd, self.rng, self.no_rng) {
            log::trace!("repairing wall run above row {} at column {}", row, c);
            self.grid.set_cell(Dims::at(row - 1, c), CellType::Path);
        }
    }

    fn carve(&mut self, row: i32, col: i32) {
        let pos = Dims::at(row, col);

        let mut ways: SmallVec<[Way; 2]> = SmallVec::new();
        if row - 1 > 0 {
            ways.push(Way::Top);
        }
        if col + 1 < self.grid.width() - 1 {
            ways.push(Way::Right);
        } else {
            ways.push(Way::Right.reverse());
        }

        self.grid.set_cell(pos, CellType::Path);
        if let Some(way) = pick(&ways, self.rng, self.no_rng) {
            self.grid.set_cell(pos + way.offset(), CellType::Path);
        }
    }
}

#[derive(Debug)]
pub struct BinaryTreeAlgorithm;

impl MazeAlgorithm for BinaryTreeAlgorithm {
    fn generate(&self, size: Dims, rng: &mut Random, params: &Params) -> Grid {
        let no_rng = params.parsed_or_warn("no_rng", false);
        BinaryTree::new(size, rng, no_rng, RepairWindow::from_params(params)).run()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::checks::{check_border, has_open_square};

    fn show(grid: &Grid) -> Vec<String> {
        grid.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        CellType::Wall => '#',
                        CellType::Start => 'S',
                        CellType::End => 'E',
                        CellType::Path => '.',
                        CellType::Empty => ' ',
                    })
                    .collect()
            })
            .collect()
    }

    fn tree(size: Dims, seed: u64, no_rng: bool) -> Grid {
        let mut rng = Random::seed_from_u64(seed);
        BinaryTree::new(size, &mut rng, no_rng, RepairWindow::default()).run()
    }

    #[test]
    fn smallest_grid_without_rng() {
        assert_eq!(
            show(&tree(Dims(5, 5), 0, true)),
            ["#S###", "#...#", "#.#.#", "#.#.#", "#E###"]
        );
    }

    #[test]
    fn without_rng_is_deterministic() {
        for size in [Dims(17, 13), Dims(31, 21), Dims(6, 8)] {
            assert_eq!(tree(size, 1, true), tree(size, 2, true));
        }
    }

    #[test]
    fn seeded_is_deterministic() {
        assert_eq!(tree(Dims(17, 13), 8, false), tree(Dims(17, 13), 8, false));
    }

    #[test]
    fn structure() {
        for seed in 0..30 {
            for size in [Dims(17, 13), Dims(5, 5), Dims(25, 9)] {
                let grid = tree(size, seed, false);
                check_border(&grid);
                assert!(!has_open_square(&grid), "seed {} size {:?}", seed, size);

                for row in (1..size.1 - 1).step_by(2) {
                    for col in (1..size.0 - 1).step_by(2) {
                        assert_eq!(grid.get(Dims::at(row, col)), Some(CellType::Path));
                    }
                }

                let start = grid.start().unwrap();
                let end = grid.end().unwrap();
                assert!(grid.is_open(start + Way::Bottom.offset()));
                assert!(grid.is_open(end + Way::Top.offset()));
            }
        }
    }

    #[test]
    fn even_sizes_keep_border() {
        for seed in 0..10 {
            check_border(&tree(Dims(8, 6), seed, false));
            check_border(&tree(Dims(10, 5), seed, false));
        }
    }

    #[test]
    fn repair_opens_wall_runs() {
        let mut rng = Random::seed_from_u64(0);
        let mut tree = BinaryTree::new(Dims(17, 13), &mut rng, true, RepairWindow::default());

        tree.repair(3, 7);
        assert_eq!(tree.grid.get(Dims::at(2, 1)), Some(CellType::Path));

        tree.repair(3, 9);
        assert_eq!(tree.grid.get(Dims::at(2, 3)), Some(CellType::Path));

        // window 3..=7 now holds a path, not enough walls left
        tree.repair(3, 9);
        assert_eq!(tree.grid.count(CellType::Path), 2);

        // nothing happens next to the top border or close to the left edge
        tree.repair(1, 9);
        tree.repair(3, 5);
        assert_eq!(tree.grid.count(CellType::Path), 2);
    }

    #[test]
    fn repair_threshold() {
        let window = |len, ratio| RepairWindow { len, ratio }.threshold();
        assert_eq!(window(5, 1.0), 5);
        assert_eq!(window(5, 0.6), 3);
        assert_eq!(window(5, 0.0), 1);
        assert_eq!(window(5, 3.0), 5);
    }

    #[test]
    fn window_from_params() {
        let params = Params::new()
            .with("repair_window", 7)
            .with("repair_ratio", 0.5);
        assert_eq!(
            RepairWindow::from_params(&params),
            RepairWindow { len: 7, ratio: 0.5 }
        );
        assert_eq!(
            RepairWindow::from_params(&Params::new()),
            RepairWindow::default()
        );
    }
}
