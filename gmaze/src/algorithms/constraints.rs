//! Local rules a cell has to pass before the growth engine may carve it.

use hashbrown::HashSet;

use crate::{dims::Dims, grid::Way, ledger::Ledger};

/// Read-only view over the ledger and the cells occupied by pathfinders in the current step.
#[derive(Debug, Clone, Copy)]
pub struct Constraints<'a> {
    ledger: &'a Ledger,
    occupied: &'a HashSet<Dims>,
}

impl<'a> Constraints<'a> {
    pub fn new(ledger: &'a Ledger, occupied: &'a HashSet<Dims>) -> Self {
        Self { ledger, occupied }
    }

    /// Candidate passes all three rules.
    pub fn allows(&self, pos: Dims) -> bool {
        self.is_no_empty_square(pos) && self.is_no_cut_corners(pos) && self.is_no_lonely_walls(pos)
    }

    /// Carving `pos` must not open up a 2x2 block.
    pub fn is_no_empty_square(&self, pos: Dims) -> bool {
        squares(pos).into_iter().all(|square| {
            square
                .iter()
                .filter(|&&cell| self.ledger.is_carved(cell) || self.occupied.contains(&cell))
                .count()
                < 3
        })
    }

    /// Two paths may only touch diagonally when one of the cells between them is a path too.
    pub fn is_no_cut_corners(&self, pos: Dims) -> bool {
        squares(pos).into_iter().all(|[side_a, diagonal, side_b]| {
            self.ledger.is_carved(side_a)
                || self.ledger.is_carved(side_b)
                || !self.ledger.is_carved(diagonal)
        })
    }

    /// Carving `pos` must not leave a single wall cell with paths on all of its sides.
    ///
    /// Cells that are still undecided count as walls, since that's what they end up as.
    pub fn is_no_lonely_walls(&self, pos: Dims) -> bool {
        Way::get_in_order().into_iter().all(|way| {
            let wall = pos + way.offset();
            let far = wall + way.offset();
            let [diag_a, diag_b] = way.perpendicular_ways().map(|perp| wall + perp.offset());

            self.ledger.is_carved(wall)
                || !(self.ledger.is_carved(far)
                    && self.ledger.is_carved(diag_a)
                    && self.ledger.is_carved(diag_b))
        })
    }
}

/// The four 2x2 squares with `pos` in a corner.
///
/// Each square is `[vertical neighbor, diagonal, horizontal neighbor]`.
fn squares(pos: Dims) -> [[Dims; 3]; 4] {
    let corner = |vertical: Way, horizontal: Way| {
        let v = vertical.offset();
        let h = horizontal.offset();
        [pos + v, pos + v + h, pos + h]
    };

    [
        corner(Way::Top, Way::Left),
        corner(Way::Top, Way::Right),
        corner(Way::Bottom, Way::Left),
        corner(Way::Bottom, Way::Right),
    ]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;

    use super::*;
    use crate::algorithms::Random;

    fn ledger(carved: &[(i32, i32)]) -> Ledger {
        let mut ledger = Ledger::new(Dims(9, 9), &mut Random::seed_from_u64(0), true);
        for &(row, col) in carved {
            assert!(ledger.record_path(Dims::at(row, col)));
        }
        ledger
    }

    #[test]
    fn square_rejected_when_three_corners_open() {
        let ledger = ledger(&[(3, 3), (3, 4), (4, 3)]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        assert!(!constraints.is_no_empty_square(Dims::at(4, 4)));
        assert!(constraints.is_no_empty_square(Dims::at(5, 5)));
    }

    #[test]
    fn square_counts_pathfinders() {
        let ledger = ledger(&[(3, 3), (3, 4)]);
        let occupied = [Dims::at(4, 3)].into_iter().collect();
        let constraints = Constraints::new(&ledger, &occupied);

        assert!(!constraints.is_no_empty_square(Dims::at(4, 4)));

        let none = HashSet::new();
        assert!(Constraints::new(&ledger, &none).is_no_empty_square(Dims::at(4, 4)));
    }

    #[test]
    fn cut_corner_rejected() {
        let ledger = ledger(&[(3, 3)]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        // only touches (3, 3) across a corner
        assert!(!constraints.is_no_cut_corners(Dims::at(4, 4)));
        // orthogonal neighbor, fine
        assert!(constraints.is_no_cut_corners(Dims::at(3, 4)));
    }

    #[test]
    fn corner_with_connecting_side_is_fine() {
        let ledger = ledger(&[(3, 3), (3, 4)]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        assert!(constraints.is_no_cut_corners(Dims::at(4, 4)));
    }

    #[test]
    fn lonely_wall_rejected() {
        // wall at (4, 4) surrounded on three sides, candidate closes the fourth
        let ledger = ledger(&[(3, 3), (3, 4), (3, 5), (4, 5), (5, 5), (5, 4)]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        assert!(!constraints.is_no_lonely_walls(Dims::at(4, 3)));
        assert!(!constraints.allows(Dims::at(4, 3)));
    }

    #[test]
    fn carved_neighbor_is_not_a_lonely_wall() {
        let ledger = ledger(&[(3, 4), (4, 5), (5, 4), (4, 4)]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        assert!(constraints.is_no_lonely_walls(Dims::at(4, 3)));
    }

    #[test]
    fn fresh_interior_is_allowed() {
        let ledger = ledger(&[]);
        let none = HashSet::new();
        let constraints = Constraints::new(&ledger, &none);

        for pos in Dims::iter_fill(Dims::ONE, Dims(8, 8)) {
            assert!(constraints.allows(pos));
        }
    }
}
