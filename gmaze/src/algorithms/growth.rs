//! Frontier growth: pathfinders spread out from the start and the end at the same time.
//!
//! Every step the pathfinders are grouped by cell. Each group proposes the four orthogonal
//! moves, drops the ones that are out of bounds, already decided, or rejected by
//! [`Constraints`], and then up to [`MAX_BRANCHES`] of its pathfinders advance onto randomly
//! chosen moves. A pathfinder that advances forks on its new cell, so the next step may
//! branch from there. Moves nobody took become walls. Groups with no legal move die out.

use hashbrown::{hash_map::Entry, HashMap, HashSet};
use smallvec::SmallVec;

use crate::{
    dims::Dims,
    grid::{Grid, Way},
    ledger::Ledger,
};

use super::{constraints::Constraints, pick, MazeAlgorithm, Params, Random};

/// How many pathfinders may leave one cell in a single step.
pub const MAX_BRANCHES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pathfinder {
    pos: Dims,
}

impl Pathfinder {
    pub fn new(pos: Dims) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> Dims {
        self.pos
    }

    fn moved_to(self, pos: Dims) -> Self {
        Self { pos }
    }

    fn fork(&self) -> Self {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthState {
    Running,
    Done,
}

/// Step-by-step run of the growth algorithm over one fresh grid.
#[derive(Debug)]
pub struct Growth<'r> {
    ledger: Ledger,
    pathfinders: Vec<Pathfinder>,
    rng: &'r mut Random,
    no_rng: bool,
    steps: usize,
}

impl<'r> Growth<'r> {
    pub fn new(size: Dims, rng: &'r mut Random, no_rng: bool) -> Self {
        let ledger = Ledger::new(size, rng, no_rng);
        let pathfinders = vec![
            Pathfinder::new(ledger.start()),
            Pathfinder::new(ledger.end()),
        ];

        Self {
            ledger,
            pathfinders,
            rng,
            no_rng,
            steps: 0,
        }
    }

    pub fn state(&self) -> GrowthState {
        if self.pathfinders.is_empty() {
            GrowthState::Done
        } else {
            GrowthState::Running
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn grid(&self) -> &Grid {
        self.ledger.grid()
    }

    pub fn pathfinders(&self) -> &[Pathfinder] {
        &self.pathfinders
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Moves every pathfinder once.
    pub fn step(&mut self) -> GrowthState {
        if self.state() == GrowthState::Done {
            return GrowthState::Done;
        }

        self.steps += 1;

        let groups = group_by_position(&self.pathfinders);
        let occupied: HashSet<Dims> = groups.iter().map(|&(pos, _)| pos).collect();

        let mut next = Vec::with_capacity(self.pathfinders.len());
        for (pos, count) in groups {
            self.advance_group(pos, count, &occupied, &mut next);
        }

        log::trace!(
            "step {}: {} -> {} pathfinders, {} carved",
            self.steps,
            self.pathfinders.len(),
            next.len(),
            self.ledger.carved().len()
        );

        self.pathfinders = next;
        self.state()
    }

    /// Steps until every pathfinder is gone and returns the finished grid.
    pub fn run(mut self) -> Grid {
        while self.step() == GrowthState::Running {}

        log::debug!(
            "growth done after {} steps: {} carved, {} walls",
            self.steps,
            self.ledger.carved().len(),
            self.ledger.walls().len()
        );

        self.ledger.into_grid()
    }

    fn advance_group(
        &mut self,
        pos: Dims,
        count: usize,
        occupied: &HashSet<Dims>,
        next: &mut Vec<Pathfinder>,
    ) {
        let grid = self.ledger.grid();
        let mut moves: SmallVec<[Dims; 4]> = Way::get_in_order()
            .into_iter()
            .map(|way| pos + way.offset())
            .filter(|&m| grid.is_in_bounds(m) && self.ledger.is_undecided(m))
            .collect();

        let allowed: SmallVec<[Dims; 4]> = {
            let constraints = Constraints::new(&self.ledger, occupied);
            moves.iter().copied().filter(|&m| constraints.allows(m)).collect()
        };

        // dead end, the whole group dies
        if allowed.is_empty() {
            return;
        }

        let pathfinder = Pathfinder::new(pos);
        for _ in 0..count.min(MAX_BRANCHES) {
            let Some(target) = pick(&allowed, self.rng, self.no_rng) else {
                break;
            };

            // Both pathfinders may draw the same move, only the first one gets it.
            if self.ledger.is_carved(target) {
                continue;
            }

            // The first pathfinder of the group may have changed the neighborhood.
            if !Constraints::new(&self.ledger, occupied).allows(target) {
                continue;
            }

            self.ledger.record_path(target);
            moves.retain(|m| *m != target);

            let moved = pathfinder.moved_to(target);
            next.push(moved);
            next.push(moved.fork());
        }

        self.ledger.record_walls(moves);
    }
}

/// Groups pathfinders sharing a cell, in order of first appearance.
fn group_by_position(pathfinders: &[Pathfinder]) -> Vec<(Dims, usize)> {
    let mut index: HashMap<Dims, usize> = HashMap::new();
    let mut groups: Vec<(Dims, usize)> = Vec::new();

    for pathfinder in pathfinders {
        match index.entry(pathfinder.pos) {
            Entry::Occupied(entry) => groups[*entry.get()].1 += 1,
            Entry::Vacant(entry) => {
                entry.insert(groups.len());
                groups.push((pathfinder.pos, 1));
            }
        }
    }

    groups
}

#[derive(Debug)]
pub struct GrowthAlgorithm;

impl MazeAlgorithm for GrowthAlgorithm {
    fn generate(&self, size: Dims, rng: &mut Random, params: &Params) -> Grid {
        let no_rng = params.parsed_or_warn("no_rng", false);
        Growth::new(size, rng, no_rng).run()
    }
}
