pub mod binary_tree;
pub mod constraints;
pub mod growth;
pub mod types;

use std::{fmt, sync::Arc};

use rand::{seq::SliceRandom as _, thread_rng, Rng as _, SeedableRng as _};
use thiserror::Error;

use crate::{dims::Dims, grid::Grid, registry::Registry};
pub use binary_tree::BinaryTreeAlgorithm;
pub use growth::GrowthAlgorithm;
pub use types::*;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Registry of the maze algorithms.
pub type AlgorithmRegistry = Registry<dyn MazeAlgorithm>;

pub const GROWTH: &str = "growth";
pub const BINARY_TREE: &str = "binary_tree";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid maze size {0:?}, both sides must be at least 5")]
    InvalidSize(Dims),
    #[error("unknown maze algorithm '{0}'")]
    UnknownAlgorithm(String),
}

pub trait MazeAlgorithm: fmt::Debug + Sync + Send {
    /// Builds a complete grid of the given size.
    ///
    /// The size was already validated, so this never fails.
    fn generate(&self, size: Dims, rng: &mut Random, params: &Params) -> Grid;
}

/// Registry with every built-in algorithm, growth being the default.
pub fn default_registry() -> AlgorithmRegistry {
    let growth: Arc<dyn MazeAlgorithm> = Arc::new(GrowthAlgorithm);

    let mut registry = AlgorithmRegistry::with_default(growth.clone());
    registry.register(GROWTH.to_string(), growth);
    registry.register(BINARY_TREE.to_string(), Arc::new(BinaryTreeAlgorithm));
    registry
}

/// Picks one item, the first one when `no_rng` is set.
pub(crate) fn pick<T: Copy>(items: &[T], rng: &mut Random, no_rng: bool) -> Option<T> {
    if no_rng {
        items.first().copied()
    } else {
        items.choose(rng).copied()
    }
}

/// Seeded generator, with a fresh random seed when none is given.
pub fn new_rng(seed: Option<u64>) -> Random {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    log::debug!("using seed {}", seed);
    Random::seed_from_u64(seed)
}

/// Resolves a [`MazeSpec`] against a registry and runs the chosen algorithm.
#[derive(Debug, Clone)]
pub struct Generator {
    algorithm: Arc<dyn MazeAlgorithm>,
    size: Dims,
    seed: Option<u64>,
    params: Params,
}

impl Generator {
    pub fn from_maze_spec(
        spec: &MazeSpec,
        algorithms: &AlgorithmRegistry,
    ) -> Result<Self, GeneratorError> {
        if !spec.is_size_valid() {
            return Err(GeneratorError::InvalidSize(spec.size));
        }

        let algorithm = match &spec.algorithm {
            Some(name) => algorithms.get(name.as_str()),
            None => algorithms.get_default(),
        }
        .ok_or_else(|| {
            GeneratorError::UnknownAlgorithm(spec.algorithm.clone().unwrap_or_default())
        })?;

        Ok(Self {
            algorithm,
            size: spec.size,
            seed: spec.seed,
            params: spec.params.clone(),
        })
    }

    pub fn generate(&self) -> Grid {
        log::debug!(
            "generating {:?} maze of size {:?}",
            self.algorithm,
            self.size
        );

        let mut rng = new_rng(self.seed);

        self.algorithm.generate(self.size, &mut rng, &self.params)
    }
}

/// Generates a maze with the frontier growth algorithm.
pub fn generate_growth_maze(size: Dims, seed: Option<u64>) -> Result<Grid, GeneratorError> {
    let spec = MazeSpec::new(size).seed(seed).algorithm(GROWTH);
    Ok(Generator::from_maze_spec(&spec, &default_registry())?.generate())
}

/// Generates a maze with the binary tree algorithm.
pub fn generate_binary_tree_maze(size: Dims, seed: Option<u64>) -> Result<Grid, GeneratorError> {
    let spec = MazeSpec::new(size).seed(seed).algorithm(BINARY_TREE);
    Ok(Generator::from_maze_spec(&spec, &default_registry())?.generate())
}
