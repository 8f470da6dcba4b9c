pub mod algorithms;
pub mod array;
pub mod dims;
pub mod grid;
pub mod ledger;
pub mod registry;

pub use algorithms::{generate_binary_tree_maze, generate_growth_maze, GeneratorError};
pub use dims::Dims;
pub use grid::{CellType, Grid};
