use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::{dims::Dims, grid::MIN_SIDE};

use super::AlgorithmRegistry;

/// Parameters for the generators.
/// Values are kept as strings and parsed by the generator that reads them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    map: HashMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.map.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.get(key).map(|s| s.parse())
    }

    pub fn parsed_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None | Some(Err(_)) => default,
            Some(Ok(v)) => v,
        }
    }

    pub fn parsed_or_warn<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.parsed(key) {
            None => default,
            Some(Ok(v)) => v,
            Some(Err(_)) => {
                log::warn!("Invalid value for parameter '{}', using default value", key);
                default
            }
        }
    }
}

/// Everything needed to generate one maze.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MazeSpec {
    /// Grid size, `Dims(columns, rows)`.
    pub size: Dims,

    /// Seed of the maze.
    ///
    /// Used for deterministic generation.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Name of a registered algorithm, the registry default when missing.
    #[serde(default)]
    pub algorithm: Option<String>,

    #[serde(default)]
    pub params: Params,
}

impl MazeSpec {
    pub fn new(size: Dims) -> Self {
        Self {
            size,
            seed: None,
            algorithm: None,
            params: Params::default(),
        }
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn algorithm(mut self, name: &str) -> Self {
        self.algorithm = Some(name.to_string());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn is_size_valid(&self) -> bool {
        self.size.0 >= MIN_SIDE && self.size.1 >= MIN_SIDE
    }

    pub fn validate(&self, algorithms: &AlgorithmRegistry) -> bool {
        if !self.is_size_valid() {
            return false;
        }

        match &self.algorithm {
            Some(name) => algorithms.get(name.as_str()).is_some(),
            None => algorithms.get_default().is_some(),
        }
    }
}
