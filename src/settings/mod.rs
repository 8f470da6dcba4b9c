use std::{
    fs,
    path::{Path, PathBuf},
};

use gmaze::{
    algorithms::{Params, BINARY_TREE, GROWTH},
    Dims,
};
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

use crate::{constants::base_path, render::SymbolTable, AppError};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum MazeGenAlgo {
    #[default]
    Growth,
    BinaryTree,
}

impl MazeGenAlgo {
    /// Name the algorithm is registered under in the generator registry.
    pub fn registry_name(&self) -> &'static str {
        match self {
            MazeGenAlgo::Growth => GROWTH,
            MazeGenAlgo::BinaryTree => BINARY_TREE,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rows: Option<i32>,
    #[serde(default)]
    pub cols: Option<i32>,
    #[serde(default)]
    pub algorithm: Option<MazeGenAlgo>,
    #[serde(default)]
    pub symbols: Option<SymbolTable>,
    #[serde(default)]
    pub repair_window: Option<usize>,
    #[serde(default)]
    pub repair_ratio: Option<f32>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_rows(&self) -> i32 {
        self.rows.unwrap_or(13)
    }

    pub fn get_cols(&self) -> i32 {
        self.cols.unwrap_or(17)
    }

    pub fn get_size(&self) -> Dims {
        Dims(self.get_cols(), self.get_rows())
    }

    pub fn get_algorithm(&self) -> MazeGenAlgo {
        self.algorithm.unwrap_or_default()
    }

    pub fn get_symbols(&self) -> SymbolTable {
        self.symbols.unwrap_or_default()
    }

    /// Algorithm parameters carried by the settings file.
    pub fn params(&self) -> Params {
        let mut params = Params::new();
        if let Some(len) = self.repair_window {
            params.set("repair_window", len);
        }
        if let Some(ratio) = self.repair_ratio {
            params.set("repair_ratio", ratio);
        }
        params
    }

    pub fn default_path() -> PathBuf {
        base_path().join("settings.ron")
    }

    /// Reads the settings, writing the bundled defaults first if the file doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            log::info!("creating default settings at {:?}", path);
            Self::reset_config(path)?;
        }

        let settings_string = fs::read_to_string(path)?;
        Self::parse(&settings_string).map_err(|source| AppError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn reset_config(path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }

    fn parse(settings_string: &str) -> Result<Self, ron::error::SpannedError> {
        ron::Options::default()
            .with_default_extension(Extensions::IMPLICIT_SOME)
            .from_str(settings_string)
    }
}
