pub mod constants;
pub mod logging;
pub mod render;
pub mod settings;

use std::{io, path::PathBuf};

use gmaze::GeneratorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Error reading settings file ({path:?}), {source}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
