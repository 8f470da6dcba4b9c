use std::{
    fmt,
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use colored::{ColoredString, Colorize as _};
use log::{Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    let level = log::Level::Warn;

    LOGGER.get_or_init(|| AppLogger::new(level))
}

/// Installs the stderr logger with the given minimum level.
pub fn init(level: log::Level) -> Result<(), log::SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(level);

    log::set_logger(logger)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// `-v` count to level, starting at warnings.
pub fn level_from_verbosity(verbose: u8) -> log::Level {
    match verbose {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub level: log::Level,
    pub message: String,
    pub source: String,
}

impl Message {
    fn indicator(&self) -> ColoredString {
        let name = format!("{:<5}", self.level);
        match self.level {
            log::Level::Error => name.red(),
            log::Level::Warn => name.yellow(),
            log::Level::Info => name.white(),
            log::Level::Debug => name.blue(),
            log::Level::Trace => name.dimmed(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {}",
            self.indicator(),
            self.source.dimmed(),
            self.message
        )
    }
}

pub struct AppLogger {
    min_level: RwLock<log::Level>,
}

impl AppLogger {
    fn new(min_level: log::Level) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> log::Level {
        *self
            .min_level
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_min_level(&self, level: log::Level) {
        *self
            .min_level
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = level;
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = Message {
                level: record.level(),
                message: record.args().to_string(),
                source: record.module_path().unwrap_or("unknown").to_string(),
            };

            // nowhere to report a failing stderr
            let _ = writeln!(io::stderr().lock(), "{}", message);
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_verbosity(0), log::Level::Warn);
        assert_eq!(level_from_verbosity(1), log::Level::Info);
        assert_eq!(level_from_verbosity(2), log::Level::Debug);
        assert_eq!(level_from_verbosity(7), log::Level::Trace);
    }

    #[test]
    fn message_format() {
        colored::control::set_override(false);

        let message = Message {
            level: log::Level::Warn,
            message: "start and end are not connected".to_string(),
            source: "growmaze".to_string(),
        };

        assert_eq!(
            message.to_string(),
            "WARN  growmaze -> start and end are not connected"
        );
    }

    #[test]
    fn level_filter() {
        let logger = AppLogger::new(log::Level::Info);
        let debug = Metadata::builder().level(log::Level::Debug).build();
        let warn = Metadata::builder().level(log::Level::Warn).build();

        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));

        logger.set_min_level(log::Level::Trace);
        assert!(logger.enabled(&debug));
    }
}
