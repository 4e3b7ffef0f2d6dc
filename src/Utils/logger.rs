// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! tiny module to install the terminal (and optionally file) logger
use log::{LevelFilter, info};
use simplelog::*;
use std::fmt;
use std::fs::File;
use std::path::Path;

#[derive(Debug)]
pub enum LoggerError {
    /// the log file could not be created
    Io(std::io::Error),
    /// a global logger is already installed
    AlreadySet(log::SetLoggerError),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "Cannot create log file: {}", e),
            LoggerError::AlreadySet(e) => write!(f, "Logger already initialized: {}", e),
        }
    }
}

impl std::error::Error for LoggerError {}

/// Install a `CombinedLogger`: a `TermLogger` and, if `log_file` is given, a `WriteLogger`
/// writing the same records to that file.
pub fn init_logger(log_option: LevelFilter, log_file: Option<&Path>) -> Result<(), LoggerError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if let Some(path) = log_file {
        let file = File::create(path).map_err(LoggerError::Io)?;
        loggers.push(WriteLogger::new(log_option, Config::default(), file));
    }
    CombinedLogger::init(loggers).map_err(LoggerError::AlreadySet)?;
    info!("logger started with loglevel: {}", log_option);
    Ok(())
}
