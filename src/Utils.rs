//! different utility modules used throughout the project
/// tiny module to install the terminal/file logger
pub mod logger;
/// collector and logging settings read from a TOML file
pub mod config;
