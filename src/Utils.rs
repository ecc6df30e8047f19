//! different utility modules used throughout the project
/// cache settings read from a TOML file
pub mod cache_config;
/// tiny module to start terminal and file logging
pub mod logger;
