use crate::Utils::cache_config::{CacheConfig, ConfigError};
use chrono::Local;
use log::info;
use simplelog::*;
use std::fs::File;

/// Turns a loglevel string into a filter. "off" and "none" disable logging.
pub fn parse_loglevel(level: &str) -> Result<LevelFilter, ConfigError> {
    match level {
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        "off" | "none" => Ok(LevelFilter::Off),
        _ => Err(ConfigError::InvalidValue {
            key: "loglevel".to_string(),
            message: format!("loglevel must be debug, info, warn or error, got {}", level),
        }),
    }
}

/// Installs a terminal logger (and a file logger if `log_to_file` is set) for the
/// loglevel of `config`. Does nothing if no loglevel is given or logging is off.
/// A logger installed earlier is kept, that is not an error.
pub fn init_logger(config: &CacheConfig) -> Result<(), ConfigError> {
    let Some(level) = config.loglevel.as_deref() else {
        return Ok(());
    };
    let log_option = parse_loglevel(level)?;
    if log_option == LevelFilter::Off {
        return Ok(());
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if config.log_to_file {
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        loggers.push(WriteLogger::new(
            log_option,
            Config::default(),
            File::create(name)?,
        ));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => info!("logger started with loglevel: {}", log_option),
        Err(_) => {} // already installed
    }
    Ok(())
}
