//! log4rs setup for the `netcalc` binary.
//!
//! The library itself only talks to the `log` facade.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Initialise log4rs from `config_path`, or log warnings to stderr when the
/// file does not exist.
pub fn init(config_path: &Path) -> Result<(), Box<dyn Error>> {
    if config_path.exists() {
        log4rs::init_file(config_path, Default::default())?;
        log::debug!("log4rs initialised from {}", config_path.display());
    } else {
        log4rs::init_config(fallback_config(LevelFilter::Warn)?)?;
        log::debug!("{} not found, logging to stderr", config_path.display());
    }
    Ok(())
}

/// A single stderr console appender at `level`.
pub fn fallback_config(level: LevelFilter) -> Result<Config, Box<dyn Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    Ok(config)
}
