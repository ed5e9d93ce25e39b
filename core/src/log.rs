//! Logger and logging macros
//!
//! For the macros to properly compile, the calling crate must add a dependency to
//! crate log (ie. `log.workspace = true`).

use consts::*;
use log::LevelFilter;
use log4rs::{Config, config::Root};
use std::iter::once;
use thiserror::Error;

mod appender;
mod consts;
mod logger;

pub use consts::{ERR_LOG_FILE_NAME, LOG_FILE_NAME};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LogError {
    #[error("Logger spec parsing error: {0}")]
    ParseLoggerSpecError(String),

    #[error("cannot create log appender: {0}")]
    Appender(String),

    #[error("invalid logger configuration: {0}")]
    Config(String),

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

pub type LogResult<T> = std::result::Result<T, LogError>;

/// Installs the global logger: a colored console appender and, when `log_dir` is provided,
/// a rolling log file plus a rolling warnings-and-errors file in that directory.
///
/// `filters` is an expression such as `"info,ftmint_token=trace"`. Specs read from the
/// `RUST_LOG` environment variable are applied first and overridden by `filters`.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> LogResult<()> {
    use appender::AppenderSpec;

    let stdout_appender = AppenderSpec::console(CONSOLE_APPENDER, None);
    let file_appender = log_dir.map(|dir| AppenderSpec::roller(LOG_FILE_APPENDER, None, dir, LOG_FILE_NAME)).transpose()?;
    let err_file_appender = log_dir
        .map(|dir| AppenderSpec::roller(ERR_LOG_FILE_APPENDER, Some(LevelFilter::Warn), dir, ERR_LOG_FILE_NAME))
        .transpose()?;
    let appenders: Vec<_> = once(stdout_appender).chain(file_appender).chain(err_file_appender).collect();
    let names: Vec<&'static str> = appenders.iter().map(|x| x.name).collect();

    let loggers = logger::Builder::new()
        .root_level(LevelFilter::Info)
        .parse_env(DEFAULT_LOGGER_ENV)
        .parse_expression(filters)
        .appenders(names.iter().copied())
        .build();

    let config = Config::builder()
        .appenders(appenders.into_iter().map(|x| x.appender()))
        .loggers(loggers.items())
        .build(Root::builder().appenders(names).build(loggers.root_level()))
        .map_err(|err| LogError::Config(err.to_string()))?;

    log4rs::init_config(config).map(|_| ()).map_err(|_| LogError::AlreadyInitialized)
}

/// Tries to init the global logger with a console appender, but does not fail if it was already setup.
/// Should be used for tests.
pub fn try_init_logger(filters: &str) {
    let loggers = logger::Builder::new()
        .root_level(LevelFilter::Info)
        .parse_env(DEFAULT_LOGGER_ENV)
        .parse_expression(filters)
        .appenders(once(CONSOLE_APPENDER))
        .build();
    let stdout_appender = appender::AppenderSpec::console(CONSOLE_APPENDER, None).appender();
    let config = Config::builder()
        .appender(stdout_appender)
        .loggers(loggers.items())
        .build(Root::builder().appender(CONSOLE_APPENDER).build(loggers.root_level()));
    if let Ok(config) = config {
        let _ = log4rs::init_config(config);
    }
}

#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (
        log::trace!($($t)*);
    )
}

#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (
        log::debug!($($t)*);
    )
}

#[macro_export]
macro_rules! info {
    ($($t:tt)*) => (
        log::info!($($t)*);
    )
}

#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (
        log::warn!($($t)*);
    )
}

#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (
        log::error!($($t)*);
    )
}
