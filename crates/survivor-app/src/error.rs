//! Host-level errors.

use std::io;

use survivor_core::config::ConfigError;

/// Errors from the control surface.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has shut down")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[source] io::Error),
}

/// Errors from command-line setup.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),
    #[error("missing value for `{0}`")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: &'static str, value: String },
    #[error("could not read config file `{path}`: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file `{path}`: {source}")]
    ParseConfig {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
