//! Command-line options for the headless binary.

use std::fs;

use survivor_core::config::GameTuning;
use survivor_sim::engine::SimConfig;

use crate::error::CliError;

/// Parsed command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: SimConfig,
    /// Simulated seconds to run.
    pub seconds: f64,
    /// Pace the run on the game loop thread at wall-clock speed.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: SimConfig::default(),
            seconds: 30.0,
            realtime: false,
        }
    }
}

pub const USAGE: &str =
    "usage: survivor [--seed <u64>] [--seconds <f64>] [--config <tuning.json>] [--realtime]";

impl RunOptions {
    /// Parse arguments (without the program name).
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = args.next().ok_or(CliError::MissingValue("--seed"))?;
                    options.config.seed = value.parse().map_err(|_| CliError::InvalidValue {
                        flag: "--seed",
                        value,
                    })?;
                }
                "--seconds" => {
                    let value = args.next().ok_or(CliError::MissingValue("--seconds"))?;
                    options.seconds = match value.parse::<f64>() {
                        Ok(s) if s.is_finite() && s >= 0.0 => s,
                        _ => {
                            return Err(CliError::InvalidValue {
                                flag: "--seconds",
                                value,
                            })
                        }
                    };
                }
                "--config" => {
                    let path = args.next().ok_or(CliError::MissingValue("--config"))?;
                    options.config.tuning = load_tuning(&path)?;
                }
                "--realtime" => options.realtime = true,
                _ => return Err(CliError::UnknownArgument(arg)),
            }
        }
        Ok(options)
    }
}

/// Read a (possibly partial) `GameTuning` from a JSON file.
pub fn load_tuning(path: &str) -> Result<GameTuning, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_string(),
        source,
    })
}
