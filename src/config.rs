use crate::parser::DEFAULT_MAX_DEPTH;
use thiserror::Error;

pub const MAX_INPUT_LEN_VAR: &str = "SCALC_MAX_INPUT_LEN";
pub const MAX_DEPTH_VAR: &str = "SCALC_MAX_DEPTH";

const DEFAULT_MAX_INPUT_LEN: usize = 1024;

// Upper bounds for overrides. At DEPTH_CAP a parse and its evaluation fit
// in a 2 MiB thread stack.
pub const INPUT_LEN_CAP: usize = 4 * 1024;
pub const DEPTH_CAP: usize = DEFAULT_MAX_DEPTH;

/// Limits applied to every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Longest accepted input, in characters.
    pub max_input_len: usize,
    /// Tallest accepted expression tree: nesting plus operator chain length.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            max_input_len: read_limit(&lookup, MAX_INPUT_LEN_VAR, INPUT_LEN_CAP)?
                .unwrap_or(default.max_input_len),
            max_depth: read_limit(&lookup, MAX_DEPTH_VAR, DEPTH_CAP)?
                .unwrap_or(default.max_depth),
        })
    }
}

fn read_limit<F>(lookup: &F, var: &'static str, cap: usize) -> Result<Option<usize>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=cap).contains(&n) => Ok(Some(n)),
        Ok(n) => {
            log::warn!("{var}={n} is outside 1..={cap}");
            Err(ConfigError::OutOfRange { var, value: n, cap })
        }
        Err(_) => {
            log::warn!("{var}={raw:?} is not a number");
            Err(ConfigError::NotANumber { var, value: raw })
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be between 1 and {cap}, got {value}")]
    OutOfRange {
        var: &'static str,
        value: usize,
        cap: usize,
    },
}
