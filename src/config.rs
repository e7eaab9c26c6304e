use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::{error::AuditError, matcher::MatchMode};

pub const DEFAULT_INPUT: &str = "data/mobile-parameters-q4-2014.csv";
pub const DEFAULT_OUTPUT: &str = "data/mobile-parameters-q4-2014-updated.csv";

/// Optional JSON file holding a [`Config`]; missing keys keep their defaults.
pub const CONFIG_FILE_VAR: &str = "MOBILEAUDIT_CONFIG";
pub const INPUT_VAR: &str = "MOBILEAUDIT_INPUT";
pub const OUTPUT_VAR: &str = "MOBILEAUDIT_OUTPUT";
pub const MATCH_MODE_VAR: &str = "MOBILEAUDIT_MATCH_MODE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source CSV to audit.
    pub input: PathBuf,
    /// Where the cleaned CSV goes. Never the same file as `input`.
    pub output: PathBuf,
    pub match_mode: MatchMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            match_mode: MatchMode::Anchored,
        }
    }
}

impl Config {
    /// Defaults, then the JSON file named by `MOBILEAUDIT_CONFIG`, then the
    /// individual `MOBILEAUDIT_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg: Config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => {
                let f = fs::File::open(&path).map_err(|source| AuditError::FileAccess {
                    path: PathBuf::from(&path),
                    source,
                })?;
                serde_json::from_reader(f)
                    .with_context(|| format!("parsing config file {}", path))?
            }
            None => Config::default(),
        };

        if let Some(input) = lookup(INPUT_VAR) {
            cfg.input = PathBuf::from(input);
        }
        if let Some(output) = lookup(OUTPUT_VAR) {
            cfg.output = PathBuf::from(output);
        }
        if let Some(mode) = lookup(MATCH_MODE_VAR) {
            cfg.match_mode = mode.parse()?;
        }
        Ok(cfg)
    }
}
