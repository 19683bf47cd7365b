use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Shallowest search the driver will run.
pub const MIN_DEPTH: u8 = 1;
/// Deepest search the driver will run. Busy middlegames at depth 4 visit
/// around a million nodes; depth 5 is tens of millions.
pub const MAX_DEPTH: u8 = 4;

/// Env var naming a TOML config file.
pub const CONFIG_PATH_VAR: &str = "CHESS_ENGINE_CONFIG";
/// Env var overriding the search depth.
pub const DEPTH_VAR: &str = "CHESS_DEPTH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {name}")]
    InvalidValue { name: String, value: String },
}

/// Driver configuration.
///
/// Layered as: defaults, TOML file, environment, command-line flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Search depth in plies, kept within MIN_DEPTH..=MAX_DEPTH
    pub depth: u8,
    /// tracing filter used when RUST_LOG is unset
    pub log_filter: String,
    /// Alpha-beta cutoffs in the search
    pub pruning: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            depth: 3,
            log_filter: "info".to_string(),
            pruning: true,
        }
    }
}

pub fn clamp_depth(depth: u32) -> u8 {
    depth.clamp(MIN_DEPTH as u32, MAX_DEPTH as u32) as u8
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let mut cfg: EngineConfig = toml::from_str(text)?;
        cfg.depth = clamp_depth(cfg.depth as u32);
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `CHESS_DEPTH` as looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var(DEPTH_VAR) {
            let depth: u32 = v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: DEPTH_VAR.to_string(),
                value: v.clone(),
            })?;
            self.depth = clamp_depth(depth);
        }
        Ok(())
    }

    /// Resolves the full configuration from the process environment.
    pub fn load(path: Option<&Path>, depth_flag: Option<u8>) -> Result<Self, ConfigError> {
        Self::load_with(path, depth_flag, |name| std::env::var(name).ok())
    }

    /// Same as `load`, reading environment variables through `var`.
    pub fn load_with<F>(
        path: Option<&Path>,
        depth_flag: Option<u8>,
        var: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| var(CONFIG_PATH_VAR).map(PathBuf::from));

        let mut cfg = match file {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        cfg.apply_env(&var)?;
        if let Some(d) = depth_flag {
            cfg.depth = clamp_depth(d as u32);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
