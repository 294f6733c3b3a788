//! Configuration loading.

use crate::options::CompilerOptions;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;

/// Config file names searched by [`TsConfig::find`], in order.
pub const CONFIG_FILE_NAMES: [&str; 4] =
    ["tsconfig.json", "jsconfig.json", "deno.json", "deno.jsonc"];

/// Error types for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSONC or has invalid option values.
    #[error("failed to parse {}: {source}", .path.as_deref().map_or("config", Utf8Path::as_str))]
    Parse {
        path: Option<Utf8PathBuf>,
        #[source]
        source: json5::Error,
    },
}

/// A TypeScript-style configuration file.
///
/// Only `compilerOptions` is read; every other key is ignored. Options are
/// not validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

impl TsConfig {
    /// Parses a config document. Comments and trailing commas are allowed.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, None)
    }

    /// Loads configuration from a file.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, Some(path))
    }

    /// Finds and loads the first config file present in a project root.
    pub fn find(project_root: &Utf8Path) -> Result<Option<(Utf8PathBuf, Self)>, ConfigError> {
        for name in CONFIG_FILE_NAMES {
            let path = project_root.join(name);
            if path.is_file() {
                let config = Self::load(&path)?;
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }

    fn parse(content: &str, path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.map(Utf8Path::to_path_buf),
            source,
        })
    }
}
