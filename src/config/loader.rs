//! Environment file loading from disk.
//!
//! The file is selected by the runtime mode: `<app_root>/.env.<mode>`.
//! A missing or unreadable file is fatal; startup never continues on defaults.
//! Lines that do not parse as `KEY=value` are skipped with a warning.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

/// Error type for environment loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read environment file {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse environment file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("runtime mode must not be empty")]
    EmptyMode,
}

/// Deployment tag selecting which environment file is loaded.
///
/// Set once before startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeMode(String);

impl RuntimeMode {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyMode);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_production(&self) -> bool {
        self.0.eq_ignore_ascii_case("production")
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value pairs read from an environment file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    path: PathBuf,
    values: IndexMap<String, String>,
}

impl EnvFile {
    pub fn new(path: impl Into<PathBuf>, values: IndexMap<String, String>) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn into_values(self) -> IndexMap<String, String> {
        self.values
    }
}

/// Compute the environment file path for a runtime mode.
pub fn env_file_path(app_root: &Path, mode: &RuntimeMode) -> PathBuf {
    app_root.join(format!(".env.{}", mode))
}

/// Read and parse the environment file for `mode` under `app_root`.
pub fn load_env_file(app_root: &Path, mode: &RuntimeMode) -> Result<EnvFile, ConfigError> {
    let path = env_file_path(app_root, mode);

    let iter = dotenvy::from_path_iter(&path).map_err(|e| match e {
        dotenvy::Error::Io(source) => ConfigError::Unreadable {
            path: path.clone(),
            source,
        },
        other => ConfigError::Parse {
            path: path.clone(),
            source: other,
        },
    })?;

    let mut values = IndexMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                tracing::warn!(
                    path = %path.display(),
                    line = %line,
                    index,
                    "Skipping malformed environment line"
                );
            }
            Err(dotenvy::Error::Io(source)) => {
                return Err(ConfigError::Unreadable { path, source });
            }
            Err(source) => return Err(ConfigError::Parse { path, source }),
        }
    }

    tracing::info!(
        path = %path.display(),
        mode = %mode,
        keys = values.len(),
        "Environment file loaded"
    );

    Ok(EnvFile { path, values })
}
