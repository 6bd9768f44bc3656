//! Read-only configuration store with typed lookups.

use std::ffi::OsString;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::config::loader::EnvFile;

/// Process-wide configuration values, immutable once built.
///
/// Lookups never fail: a missing key yields `None` and the caller picks
/// the default.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    values: IndexMap<String, String>,
}

impl ConfigStore {
    /// Build a store from a loaded environment file.
    ///
    /// Variables in `process` take precedence over values from the file.
    pub fn from_sources<I, K, V>(file: EnvFile, process: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let path = file.path().to_path_buf();
        let mut values = file.into_values();
        let from_file = values.len();
        for (key, value) in process {
            values.insert(key.into(), value.into());
        }
        tracing::debug!(
            path = %path.display(),
            from_file,
            total = values.len(),
            "Configuration store built"
        );
        Self { values }
    }

    /// Build a store from the environment file, overlaid by the current process environment.
    ///
    /// Process variables that are not valid UTF-8 are skipped.
    pub fn from_env_file(file: EnvFile) -> Self {
        Self::from_sources(file, utf8_vars(std::env::vars_os()))
    }

    /// Raw string lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parsed lookup. Absent and unparseable values both yield `None`.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| raw.trim().parse().ok())
    }
}

/// Keep the variables whose name and value are both valid UTF-8.
fn utf8_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                tracing::warn!(key = %key, "Skipping environment variable with non-UTF-8 value");
                None
            }
            (Err(key), _) => {
                tracing::warn!(
                    key = %key.to_string_lossy(),
                    "Skipping environment variable with non-UTF-8 name"
                );
                None
            }
        })
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
