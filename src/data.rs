//! Test data loading
//!
//! YAML and JSON fixtures are deserialized into caller-chosen types; format
//! problems surface as [`Error::DataFormat`](crate::Error::DataFormat) with
//! the offending path in the message.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::config::Settings;
use crate::{Error, Result};

/// Load a YAML file into `T`
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading YAML test data");
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents)
        .map_err(|e| Error::data_format(format!("{}: {}", path.display(), e)))
}

/// Load a JSON file into `T`
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading JSON test data");
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| Error::data_format(format!("{}: {}", path.display(), e)))
}

/// Load the default test-data file from the configured data directory
pub fn test_data<T: DeserializeOwned>(settings: &Settings) -> Result<T> {
    load_yaml(settings.test_data_file())
}
