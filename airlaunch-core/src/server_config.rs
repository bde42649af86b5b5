//! Reading the project's `server.config.json`.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::{io_err, ConfigError};
use crate::types::SERVER_CONFIG_FILE;

/// The subset of `server.config.json` the launcher cares about.
/// Unknown keys are ignored, and a value of the wrong type reads as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub gin_port: Option<u16>,
    #[serde(default, deserialize_with = "lenient")]
    pub kill_port_before_develop: Option<bool>,
}

/// Accept any JSON value and keep it only if it converts to `T`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl ServerConfig {
    /// Load `server.config.json` from `dir`. A missing file is `Ok(None)`.
    pub fn load_from(dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = dir.join(SERVER_CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        let config = serde_json::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path, source })?;
        Ok(Some(config))
    }

    /// The Gin port, if configured and non-zero.
    pub fn gin_port(&self) -> Option<u16> {
        self.gin_port.filter(|p| *p > 0)
    }

    /// Ports are released unless the project opts out explicitly.
    pub fn should_release_ports(&self) -> bool {
        self.kill_port_before_develop != Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        fs::write(dir.path().join(SERVER_CONFIG_FILE), body).expect("write config");
    }

    #[test]
    fn missing_file_is_none() {
        let dir = TempDir::new().expect("tempdir");
        assert_eq!(ServerConfig::load_from(dir.path()).expect("load"), None);
    }

    #[test]
    fn reads_camel_case_keys_and_ignores_the_rest() {
        let dir = TempDir::new().expect("tempdir");
        write_config(
            &dir,
            r#"{"ginPort": 8099, "nuxtPort": 3000, "baseUrl": "/api", "killPortBeforeDevelop": false}"#,
        );
        let config = ServerConfig::load_from(dir.path())
            .expect("load")
            .expect("present");
        assert_eq!(config.gin_port(), Some(8099));
        assert!(!config.should_release_ports());
    }

    #[test]
    fn bad_sibling_value_keeps_gin_port() {
        let dir = TempDir::new().expect("tempdir");
        write_config(&dir, r#"{"ginPort": 8099, "nuxtPort": "3000"}"#);
        let config = ServerConfig::load_from(dir.path())
            .expect("load")
            .expect("present");
        assert_eq!(config.gin_port(), Some(8099));
    }

    #[test]
    fn wrongly_typed_values_read_as_unset() {
        let dir = TempDir::new().expect("tempdir");
        write_config(
            &dir,
            r#"{"ginPort": -1, "killPortBeforeDevelop": "no"}"#,
        );
        let config = ServerConfig::load_from(dir.path())
            .expect("load")
            .expect("present");
        assert_eq!(config.gin_port(), None);
        assert!(config.should_release_ports());

        write_config(&dir, r#"{"ginPort": "8099"}"#);
        let config = ServerConfig::load_from(dir.path())
            .expect("load")
            .expect("present");
        assert_eq!(config.gin_port(), None);
    }

    #[test]
    fn release_defaults_to_on() {
        let config = ServerConfig::default();
        assert!(config.should_release_ports());
    }

    #[test]
    fn zero_port_is_ignored() {
        let config = ServerConfig {
            gin_port: Some(0),
            ..Default::default()
        };
        assert_eq!(config.gin_port(), None);
    }

    #[test]
    fn malformed_json_reports_path() {
        let dir = TempDir::new().expect("tempdir");
        write_config(&dir, "{ ginPort: ");
        let err = ServerConfig::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains(SERVER_CONFIG_FILE));
    }
}
