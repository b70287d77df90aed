//! Configuration loading.
//!
//! Sources, later ones win:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `<config dir>/ambucheck/config.toml`)
//! 3. Environment variables prefixed with `AMBUCHECK_`, nested with `__`
//!    (for example `AMBUCHECK_ENDPOINT__URL`)

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_DIR_NAME: &str = "ambucheck";
const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "ambucheck.log";
const ENV_PREFIX: &str = "AMBUCHECK_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub logging: LoggingConfig,
}

/// Where finished checklists are posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Spreadsheet web-app URL. Empty means submission is disabled.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file. Defaults to `<data dir>/ambucheck/ambucheck.log`.
    pub file: Option<PathBuf>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl EndpointConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Loads configuration with an optional custom config path.
    ///
    /// A missing file is not an error; its layer is simply empty.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.timeout_secs == 0 {
            return Err(Error::config_validation(
                "endpoint.timeout_secs must be greater than 0",
            ));
        }

        if self.endpoint.is_configured() {
            let url = Url::parse(&self.endpoint.url).map_err(|e| {
                Error::config_validation(format!("endpoint.url '{}' is not a valid URL: {e}", self.endpoint.url))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(Error::config_validation(format!(
                    "endpoint.url must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }

        Ok(())
    }

    /// Replaces the endpoint URL, as done by the `--endpoint` flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Result<Self> {
        self.endpoint.url = url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn log_file_path(&self) -> PathBuf {
        self.logging.file.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR_NAME)
                .join(LOG_FILE_NAME)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.endpoint.url.is_empty());
        assert!(!config.endpoint.is_configured());
        assert_eq!(config.endpoint.timeout(), Duration::from_secs(30));
        assert!(config.logging.file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("absent.toml");
            let config = Config::load_from(Some(path)).expect("defaults load");
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [endpoint]
                url = "https://script.example.com/macros/s/abc/exec"
                timeout_secs = 10

                [logging]
                file = "/tmp/ambucheck-test.log"
                "#,
            )?;
            let config = Config::load_from(Some(jail.directory().join("config.toml"))).expect("toml load");
            assert_eq!(config.endpoint.url, "https://script.example.com/macros/s/abc/exec");
            assert_eq!(config.endpoint.timeout_secs, 10);
            assert_eq!(config.log_file_path(), PathBuf::from("/tmp/ambucheck-test.log"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[endpoint]\nurl = \"https://file.example.com/\"\n")?;
            jail.set_env("AMBUCHECK_ENDPOINT__URL", "https://env.example.com/");
            jail.set_env("AMBUCHECK_ENDPOINT__TIMEOUT_SECS", "5");
            let config = Config::load_from(Some(jail.directory().join("config.toml"))).expect("env load");
            assert_eq!(config.endpoint.url, "https://env.example.com/");
            assert_eq!(config.endpoint.timeout_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[endpoint]\nurl = \"not a url\"\n")?;
            let result = Config::load_from(Some(jail.directory().join("config.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        let result = Config::default().with_endpoint("ftp://example.com/upload");
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.endpoint.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_endpoint_override() {
        let config = Config::default()
            .with_endpoint("https://script.example.com/exec")
            .expect("valid override");
        assert!(config.endpoint.is_configured());
    }

    #[test]
    fn test_malformed_toml_is_a_load_error() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[endpoint\nurl = ")?;
            let result = Config::load_from(Some(jail.directory().join("config.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }
}
