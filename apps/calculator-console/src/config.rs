//! Layered application configuration.
//!
//! Sources, lowest priority first:
//! 1) built-in defaults -> 2) YAML file (if provided) -> 3) env (`CALCULATOR__*`) -> 4) CLI overrides

use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `CALCULATOR__CONSOLE__PRECISION=4`.
pub const ENV_PREFIX: &str = "CALCULATOR__";

/// Largest number of decimal places accepted for printed results.
pub const MAX_PRECISION: usize = 17;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub console: ConsoleConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Decimal places in `Result:` lines.
    pub precision: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then environment overrides.
    ///
    /// # Errors
    /// Fails when `path` does not point to a file, when a source cannot be
    /// parsed, or when the merged values are out of range.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                anyhow::bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `-v` flags on top of the loaded values.
    pub fn apply_cli_overrides(&mut self, verbose: u8) {
        let level = match verbose {
            0 => return,
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        level.clone_into(&mut self.logging.level);
    }

    fn validate(&self) -> Result<()> {
        if self.console.precision > MAX_PRECISION {
            anyhow::bail!(
                "console.precision must be at most {MAX_PRECISION}, got {}",
                self.console.precision
            );
        }
        Ok(())
    }

    /// Effective configuration as pretty JSON.
    ///
    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn yaml_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(
            ["CALCULATOR__CONSOLE__PRECISION", "CALCULATOR__LOGGING__LEVEL"],
            || {
                let config = AppConfig::load(None).unwrap();
                assert_eq!(config, AppConfig::default());
                assert_eq!(config.console.precision, 2);
                assert_eq!(config.logging.level, "warn");
            },
        );
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let file = yaml_file("console:\n  precision: 4\nlogging:\n  level: debug\n");
        temp_env::with_vars_unset(
            ["CALCULATOR__CONSOLE__PRECISION", "CALCULATOR__LOGGING__LEVEL"],
            || {
                let config = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.console.precision, 4);
                assert_eq!(config.logging.level, "debug");
            },
        );
    }

    #[test]
    fn test_env_overrides_yaml() {
        let file = yaml_file("console:\n  precision: 4\n");
        temp_env::with_vars(
            [
                ("CALCULATOR__CONSOLE__PRECISION", Some("6")),
                ("CALCULATOR__LOGGING__LEVEL", None),
            ],
            || {
                let config = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(config.console.precision, 6);
                assert_eq!(config.logging.level, "warn");
            },
        );
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(err.to_string().contains("config file does not exist"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let file = yaml_file("console:\n  colour: true\n");
        temp_env::with_vars_unset(
            ["CALCULATOR__CONSOLE__PRECISION", "CALCULATOR__LOGGING__LEVEL"],
            || {
                assert!(AppConfig::load(Some(file.path())).is_err());
            },
        );
    }

    #[test]
    fn test_precision_out_of_range() {
        let file = yaml_file("console:\n  precision: 40\n");
        temp_env::with_vars_unset(
            ["CALCULATOR__CONSOLE__PRECISION", "CALCULATOR__LOGGING__LEVEL"],
            || {
                let err = AppConfig::load(Some(file.path())).unwrap_err();
                assert!(err.to_string().contains("console.precision"));
            },
        );
    }

    #[test]
    fn test_verbose_overrides_level() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(0);
        assert_eq!(config.logging.level, "warn");
        config.apply_cli_overrides(1);
        assert_eq!(config.logging.level, "info");
        config.apply_cli_overrides(2);
        assert_eq!(config.logging.level, "debug");
        config.apply_cli_overrides(5);
        assert_eq!(config.logging.level, "trace");
    }

    #[test]
    fn test_to_json_roundtrips() {
        let config = AppConfig::default();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"precision\": 2"));
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
