//! ---
//! crt_section: "02-ambient"
//! crt_subsection: "module"
//! crt_type: "source"
//! crt_scope: "code"
//! crt_description: "Configuration loading for client runtime tooling."
//! crt_version: "v1.0.0"
//! crt_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::logging::LogFormat;

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_include_build() -> bool {
    true
}

/// Primary configuration object for client runtime tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no file was found and defaults apply.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &'static str = "CLIENT_RUNTIME_CONFIG";

    /// Load configuration from disk, respecting the `CLIENT_RUNTIME_CONFIG` override.
    pub fn load<P: AsRef<Path>>(explicit: Option<&Path>, candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(explicit, candidates)?.config)
    }

    /// Load configuration together with the effective source path.
    ///
    /// Precedence: `CLIENT_RUNTIME_CONFIG`, then `explicit`, then the first
    /// existing candidate, otherwise defaults. A path named by the environment
    /// or `explicit` must exist.
    pub fn load_with_source<P: AsRef<Path>>(
        explicit: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedAppConfig> {
        let env_path = std::env::var(Self::ENV_CONFIG_PATH)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        if let Some(path) = env_path.or_else(|| explicit.map(Path::to_path_buf)) {
            let config = Self::from_path(&path)?;
            return Ok(LoadedAppConfig {
                config,
                source: Some(path),
            });
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(LoadedAppConfig {
            config: AppConfig::default(),
            source: None,
        })
    }

    fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        contents
            .parse::<AppConfig>()
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Directory for a daily rolling JSON log file. Disabled when absent.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = &self.file_prefix {
            if prefix.trim().is_empty() {
                return Err(anyhow!("logging.file_prefix must not be empty"));
            }
        }
        Ok(())
    }
}

/// How version reports are rendered.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Extended,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "extended" => Ok(ReportFormat::Extended),
            other => Err(format!("unknown report format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    /// Include vergen build provenance in JSON reports.
    #[serde(default = "default_include_build")]
    pub include_build: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            include_build: default_include_build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: AppConfig = "".parse().expect("empty config parses");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.report.include_build);
    }

    #[test]
    fn parses_all_sections() {
        let config: AppConfig = r#"
            [logging]
            format = "structured-json"
            directory = "target/logs"
            file_prefix = "crt"

            [report]
            format = "json"
            include_build = false
        "#
        .parse()
        .expect("config parses");
        assert_eq!(config.logging.format, LogFormat::StructuredJson);
        assert_eq!(config.logging.directory, Some(PathBuf::from("target/logs")));
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(!config.report.include_build);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "[report]\ncolour = true\n"
            .parse::<AppConfig>()
            .expect_err("unknown key");
        assert!(format!("{err:#}").contains("colour"));
    }

    #[test]
    fn rejects_blank_file_prefix() {
        let err = "[logging]\nfile_prefix = \"  \"\n"
            .parse::<AppConfig>()
            .expect_err("blank prefix");
        assert!(err.to_string().contains("file_prefix"));
    }

    #[test]
    fn report_format_from_str() {
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("yaml".parse::<ReportFormat>().is_err());
    }
}
