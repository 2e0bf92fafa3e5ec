//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Label of the local currency (display only)
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Fixed rate override; skips the rate API when set
    #[serde(default)]
    pub rate: Option<f64>,

    /// Alternate rate API base URL
    #[serde(default)]
    pub rate_url: Option<String>,

    /// State file location; defaults to the platform data dir
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_currency() -> String {
    "ARS".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            rate: None,
            rate_url: None,
            state_path: None,
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalog-pricer").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(currency) = std::env::var("CATALOG_CURRENCY") {
            if !currency.is_empty() {
                self.currency = currency;
            }
        }

        if let Ok(rate) = std::env::var("CATALOG_RATE") {
            if let Ok(r) = rate.parse() {
                self.rate = Some(r);
            }
        }

        if let Ok(state) = std::env::var("CATALOG_STATE") {
            if !state.is_empty() {
                self.state_path = Some(PathBuf::from(state));
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.currency, "ARS");
        assert!(config.rate.is_none());
        assert!(config.rate_url.is_none());
        assert!(config.state_path.is_none());
        assert_eq!(config.format, OutputFormat::Table);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("TABLE".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            currency = "UYU"
            rate = 41.5
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.currency, "UYU");
        assert_eq!(config.rate, Some(41.5));
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            currency = "CLP"
            rate_url = "http://localhost:9999"
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.currency, "CLP");
        assert_eq!(config.rate_url, Some("http://localhost:9999".to_string()));
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_with_env() {
        let orig_currency = std::env::var("CATALOG_CURRENCY").ok();
        let orig_rate = std::env::var("CATALOG_RATE").ok();

        std::env::set_var("CATALOG_CURRENCY", "MXN");
        std::env::set_var("CATALOG_RATE", "17.25");

        let config = Config::new().with_env();
        assert_eq!(config.currency, "MXN");
        assert_eq!(config.rate, Some(17.25));

        // Invalid values are ignored, keeping defaults
        std::env::set_var("CATALOG_RATE", "not_a_number");
        let config = Config::new().with_env();
        assert!(config.rate.is_none());

        match orig_currency {
            Some(v) => std::env::set_var("CATALOG_CURRENCY", v),
            None => std::env::remove_var("CATALOG_CURRENCY"),
        }
        match orig_rate {
            Some(v) => std::env::set_var("CATALOG_RATE", v),
            None => std::env::remove_var("CATALOG_RATE"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            currency: "ARS".to_string(),
            rate: Some(1300.0),
            rate_url: Some("http://localhost:1234".to_string()),
            state_path: Some(PathBuf::from("/tmp/state.json")),
            format: OutputFormat::Csv,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.currency, config.currency);
        assert_eq!(parsed.rate, config.rate);
        assert_eq!(parsed.rate_url, config.rate_url);
        assert_eq!(parsed.state_path, config.state_path);
        assert_eq!(parsed.format, config.format);
    }
}
