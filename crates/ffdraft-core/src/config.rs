// Configuration loading and parsing (config/ffdraft.toml).
//
// The file is optional: every key has a default, so a fresh checkout runs
// without any config at all.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::import::ImportOptions;
use crate::paths::YEAR_PLACEHOLDER;

pub const CONFIG_FILE: &str = "ffdraft.toml";
pub const DEFAULT_FILE_NAME: &str = "{year}DraftOverallRankings.csv";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const DEFAULT_LOG_FILTER: &str = "ffdraft=info,ffdraft_app=info,ffdraft_core=info,warn";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rankings: RankingsConfig,
    pub logging: LoggingConfig,
}

/// Where the rankings file lives and how to read it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RankingsConfig {
    /// Directory holding the rankings file. Defaults to the platform's
    /// per-user application data directory.
    pub data_dir: Option<PathBuf>,
    /// File name template; `{year}` is replaced with the season.
    pub file_name: String,
    /// Season to load. Defaults to the current calendar year.
    pub season: Option<i32>,
    /// Whether the first row of the file is a header.
    pub has_headers: bool,
}

impl Default for RankingsConfig {
    fn default() -> Self {
        RankingsConfig {
            data_dir: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            season: None,
            has_headers: false,
        }
    }
}

impl RankingsConfig {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            has_headers: self.has_headers,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the log file, relative to the working directory.
    pub dir: String,
    /// `tracing_subscriber::EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            dir: DEFAULT_LOG_DIR.to_string(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/ffdraft.toml` relative to `base_dir`. A missing
/// file yields the defaults.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    let config = parse_config(&text).map_err(|e| match e {
        ConfigError::ParseError { source, .. } => ConfigError::ParseError { path, source },
        other => other,
    })?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::ReadError {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

/// Parse and validate config text.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: PathBuf::from(CONFIG_FILE),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let rankings = &config.rankings;

    if rankings.file_name.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "rankings.file_name".into(),
            message: "must not be empty".into(),
        });
    }

    if rankings.file_name.contains(|c: char| c == '/' || c == '\\') {
        return Err(ConfigError::ValidationError {
            field: "rankings.file_name".into(),
            message: format!(
                "must be a bare file name (use rankings.data_dir for the directory), got {:?}",
                rankings.file_name
            ),
        });
    }

    if let Some(season) = rankings.season {
        if !(1920..=2100).contains(&season) {
            return Err(ConfigError::ValidationError {
                field: "rankings.season".into(),
                message: format!("must be between 1920 and 2100, got {season}"),
            });
        }
    }

    if rankings.season.is_some() && !rankings.file_name.contains(YEAR_PLACEHOLDER) {
        tracing::warn!(
            "rankings.season is set but rankings.file_name has no {} placeholder",
            YEAR_PLACEHOLDER
        );
    }

    if config.logging.dir.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.dir".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.rankings.data_dir.is_none());
        assert_eq!(config.rankings.file_name, DEFAULT_FILE_NAME);
        assert!(config.rankings.season.is_none());
        assert!(!config.rankings.has_headers);
        assert_eq!(config.logging.dir, DEFAULT_LOG_DIR);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn full_config_parses() {
        let text = r#"
[rankings]
data_dir = "/srv/ffdraft"
file_name = "{year}-ppr.csv"
season = 2023
has_headers = true

[logging]
dir = "var/log"
filter = "ffdraft_core=debug"
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.rankings.data_dir, Some(PathBuf::from("/srv/ffdraft")));
        assert_eq!(config.rankings.file_name, "{year}-ppr.csv");
        assert_eq!(config.rankings.season, Some(2023));
        assert!(config.rankings.import_options().has_headers);
        assert_eq!(config.logging.dir, "var/log");
        assert_eq!(config.logging.filter, "ffdraft_core=debug");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = parse_config("[rankings]\nseason = 2022\n").unwrap();
        assert_eq!(config.rankings.season, Some(2022));
        assert_eq!(config.rankings.file_name, DEFAULT_FILE_NAME);
        assert_eq!(config.logging.dir, DEFAULT_LOG_DIR);
    }

    #[test]
    fn rejects_empty_file_name() {
        let err = parse_config("[rankings]\nfile_name = \"  \"\n").unwrap_err();
        match err {
            ConfigError::ValidationError { field, .. } => assert_eq!(field, "rankings.file_name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_file_name_with_directory() {
        let err = parse_config("[rankings]\nfile_name = \"data/{year}.csv\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "rankings.file_name"
        ));
    }

    #[test]
    fn rejects_out_of_range_season() {
        let err = parse_config("[rankings]\nseason = 1850\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "rankings.season"
        ));
    }

    #[test]
    fn rejects_empty_log_dir() {
        let err = parse_config("[logging]\ndir = \"\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ValidationError { ref field, .. } if field == "logging.dir"
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_config("[rankings\nseason = 2024").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn rejects_wrong_type() {
        let err = parse_config("[rankings]\nseason = \"next year\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn missing_config_file_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config_from(tmp.path()).expect("defaults when no config file");
        assert_eq!(config.rankings.file_name, DEFAULT_FILE_NAME);
    }

    #[test]
    fn loads_config_file_from_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("config");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join(CONFIG_FILE),
            "[rankings]\nseason = 2021\nhas_headers = true\n",
        )
        .unwrap();

        let config = load_config_from(tmp.path()).unwrap();
        assert_eq!(config.rankings.season, Some(2021));
        assert!(config.rankings.has_headers);
    }

    #[test]
    fn parse_error_reports_real_path() {
        let tmp = tempfile::tempdir().unwrap();
        let config_dir = tmp.path().join("config");
        fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(CONFIG_FILE);
        fs::write(&path, "not = [valid").unwrap();

        match load_config_from(tmp.path()).unwrap_err() {
            ConfigError::ParseError { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
