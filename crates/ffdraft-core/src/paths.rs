// Rankings file location: <app data dir>/<season>DraftOverallRankings.csv

use chrono::Datelike;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::RankingsConfig;

pub const APP_NAME: &str = "ffdraft";
pub const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("no home directory found; set rankings.data_dir in config/ffdraft.toml")]
    NoDataDir,
}

/// The current calendar year in local time.
pub fn current_season() -> i32 {
    chrono::Local::now().year()
}

/// Expand `{year}` in a file name template.
pub fn rankings_file_name(template: &str, season: i32) -> String {
    template.replace(YEAR_PLACEHOLDER, &season.to_string())
}

/// Per-user data directory for the application.
pub fn default_data_dir() -> Result<PathBuf, PathError> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(PathError::NoDataDir)
}

/// Rankings file path for an explicit directory and season.
pub fn rankings_path_in(dir: &Path, config: &RankingsConfig, season: i32) -> PathBuf {
    dir.join(rankings_file_name(&config.file_name, season))
}

/// Resolve the rankings file from config, falling back to the platform data
/// directory and the current season.
pub fn rankings_path(config: &RankingsConfig) -> Result<PathBuf, PathError> {
    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    let season = config.season.unwrap_or_else(current_season);
    Ok(rankings_path_in(&dir, config, season))
}
