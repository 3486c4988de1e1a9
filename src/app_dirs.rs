use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILE_NAME: &str = "wpm.log";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the diagnostics log goes when no path is given on the command line
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("wpm")
                .join(LOG_FILE_NAME)
        } else {
            ProjectDirs::from("", "", "wpm")
                .map(|proj_dirs| proj_dirs.data_local_dir().join(LOG_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
        }
    }
}
