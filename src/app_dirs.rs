use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "klack";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("klack_config.json"))
    }

    /// Log file under the local state dir (`~/.local/state/klack` on unix).
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
                .join("klack.log");
        }
        Self::project()
            .map(|pd| pd.data_local_dir().join("klack.log"))
            .unwrap_or_else(|| PathBuf::from("klack.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_have_expected_file_names() {
        assert!(AppDirs::config_path().ends_with("config.json"));
        assert!(AppDirs::log_path().ends_with("klack.log"));
    }
}
