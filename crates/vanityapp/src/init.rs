//! # Initialization
//!
//! Builds the production [`VanityContext`]: loads configuration and wires
//! the API to the real network fetcher and VCS pinger.
//!
//! ## Config Directory
//!
//! `vanity.toml` is looked up in one directory:
//! 1. `$VANITY_CONFIG_DIR`, if set (primarily used by tests to isolate state)
//! 2. Otherwise the OS-appropriate config dir from the `directories` crate
//!    (e.g. `~/.config/vanity/` on Linux)

use crate::api::VanityApi;
use crate::config::VanityConfig;
use crate::error::Result;
use crate::fetch::http::HttpFetcher;
use crate::ping::CommandPinger;
use clapfig::{Clapfig, SearchMode, SearchPath};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct VanityContext {
    pub api: VanityApi<HttpFetcher, CommandPinger>,
}

/// Directory searched for `vanity.toml`, if one can be determined.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var("VANITY_CONFIG_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            ProjectDirs::from("com", "vanity", "vanity").map(|dirs| dirs.config_dir().to_path_buf())
        })
}

pub fn load_config(dir: Option<PathBuf>) -> VanityConfig {
    let search_paths: Vec<SearchPath> = dir.into_iter().map(SearchPath::Path).collect();
    Clapfig::builder()
        .app_name("vanity")
        .file_name("vanity.toml")
        .search_paths(search_paths)
        .search_mode(SearchMode::Merge)
        .load()
        .unwrap_or_default()
}

/// Initialize the context with config loaded from [`config_dir`].
pub fn initialize() -> Result<VanityContext> {
    let config = load_config(config_dir());
    tracing::debug!(?config, "loaded configuration");

    let fetcher = HttpFetcher::new(&config)?;
    let api = VanityApi::new(fetcher, CommandPinger, config);
    Ok(VanityContext { api })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(dir.path().to_path_buf()));
        assert_eq!(config, VanityConfig::default());
    }

    #[test]
    fn test_config_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("vanity.toml"),
            "timeout_secs = 7\nhttp_fallback = false\n",
        )
        .unwrap();

        let config = load_config(Some(dir.path().to_path_buf()));
        assert_eq!(config.timeout_secs, 7);
        assert!(!config.http_fallback);
        assert_eq!(config.user_agent, "vanity");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("vanity.toml"), "timeout_secs = \"soon\"\n").unwrap();

        let config = load_config(Some(dir.path().to_path_buf()));
        assert_eq!(config, VanityConfig::default());
    }
}
