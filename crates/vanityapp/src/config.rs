//! # Configuration
//!
//! Configuration is managed by [`clapfig`], which handles layered loading
//! from a TOML file, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `VANITY__TIMEOUT_SECS`, `VANITY__HTTP_FALLBACK`, etc.
//! 2. **Config file**: `vanity.toml` in the user config directory (via the
//!    `directories` crate), or in `$VANITY_CONFIG_DIR` when set.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! A missing or unreadable config never stops a lookup; defaults are used.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `timeout_secs` | `30` | Per-request HTTP timeout |
//! | `user_agent` | `vanity` | User-Agent header sent with every request |
//! | `http_fallback` | `true` | Retry go-get pages over plain HTTP when HTTPS fails |

use confique::Config;
use serde::{Deserialize, Serialize};

/// Configuration for vanity, stored in `vanity.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct VanityConfig {
    /// Per-request HTTP timeout in seconds
    #[config(default = 30)]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[config(default = "vanity")]
    pub user_agent: String,

    /// Fall back to plain HTTP when the HTTPS go-get page is unavailable
    #[config(default = true)]
    pub http_fallback: bool,
}

impl Default for VanityConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "vanity".to_string(),
            http_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VanityConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.user_agent, "vanity");
        assert!(config.http_fallback);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vanity.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();

        let config = VanityConfig::builder().file(&path).load().unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "vanity");
        assert!(config.http_fallback);
    }
}
