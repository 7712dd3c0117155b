//! # API Facade
//!
//! The API layer is a **thin facade** over the resolution logic and the
//! single entry point for any UI (the CLI today).
//!
//! ## Generic Over Fetcher and Pinger
//!
//! `VanityApi<F: Fetcher, P: VcsPinger>` is generic over its I/O:
//! - Production: `VanityApi<HttpFetcher, CommandPinger>`
//! - Testing: `VanityApi<InMemoryFetcher, InMemoryPinger>`
//!
//! Clients that only need a lookup should depend on the
//! [`ImportPathResolver`] trait rather than on `VanityApi` itself, so they
//! can be exercised with a stub resolver.

use crate::config::VanityConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::model::RepoRoot;
use crate::ping::VcsPinger;
use crate::resolve::{self, known_hosts, DynamicOptions};

/// Resolves an import path to its repository root.
pub trait ImportPathResolver {
    /// `verbose` enables diagnostic logging of each lookup step.
    fn resolve(&self, import_path: &str, verbose: bool) -> Result<RepoRoot>;
}

pub struct VanityApi<F: Fetcher, P: VcsPinger> {
    fetcher: F,
    pinger: P,
    config: VanityConfig,
}

impl<F: Fetcher, P: VcsPinger> VanityApi<F, P> {
    pub fn new(fetcher: F, pinger: P, config: VanityConfig) -> Self {
        Self {
            fetcher,
            pinger,
            config,
        }
    }

    pub fn repo_root(&self, import_path: &str, verbose: bool) -> Result<RepoRoot> {
        let opts = DynamicOptions {
            http_fallback: self.config.http_fallback,
            verbose,
        };
        resolve::resolve(import_path, &self.fetcher, &self.pinger, opts)
    }

    /// Resolve against well-known hosts only, optionally forcing the URL
    /// scheme for hosts that would otherwise be probed.
    pub fn repo_root_static(&self, import_path: &str, scheme: Option<&str>) -> Result<RepoRoot> {
        known_hosts::resolve_static(import_path, scheme, &self.fetcher, &self.pinger)
    }
}

impl<F: Fetcher, P: VcsPinger> ImportPathResolver for VanityApi<F, P> {
    fn resolve(&self, import_path: &str, verbose: bool) -> Result<RepoRoot> {
        self.repo_root(import_path, verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VanityError;
    use crate::fetch::memory::InMemoryFetcher;
    use crate::ping::InMemoryPinger;

    fn build_api(
        fetcher: InMemoryFetcher,
        config: VanityConfig,
    ) -> VanityApi<InMemoryFetcher, InMemoryPinger> {
        VanityApi::new(fetcher, InMemoryPinger::new(), config)
    }

    #[test]
    fn test_resolve_dispatches_to_static_table() {
        let api = build_api(InMemoryFetcher::new(), VanityConfig::default());
        let rr = api.resolve("github.com/org/repo", false).unwrap();
        assert_eq!(rr.repo, "https://github.com/org/repo");
    }

    #[test]
    fn test_config_controls_http_fallback() {
        let page = r#"<meta name="go-import" content="example.com/x git https://git.example.com/x">"#;
        let fetcher = InMemoryFetcher::new().with_page("http://example.com/x?go-get=1", 200, page);
        let config = VanityConfig {
            http_fallback: false,
            ..VanityConfig::default()
        };
        let api = build_api(fetcher, config);
        assert!(matches!(
            api.resolve("example.com/x", false),
            Err(VanityError::UnrecognizedImportPath { .. })
        ));

        let fetcher = InMemoryFetcher::new().with_page("http://example.com/x?go-get=1", 200, page);
        let api = build_api(fetcher, VanityConfig::default());
        assert_eq!(
            api.resolve("example.com/x", true).unwrap().repo,
            "https://git.example.com/x"
        );
    }

    #[test]
    fn test_static_with_forced_scheme() {
        let api = build_api(InMemoryFetcher::new(), VanityConfig::default());
        let rr = api.repo_root_static("example.org/r.git", Some("https")).unwrap();
        assert_eq!(rr.repo, "https://example.org/r");
    }

    #[test]
    fn test_static_only_reports_unknown_site() {
        let api = build_api(InMemoryFetcher::new(), VanityConfig::default());
        assert_eq!(
            api.repo_root_static("example.com/x", None).unwrap_err(),
            VanityError::UnknownSite
        );
    }
}
