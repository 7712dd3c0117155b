//! # Resolution
//!
//! Turning an import path into a [`RepoRoot`] happens in two stages:
//!
//! 1. [`known_hosts`]: well-known hosts whose paths encode the repository
//!    (GitHub, Bitbucket, Launchpad, OpenStack) and `host/path.<vcs>` paths.
//! 2. [`dynamic`]: everything else, via `<meta name="go-import">` tags
//!    ([`meta`]) served by the host.
//!
//! Both stages reach the outside world only through [`Fetcher`] and
//! [`VcsPinger`], so they are tested with in-memory implementations.

use crate::error::{Result, VanityError};
use crate::fetch::Fetcher;
use crate::model::RepoRoot;
use crate::ping::VcsPinger;

pub mod dynamic;
pub mod known_hosts;
pub mod meta;

pub use dynamic::DynamicOptions;

/// Resolve `import_path` to the repository that hosts it.
///
/// When no well-known host matches and meta tag resolution fails, the error
/// is `unrecognized import path "<p>": <detail>`. The `go` tool's resolver
/// drops the detail and reports only `unrecognized import path "<p>"`.
pub fn resolve(
    import_path: &str,
    fetcher: &dyn Fetcher,
    pinger: &dyn VcsPinger,
    opts: DynamicOptions,
) -> Result<RepoRoot> {
    let resolved = match known_hosts::resolve_static(import_path, None, fetcher, pinger) {
        Err(VanityError::UnknownSite) => dynamic::resolve_dynamic(import_path, fetcher, opts)
            .map_err(|detail| {
                if opts.verbose {
                    tracing::info!(import_path, error = %detail, "dynamic resolution failed");
                }
                VanityError::UnrecognizedImportPath {
                    path: import_path.to_string(),
                    detail: Box::new(detail),
                }
            }),
        other => other,
    }?;

    if import_path.contains("...") && resolved.root.contains("...") {
        return Err(VanityError::WildcardRoot(import_path.to_string()));
    }
    Ok(resolved)
}
