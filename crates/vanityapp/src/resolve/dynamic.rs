//! Meta tag based resolution for arbitrary hosts.
//!
//! The import path is fetched as `https://<path>?go-get=1` (falling back to
//! plain HTTP when allowed) and the page's go-import tags name the
//! repository. A tag whose prefix is shorter than the import path is only
//! trusted once the page at that prefix serves the same tag.

use super::meta::{match_meta_import, parse_meta_imports, MetaImport};
use crate::error::{Result, VanityError};
use crate::fetch::{FetchResponse, Fetcher};
use crate::model::RepoRoot;
use crate::vcs::Vcs;
use url::Url;

#[derive(Debug, Clone, Copy)]
pub struct DynamicOptions {
    /// Retry over plain HTTP when HTTPS fails or is not 200 OK.
    pub http_fallback: bool,
    pub verbose: bool,
}

pub fn resolve_dynamic(
    import_path: &str,
    fetcher: &dyn Fetcher,
    opts: DynamicOptions,
) -> Result<RepoRoot> {
    let host = import_path.split('/').next().unwrap_or(import_path);
    if !host.contains('.') {
        return Err(VanityError::NoHostname);
    }

    let (url, response) = https_or_http(import_path, fetcher, opts)
        .map_err(|e| VanityError::HttpsOrHttp(Box::new(e)))?;
    let imports = parse_meta_imports(&response.body);
    let import = match_meta_import(&imports, import_path)
        .map_err(|e| VanityError::MetaParse {
            url: url.clone(),
            detail: Box::new(e),
        })?
        .ok_or_else(|| VanityError::NoMetaMatch { url: url.clone() })?
        .clone();
    if opts.verbose {
        tracing::info!(
            import_path,
            prefix = %import.prefix,
            vcs = %import.vcs,
            repo = %import.repo_root,
            %url,
            "found meta tag"
        );
    }

    let url = if import.prefix != import_path {
        verify_prefix(import_path, &import, &url, fetcher, opts)?
    } else {
        url
    };

    validate_repo_root(&import.repo_root).map_err(|reason| VanityError::InvalidRepoRoot {
        url: url.clone(),
        repo: import.repo_root.clone(),
        reason,
    })?;

    let vcs = Vcs::by_cmd(&import.vcs).ok_or_else(|| VanityError::UnknownMetaVcs {
        url: url.clone(),
        vcs: import.vcs.clone(),
    })?;

    Ok(RepoRoot::new(vcs, import.repo_root, import.prefix))
}

/// A page for `a.org/x/y` claiming the prefix `a.org/x` could point anywhere,
/// so the claim must be confirmed by the page at `a.org/x` itself.
/// Returns the URL of the confirming page.
fn verify_prefix(
    import_path: &str,
    import: &MetaImport,
    first_url: &str,
    fetcher: &dyn Fetcher,
    opts: DynamicOptions,
) -> Result<String> {
    if opts.verbose {
        tracing::info!(
            import_path,
            prefix = %import.prefix,
            "verifying non-authoritative meta tag"
        );
    }

    let (url, response) = https_or_http(&import.prefix, fetcher, opts)
        .map_err(|e| VanityError::HttpsOrHttp(Box::new(e)))?;
    let imports = parse_meta_imports(&response.body);
    if imports.is_empty() {
        return Err(VanityError::NoMetaTags { url });
    }

    let confirmed = matches!(
        match_meta_import(&imports, import_path),
        Ok(Some(found)) if found == import
    );
    if !confirmed {
        return Err(VanityError::MetaDisagreement {
            first: first_url.to_string(),
            second: url,
            prefix: import.prefix.clone(),
        });
    }
    Ok(url)
}

/// Fetch the go-get page for `import_path`, returning the requested URL and
/// the response. Over HTTP any status is accepted, since a meta tag may be
/// served on an error page.
fn https_or_http(
    import_path: &str,
    fetcher: &dyn Fetcher,
    opts: DynamicOptions,
) -> Result<(String, FetchResponse)> {
    let https = go_get_url("https", import_path)?;
    if opts.verbose {
        tracing::info!(url = %https, "fetching");
    }
    match fetcher.get(&https) {
        Ok(response) if response.is_ok() || !opts.http_fallback => {
            return Ok((https, response));
        }
        Err(e) if !opts.http_fallback => return Err(e),
        Ok(response) => {
            if opts.verbose {
                tracing::info!(
                    status = response.status,
                    "ignoring https fetch with non-200 status"
                );
            }
        }
        Err(e) => {
            if opts.verbose {
                tracing::info!(error = %e, "https fetch failed");
            }
        }
    }

    let http = go_get_url("http", import_path)?;
    if opts.verbose {
        tracing::info!(url = %http, "fetching");
    }
    let response = fetcher.get(&http)?;
    if opts.verbose {
        tracing::info!(url = %http, status = response.status, "parsing meta tags");
    }
    Ok((http, response))
}

fn go_get_url(scheme: &str, import_path: &str) -> Result<String> {
    let raw = format!("{}://{}", scheme, import_path);
    let mut url = Url::parse(&raw).map_err(|e| VanityError::Fetch {
        url: raw.clone(),
        reason: e.to_string(),
    })?;
    url.set_query(Some("go-get=1"));
    Ok(url.to_string())
}

fn validate_repo_root(repo_root: &str) -> std::result::Result<(), String> {
    match Url::parse(repo_root) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Err("no scheme".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::memory::InMemoryFetcher;

    const OPTS: DynamicOptions = DynamicOptions {
        http_fallback: true,
        verbose: false,
    };

    fn page(prefix: &str, vcs: &str, repo: &str) -> String {
        format!(
            r#"<html><head><meta name="go-import" content="{} {} {}"></head><body>hi</body></html>"#,
            prefix, vcs, repo
        )
    }

    #[test]
    fn test_exact_prefix_over_https() {
        let fetcher = InMemoryFetcher::new().with_page(
            "https://example.com/foo?go-get=1",
            200,
            &page("example.com/foo", "git", "https://github.com/org/foo"),
        );
        let rr = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap();
        assert_eq!(
            rr,
            RepoRoot::new(Vcs::Git, "https://github.com/org/foo", "example.com/foo")
        );
        assert_eq!(fetcher.requests(), vec!["https://example.com/foo?go-get=1"]);
    }

    #[test]
    fn test_falls_back_to_http_and_accepts_404() {
        let fetcher = InMemoryFetcher::new().with_page(
            "http://example.com/foo?go-get=1",
            404,
            &page("example.com/foo", "hg", "https://hg.example.com/foo"),
        );
        let rr = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap();
        assert_eq!(rr.vcs, Vcs::Hg);
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://example.com/foo?go-get=1",
                "http://example.com/foo?go-get=1"
            ]
        );
    }

    #[test]
    fn test_non_200_https_triggers_fallback() {
        let fetcher = InMemoryFetcher::new()
            .with_page("https://example.com/foo?go-get=1", 500, "")
            .with_page(
                "http://example.com/foo?go-get=1",
                200,
                &page("example.com/foo", "git", "https://git.example.com/foo"),
            );
        let rr = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap();
        assert_eq!(rr.repo, "https://git.example.com/foo");
    }

    #[test]
    fn test_fallback_disabled_reports_https_error() {
        let fetcher = InMemoryFetcher::new().with_page(
            "http://example.com/foo?go-get=1",
            200,
            &page("example.com/foo", "git", "https://git.example.com/foo"),
        );
        let opts = DynamicOptions {
            http_fallback: false,
            ..OPTS
        };
        let err = resolve_dynamic("example.com/foo", &fetcher, opts).unwrap_err();
        assert_eq!(
            err.to_string(),
            "http/https fetch: https://example.com/foo?go-get=1: connection refused"
        );
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[test]
    fn test_no_hostname() {
        let err = resolve_dynamic("localpkg/sub", &InMemoryFetcher::new(), OPTS).unwrap_err();
        assert_eq!(err, VanityError::NoHostname);
    }

    #[test]
    fn test_no_matching_tag() {
        let fetcher = InMemoryFetcher::new().with_page(
            "https://example.com/foo?go-get=1",
            200,
            &page("other.com/bar", "git", "https://github.com/org/bar"),
        );
        let err = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse https://example.com/foo?go-get=1: no go-import meta tags"
        );
    }

    #[test]
    fn test_ambiguous_tags_name_the_page() {
        let body = r#"<head>
            <meta name="go-import" content="example.com/foo git https://github.com/org/foo">
            <meta name="go-import" content="example.com/foo/sub hg https://hg.example.com/sub">
        </head>"#;
        let fetcher =
            InMemoryFetcher::new().with_page("https://example.com/foo/sub?go-get=1", 200, body);
        let err = resolve_dynamic("example.com/foo/sub", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse https://example.com/foo/sub?go-get=1: \
             multiple meta tags match import path \"example.com/foo/sub\""
        );
    }

    #[test]
    fn test_subpackage_verifies_prefix() {
        let tag = page("example.com/foo", "git", "https://github.com/org/foo");
        let fetcher = InMemoryFetcher::new()
            .with_page("https://example.com/foo/sub?go-get=1", 200, &tag)
            .with_page("https://example.com/foo?go-get=1", 200, &tag);
        let rr = resolve_dynamic("example.com/foo/sub", &fetcher, OPTS).unwrap();
        assert_eq!(rr.root, "example.com/foo");
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://example.com/foo/sub?go-get=1",
                "https://example.com/foo?go-get=1"
            ]
        );
    }

    #[test]
    fn test_prefix_page_disagrees() {
        let fetcher = InMemoryFetcher::new()
            .with_page(
                "https://uni.edu/bob/project?go-get=1",
                200,
                &page("uni.edu", "git", "https://evilroot.com/x"),
            )
            .with_page(
                "https://uni.edu/?go-get=1",
                200,
                &page("uni.edu", "git", "https://uni.edu/real"),
            );
        let err = resolve_dynamic("uni.edu/bob/project", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "https://uni.edu/bob/project?go-get=1 and https://uni.edu/?go-get=1 disagree about go-import for uni.edu"
        );
    }

    #[test]
    fn test_prefix_page_without_tags() {
        let fetcher = InMemoryFetcher::new()
            .with_page(
                "https://example.com/foo/sub?go-get=1",
                200,
                &page("example.com/foo", "git", "https://github.com/org/foo"),
            )
            .with_page("https://example.com/foo?go-get=1", 200, "<html></html>");
        let err = resolve_dynamic("example.com/foo/sub", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "fetch https://example.com/foo?go-get=1: no go-import meta tag"
        );
    }

    #[test]
    fn test_relative_repo_root_rejected() {
        let fetcher = InMemoryFetcher::new().with_page(
            "https://example.com/foo?go-get=1",
            200,
            &page("example.com/foo", "git", "github.com/org/foo"),
        );
        let err = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err.to_string(),
            "https://example.com/foo?go-get=1: invalid repo root \"github.com/org/foo\": no scheme"
        );
    }

    #[test]
    fn test_unknown_vcs_rejected() {
        let fetcher = InMemoryFetcher::new().with_page(
            "https://example.com/foo?go-get=1",
            200,
            &page("example.com/foo", "fossil", "https://example.com/foo"),
        );
        let err = resolve_dynamic("example.com/foo", &fetcher, OPTS).unwrap_err();
        assert_eq!(
            err,
            VanityError::UnknownMetaVcs {
                url: "https://example.com/foo?go-get=1".into(),
                vcs: "fossil".into()
            }
        );
    }

    #[test]
    fn test_go_get_url_for_bare_host() {
        assert_eq!(
            go_get_url("https", "example.com").unwrap(),
            "https://example.com/?go-get=1"
        );
        assert_eq!(
            go_get_url("http", "example.com:8080/a/b").unwrap(),
            "http://example.com:8080/a/b?go-get=1"
        );
    }
}
