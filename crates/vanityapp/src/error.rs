use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VanityError {
    #[error("invalid import path \"{0}\"")]
    InvalidImportPath(String),

    #[error("invalid {prefix} import path \"{path}\"")]
    InvalidHostPath { prefix: String, path: String },

    #[error("invalid version control suffix in {prefix} path")]
    InvalidVcsSuffix { prefix: String },

    #[error("unknown version control system \"{0}\"")]
    UnknownVcs(String),

    #[error("unable to detect version control system for bitbucket.org/ path")]
    BitbucketVcs,

    #[error("decoding {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("{url}: {}", status_text(*status))]
    HttpStatus { url: String, status: u16 },

    #[error("{url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("http/https fetch: {0}")]
    HttpsOrHttp(Box<VanityError>),

    #[error("import path doesn't contain a hostname")]
    NoHostname,

    #[error("multiple meta tags match import path \"{0}\"")]
    MultipleMetaMatches(String),

    #[error("parse {url}: {detail}")]
    MetaParse {
        url: String,
        detail: Box<VanityError>,
    },

    #[error("parse {url}: no go-import meta tags")]
    NoMetaMatch { url: String },

    #[error("fetch {url}: no go-import meta tag")]
    NoMetaTags { url: String },

    #[error("{first} and {second} disagree about go-import for {prefix}")]
    MetaDisagreement {
        first: String,
        second: String,
        prefix: String,
    },

    #[error("{url}: invalid repo root \"{repo}\": {reason}")]
    InvalidRepoRoot {
        url: String,
        repo: String,
        reason: String,
    },

    #[error("{url}: unknown vcs \"{vcs}\"")]
    UnknownMetaVcs { url: String, vcs: String },

    #[error("unrecognized import path \"{path}\": {detail}")]
    UnrecognizedImportPath {
        path: String,
        detail: Box<VanityError>,
    },

    #[error("cannot expand ... in \"{0}\"")]
    WildcardRoot(String),

    #[error("Client error: {0}")]
    Client(String),

    /// No well-known host matched; dynamic resolution should be tried.
    #[error("unknown site")]
    UnknownSite,
}

pub type Result<T> = std::result::Result<T, VanityError>;

/// `404 Not Found` style text, or the bare number for unregistered codes.
fn status_text(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status) {
        Ok(code) if code.canonical_reason().is_some() => code.to_string(),
        _ => status.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_includes_reason_phrase() {
        let err = VanityError::HttpStatus {
            url: "https://a.example/x".into(),
            status: 404,
        };
        assert_eq!(err.to_string(), "https://a.example/x: 404 Not Found");
    }

    #[test]
    fn test_http_status_unregistered_code() {
        let err = VanityError::HttpStatus {
            url: "https://a.example/x".into(),
            status: 599,
        };
        assert_eq!(err.to_string(), "https://a.example/x: 599");
    }
}
