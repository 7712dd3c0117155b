//! # Fetch Layer
//!
//! Everything the resolver learns from the network goes through the
//! [`Fetcher`] trait: a plain HTTP GET that reports the final URL, the status
//! code and the body text.
//!
//! ## Implementations
//!
//! - [`http::HttpFetcher`]: production fetcher backed by a blocking
//!   `reqwest` client.
//! - [`memory::InMemoryFetcher`]: canned responses keyed by URL, for tests.
//!
//! Keeping the network behind a trait lets the resolution logic be tested
//! without sockets, and leaves room for other transports.

use crate::error::{Result, VanityError};

pub mod http;
pub mod memory;

/// Response to a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

pub trait Fetcher {
    /// GET `url`. Transport failures are errors; any HTTP status is a response.
    fn get(&self, url: &str) -> Result<FetchResponse>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        (**self).get(url)
    }
}

/// GET `url` and insist on a 200 response, returning the body.
pub fn get_ok<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Result<String> {
    let response = fetcher.get(url)?;
    if !response.is_ok() {
        return Err(VanityError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use super::memory::InMemoryFetcher;
    use super::*;

    #[test]
    fn test_get_ok_returns_body() {
        let fetcher = InMemoryFetcher::new().with_page("https://a.example/x", 200, "hello");
        assert_eq!(get_ok(&fetcher, "https://a.example/x").unwrap(), "hello");
    }

    #[test]
    fn test_get_ok_rejects_non_200() {
        let fetcher = InMemoryFetcher::new().with_page("https://a.example/x", 404, "nope");
        let err = get_ok(&fetcher, "https://a.example/x").unwrap_err();
        assert_eq!(
            err,
            VanityError::HttpStatus {
                url: "https://a.example/x".into(),
                status: 404
            }
        );
        assert_eq!(err.to_string(), "https://a.example/x: 404 Not Found");
    }
}
