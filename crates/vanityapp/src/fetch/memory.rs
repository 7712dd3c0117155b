use super::{FetchResponse, Fetcher};
use crate::error::{Result, VanityError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory fetcher for testing.
///
/// URLs without a registered page fail like an unreachable host. Every
/// requested URL is recorded so tests can assert on the order of requests.
/// Uses `RefCell` since resolution is single-threaded.
#[derive(Default)]
pub struct InMemoryFetcher {
    pages: HashMap<String, FetchResponse>,
    requests: RefCell<Vec<String>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, status: u16, body: &str) -> Self {
        self.pages
            .insert(url.to_string(), FetchResponse::new(url, status, body));
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Fetcher for InMemoryFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| VanityError::Fetch {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}
