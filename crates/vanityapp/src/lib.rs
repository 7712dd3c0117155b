//! # Vanity Architecture
//!
//! Vanity resolves **vanity import paths** (`example.com/foo/bar`) to the
//! version-control repository that actually hosts the code
//! (`https://github.com/org/foo`). This crate is the UI-agnostic resolver;
//! the `vanity` binary is one thin client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (crates/vanity)                                        │
//! │  - Parses -url, prints the repo, owns stdout/stderr/exit    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ImportPathResolver trait, VanityApi facade               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Resolution (resolve/)                                      │
//! │  - known_hosts: static table (GitHub, Bitbucket, ...)       │
//! │  - dynamic + meta: go-import meta tags                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  I/O seams (fetch/, ping.rs)                                │
//! │  - Fetcher: HttpFetcher (prod), InMemoryFetcher (tests)     │
//! │  - VcsPinger: CommandPinger (prod), InMemoryPinger (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; whether they are shown is
//! the client's decision.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and resolver trait
//! - [`resolve`]: Static and dynamic resolution
//! - [`fetch`]: HTTP abstraction and implementations
//! - [`ping`]: VCS probing abstraction and implementations
//! - [`vcs`]: Supported version control systems
//! - [`model`]: `RepoRoot`
//! - [`config`]: Configuration
//! - [`init`]: Production wiring
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod init;
pub mod model;
pub mod ping;
pub mod resolve;
pub mod vcs;
