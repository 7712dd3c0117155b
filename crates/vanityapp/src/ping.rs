//! Probing remote repositories with their VCS tool.
//!
//! Generic `host/path.git`-style import paths do not say which URL scheme
//! serves the repository, so each candidate scheme is tried with the VCS's
//! own client (`git ls-remote`, `hg identify`, ...) until one answers.

use crate::error::{Result, VanityError};
use crate::vcs::Vcs;
use std::cell::RefCell;
use std::process::{Command, Stdio};

pub trait VcsPinger {
    /// Succeeds if `scheme://repo` is a reachable repository for `vcs`.
    fn ping(&self, vcs: Vcs, scheme: &str, repo: &str) -> Result<()>;
}

impl<P: VcsPinger + ?Sized> VcsPinger for &P {
    fn ping(&self, vcs: Vcs, scheme: &str, repo: &str) -> Result<()> {
        (**self).ping(vcs, scheme, repo)
    }
}

/// Runs the real VCS executable.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandPinger;

impl VcsPinger for CommandPinger {
    fn ping(&self, vcs: Vcs, scheme: &str, repo: &str) -> Result<()> {
        let url = format!("{}://{}", scheme, repo);
        tracing::debug!(cmd = vcs.cmd(), %url, "probing repository");

        let status = Command::new(vcs.cmd())
            .args([vcs.ping_subcommand(), url.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| VanityError::Fetch {
                url: url.clone(),
                reason: format!("running {}: {}", vcs.cmd(), e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(VanityError::Fetch {
                url,
                reason: format!("{} {} failed: {}", vcs.cmd(), vcs.ping_subcommand(), status),
            })
        }
    }
}

/// Pinger for tests: only the listed URLs answer. Every probe is recorded.
#[derive(Debug, Default)]
pub struct InMemoryPinger {
    reachable: Vec<String>,
    probes: RefCell<Vec<String>>,
}

impl InMemoryPinger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reachable(mut self, url: &str) -> Self {
        self.reachable.push(url.to_string());
        self
    }

    /// URLs probed so far, in order.
    pub fn probes(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }
}

impl VcsPinger for InMemoryPinger {
    fn ping(&self, _vcs: Vcs, scheme: &str, repo: &str) -> Result<()> {
        let url = format!("{}://{}", scheme, repo);
        self.probes.borrow_mut().push(url.clone());
        if self.reachable.contains(&url) {
            Ok(())
        } else {
            Err(VanityError::Fetch {
                url,
                reason: "unreachable".to_string(),
            })
        }
    }
}
