use crate::vcs::Vcs;

/// Where the source behind an import path actually lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRoot {
    pub vcs: Vcs,

    /// Repository URL, e.g. "https://github.com/org/repo"
    pub repo: String,

    /// Import path prefix corresponding to the repository root
    pub root: String,
}

impl RepoRoot {
    pub fn new(vcs: Vcs, repo: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            vcs,
            repo: repo.into(),
            root: root.into(),
        }
    }
}
