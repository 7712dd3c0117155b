//! Supported version control systems.
//!
//! Each [`Vcs`] knows its command name, the URL schemes it can be reached
//! over (in the order they should be probed), and the sub-command used to
//! check that a remote repository answers.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vcs {
    Hg,
    Git,
    Svn,
    Bzr,
}

impl Vcs {
    /// All systems, in the order suffixes are checked.
    pub const ALL: [Vcs; 4] = [Vcs::Hg, Vcs::Git, Vcs::Svn, Vcs::Bzr];

    /// Human-readable name, e.g. "Mercurial".
    pub fn name(&self) -> &'static str {
        match self {
            Vcs::Hg => "Mercurial",
            Vcs::Git => "Git",
            Vcs::Svn => "Subversion",
            Vcs::Bzr => "Bazaar",
        }
    }

    /// Name of the executable, e.g. "hg".
    pub fn cmd(&self) -> &'static str {
        match self {
            Vcs::Hg => "hg",
            Vcs::Git => "git",
            Vcs::Svn => "svn",
            Vcs::Bzr => "bzr",
        }
    }

    pub fn schemes(&self) -> &'static [&'static str] {
        match self {
            Vcs::Hg => &["https", "http", "ssh"],
            Vcs::Git => &["git", "https", "http", "git+ssh"],
            Vcs::Svn => &["https", "http", "svn", "svn+ssh"],
            Vcs::Bzr => &["https", "http", "bzr", "bzr+ssh"],
        }
    }

    /// Sub-command that succeeds only if the remote repository exists.
    pub fn ping_subcommand(&self) -> &'static str {
        match self {
            Vcs::Hg => "identify",
            Vcs::Git => "ls-remote",
            Vcs::Svn | Vcs::Bzr => "info",
        }
    }

    pub fn by_cmd(cmd: &str) -> Option<Vcs> {
        Vcs::ALL.into_iter().find(|vcs| vcs.cmd() == cmd)
    }

    /// Returns the system whose `.cmd` suffix `repo` ends with, if any.
    pub fn suffix_of(repo: &str) -> Option<Vcs> {
        Vcs::ALL
            .into_iter()
            .find(|vcs| repo.ends_with(&format!(".{}", vcs.cmd())))
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_cmd() {
        assert_eq!(Vcs::by_cmd("git"), Some(Vcs::Git));
        assert_eq!(Vcs::by_cmd("hg"), Some(Vcs::Hg));
        assert_eq!(Vcs::by_cmd("svn"), Some(Vcs::Svn));
        assert_eq!(Vcs::by_cmd("bzr"), Some(Vcs::Bzr));
        assert_eq!(Vcs::by_cmd("Git"), None);
        assert_eq!(Vcs::by_cmd("fossil"), None);
    }

    #[test]
    fn test_suffix_of() {
        assert_eq!(Vcs::suffix_of("github.com/a/b.git"), Some(Vcs::Git));
        assert_eq!(Vcs::suffix_of("example.org/repo.hg"), Some(Vcs::Hg));
        assert_eq!(Vcs::suffix_of("github.com/a/gitrepo"), None);
    }

    #[test]
    fn test_git_probes_git_scheme_first() {
        assert_eq!(Vcs::Git.schemes()[0], "git");
        assert_eq!(Vcs::Hg.schemes()[0], "https");
    }

    #[test]
    fn test_display_uses_long_name() {
        assert_eq!(Vcs::Svn.to_string(), "Subversion");
    }
}
