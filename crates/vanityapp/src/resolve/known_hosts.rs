//! Static resolution for well-known code hosts.
//!
//! Hosts like GitHub encode the repository in the import path itself, so no
//! meta tag lookup is needed. Each [`KnownHost`] pairs a path pattern with a
//! repository URL template and an optional check that can consult the
//! network (Bitbucket's API, Launchpad's branch layout) to refine the match.
//!
//! The final catch-all entry accepts any `host/path.<vcs>` import path and
//! discovers the scheme by probing the repository with its VCS tool.

use crate::error::{Result, VanityError};
use crate::fetch::{get_ok, Fetcher};
use crate::model::RepoRoot;
use crate::ping::VcsPinger;
use crate::vcs::Vcs;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

type Check = fn(&mut HostMatch, &dyn Fetcher) -> Result<()>;

struct KnownHost {
    prefix: &'static str,
    pattern: Regex,
    /// VCS command name; `None` leaves it to the pattern or the check.
    vcs: Option<&'static str>,
    /// Repository template; `None` takes the `repo` capture verbatim.
    repo: Option<&'static str>,
    check: Option<Check>,
    ping: bool,
}

/// Named values produced by matching an import path against a host pattern.
#[derive(Debug)]
struct HostMatch {
    prefix: &'static str,
    values: HashMap<String, String>,
}

impl HostMatch {
    fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    fn set(&mut self, name: &str, value: String) {
        self.values.insert(name.to_string(), value);
    }

    /// Replace every `{name}` in `template` with the matched value.
    fn expand(&self, template: &str) -> String {
        let mut out = template.to_string();
        for (name, value) in &self.values {
            out = out.replace(&format!("{{{}}}", name), value);
        }
        out
    }
}

static KNOWN_HOSTS: Lazy<Vec<KnownHost>> = Lazy::new(|| {
    vec![
        KnownHost {
            prefix: "github.com/",
            pattern: Regex::new(
                r"^(?P<root>github\.com/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)(/[\p{L}0-9_.\-]+)*$",
            )
            .unwrap(),
            vcs: Some("git"),
            repo: Some("https://{root}"),
            check: Some(no_vcs_suffix),
            ping: false,
        },
        KnownHost {
            prefix: "bitbucket.org/",
            pattern: Regex::new(
                r"^(?P<root>bitbucket\.org/(?P<bitname>[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+))(/[A-Za-z0-9_.\-]+)*$",
            )
            .unwrap(),
            vcs: None,
            repo: Some("https://{root}"),
            check: Some(bitbucket_vcs),
            ping: false,
        },
        KnownHost {
            prefix: "launchpad.net/",
            pattern: Regex::new(
                r"^(?P<root>launchpad\.net/((?P<project>[A-Za-z0-9_.\-]+)(?P<series>/[A-Za-z0-9_.\-]+)?|~[A-Za-z0-9_.\-]+/(\+junk|[A-Za-z0-9_.\-]+)/[A-Za-z0-9_.\-]+))(/[A-Za-z0-9_.\-]+)*$",
            )
            .unwrap(),
            vcs: Some("bzr"),
            repo: Some("https://{root}"),
            check: Some(launchpad_vcs),
            ping: false,
        },
        KnownHost {
            prefix: "git.openstack.org",
            pattern: Regex::new(
                r"^(?P<root>git\.openstack\.org/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)(\.git)?(/[A-Za-z0-9_.\-]+)*$",
            )
            .unwrap(),
            vcs: Some("git"),
            repo: Some("https://{root}"),
            check: None,
            ping: false,
        },
        // Any server, as long as the path names the VCS: host/path.git
        KnownHost {
            prefix: "",
            pattern: Regex::new(
                r"^(?P<root>(?P<repo>([a-z0-9.\-]+\.)+[a-z0-9.\-]+(:[0-9]+)?/[A-Za-z0-9_.\-/]*?)\.(?P<vcs>bzr|git|hg|svn))(/[A-Za-z0-9_.\-]+)*$",
            )
            .unwrap(),
            vcs: None,
            repo: None,
            check: None,
            ping: true,
        },
    ]
});

/// Resolve `import_path` against the table of well-known hosts.
///
/// Returns [`VanityError::UnknownSite`] when no host applies. A forced
/// `scheme` skips probing for hosts that would otherwise ping.
pub fn resolve_static(
    import_path: &str,
    scheme: Option<&str>,
    fetcher: &dyn Fetcher,
    pinger: &dyn VcsPinger,
) -> Result<RepoRoot> {
    if import_path.contains("://") {
        return Err(VanityError::InvalidImportPath(import_path.to_string()));
    }

    for host in KNOWN_HOSTS.iter() {
        if !import_path.starts_with(host.prefix) {
            continue;
        }
        let Some(caps) = host.pattern.captures(import_path) else {
            if !host.prefix.is_empty() {
                return Err(VanityError::InvalidHostPath {
                    prefix: host.prefix.to_string(),
                    path: import_path.to_string(),
                });
            }
            continue;
        };

        let mut m = HostMatch {
            prefix: host.prefix,
            values: HashMap::new(),
        };
        for name in host.pattern.capture_names().flatten() {
            let value = caps.name(name).map_or("", |c| c.as_str());
            m.set(name, value.to_string());
        }
        if let Some(vcs) = host.vcs {
            let vcs = m.expand(vcs);
            m.set("vcs", vcs);
        }
        if let Some(repo) = host.repo {
            let repo = m.expand(repo);
            m.set("repo", repo);
        }
        if let Some(check) = host.check {
            check(&mut m, fetcher)?;
        }

        let vcs = Vcs::by_cmd(m.get("vcs"))
            .ok_or_else(|| VanityError::UnknownVcs(m.get("vcs").to_string()))?;

        if host.ping {
            let repo = m.get("repo").to_string();
            match scheme {
                Some(scheme) => m.set("repo", format!("{}://{}", scheme, repo)),
                None => {
                    if let Some(found) = vcs
                        .schemes()
                        .iter()
                        .find(|s| pinger.ping(vcs, s, &repo).is_ok())
                    {
                        m.set("repo", format!("{}://{}", found, repo));
                    }
                }
            }
        }

        return Ok(RepoRoot::new(vcs, m.get("repo"), m.get("root")));
    }

    Err(VanityError::UnknownSite)
}

fn no_vcs_suffix(m: &mut HostMatch, _fetcher: &dyn Fetcher) -> Result<()> {
    if Vcs::suffix_of(m.get("repo")).is_some() {
        return Err(VanityError::InvalidVcsSuffix {
            prefix: m.prefix.to_string(),
        });
    }
    Ok(())
}

#[derive(Deserialize)]
struct BitbucketRepo {
    #[serde(default)]
    scm: String,
}

fn bitbucket_vcs(m: &mut HostMatch, fetcher: &dyn Fetcher) -> Result<()> {
    no_vcs_suffix(m, fetcher)?;

    let url = m.expand("https://api.bitbucket.org/2.0/repositories/{bitname}?fields=scm");
    let body = get_ok(fetcher, &url)?;
    let repo: BitbucketRepo = serde_json::from_str(&body).map_err(|e| VanityError::Decode {
        url: url.clone(),
        reason: e.to_string(),
    })?;

    let vcs = Vcs::by_cmd(&repo.scm).ok_or(VanityError::BitbucketVcs)?;
    m.set("vcs", vcs.cmd().to_string());
    if vcs == Vcs::Git {
        let repo = format!("{}.git", m.get("repo"));
        m.set("repo", repo);
    }
    Ok(())
}

/// Launchpad paths like `launchpad.net/project/series` are ambiguous: the
/// second element may be a series or a package inside the project. If no
/// branch exists at the series, the project itself is the root.
fn launchpad_vcs(m: &mut HostMatch, fetcher: &dyn Fetcher) -> Result<()> {
    if m.get("project").is_empty() || m.get("series").is_empty() {
        return Ok(());
    }
    let url = m.expand("https://code.launchpad.net/{project}{series}/.bzr/branch-format");
    if get_ok(fetcher, &url).is_err() {
        let root = m.expand("launchpad.net/{project}");
        m.set("repo", format!("https://{}", root));
        m.set("root", root);
    }
    Ok(())
}
