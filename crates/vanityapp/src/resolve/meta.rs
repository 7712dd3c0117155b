//! `go-import` meta tag discovery.
//!
//! A vanity host serves an HTML page containing
//!
//! ```text
//! <meta name="go-import" content="example.com/foo git https://github.com/org/foo">
//! ```
//!
//! The three content fields are the import prefix, the VCS command name and
//! the repository root URL. Pages are frequently sloppy HTML, so the scanner
//! is lenient: it only looks at start and end tags, ignores comments, and
//! stops as soon as the document head is over.

use crate::error::{Result, VanityError};
use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*(/?)\s*([A-Za-z][A-Za-z0-9:-]*)([^>]*)>").unwrap());

static ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaImport {
    pub prefix: String,
    pub vcs: String,
    pub repo_root: String,
}

/// Collect every well-formed go-import tag in the head of `html`.
pub fn parse_meta_imports(html: &str) -> Vec<MetaImport> {
    let html = COMMENT.replace_all(html, "");
    let mut imports = Vec::new();

    for tag in TAG.captures_iter(&html) {
        let closing = !tag[1].is_empty();
        let name = tag[2].to_ascii_lowercase();

        if (closing && name == "head") || (!closing && name == "body") {
            break;
        }
        if closing || name != "meta" {
            continue;
        }

        let attrs = &tag[3];
        if attr_value(attrs, "name").as_deref() != Some("go-import") {
            continue;
        }
        let Some(content) = attr_value(attrs, "content") else {
            continue;
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        if let [prefix, vcs, repo_root] = fields.as_slice() {
            imports.push(MetaImport {
                prefix: prefix.to_string(),
                vcs: vcs.to_string(),
                repo_root: repo_root.to_string(),
            });
        }
    }

    imports
}

/// Pick the single import whose prefix covers `import_path`.
///
/// Returns `Ok(None)` when nothing matches.
pub fn match_meta_import<'a>(
    imports: &'a [MetaImport],
    import_path: &str,
) -> Result<Option<&'a MetaImport>> {
    let mut found = None;
    for import in imports {
        if !import_path.starts_with(&import.prefix) {
            continue;
        }
        if found.is_some() {
            return Err(VanityError::MultipleMetaMatches(import_path.to_string()));
        }
        found = Some(import);
    }
    Ok(found)
}

fn attr_value(attrs: &str, wanted: &str) -> Option<String> {
    ATTR.captures_iter(attrs).find_map(|cap| {
        if !cap[1].eq_ignore_ascii_case(wanted) {
            return None;
        }
        let raw = cap
            .get(2)
            .or_else(|| cap.get(3))
            .or_else(|| cap.get(4))
            .map_or("", |m| m.as_str());
        Some(decode_entities(raw))
    })
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
