use clap::Parser;
use std::ffi::OsString;

/// Long flags that may also be spelled with a single dash (`-url`).
const LONG_FLAGS: &[&str] = &["url", "verbose", "help", "version"];

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.0" for releases, "0.3.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "vanity", bin_name = "vanity", version = get_version())]
#[command(about = "Print the repository that hosts a vanity import path", long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// The vanity url to resolve
    #[arg(long, default_value = "")]
    pub url: String,

    /// Log each resolution step to stderr
    #[arg(long, hide = true)]
    pub verbose: bool,

    /// Arguments after the flags; accepted and ignored.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<OsString>,
}

pub fn parse_cli() -> Cli {
    Cli::parse_from(normalize_args(std::env::args_os()))
}

/// Rewrite single-dash long flags (`-url x`, `-url=x`) to their double-dash
/// form so both spellings parse.
///
/// Flag parsing ends at `--` or at the first argument that is not a flag
/// (including a lone `-`). A `--` is inserted there so everything after it,
/// flag-like or not, lands in [`Cli::rest`].
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut flags_done = false;
    let mut takes_value = false;

    for (i, arg) in args.into_iter().enumerate() {
        if i == 0 || flags_done {
            out.push(arg);
            continue;
        }
        if takes_value {
            takes_value = false;
            out.push(arg);
            continue;
        }
        if arg == "--" {
            flags_done = true;
            out.push(arg);
            continue;
        }

        let text = arg.to_string_lossy().into_owned();
        if !text.starts_with('-') || text == "-" {
            flags_done = true;
            out.push(OsString::from("--"));
            out.push(arg);
            continue;
        }

        let body = text.trim_start_matches('-');
        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };
        takes_value = name == "url" && !inline_value;

        let single_dash = !text.starts_with("--");
        if single_dash && LONG_FLAGS.contains(&name) {
            out.push(OsString::from(format!("-{}", text)));
        } else {
            out.push(arg);
        }
    }

    out
}
