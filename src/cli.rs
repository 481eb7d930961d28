//! CLI argument definitions using clap derive macros.

use std::ffi::OsString;

use clap::{ArgAction, Parser};
use tracing::debug;

use httpget_core::{Config, DEFAULT_METHOD, DEFAULT_TIMEOUT, FetchError};

/// Multi-letter flags that may be written with a single dash (`-follow`).
const LONG_FLAGS: &[&str] = &["follow", "insecure", "timeout", "summary", "help", "version"];

/// Single-letter flags that may be written with two dashes (`--v`).
const SHORT_FLAGS: &[&str] = &["v", "m", "h"];

/// Issue a single HTTP request and print the response.
///
/// Flags may be written with one or two dashes (`-follow`, `--follow`), and
/// values may follow an `=` (`-timeout=500ms`). Boolean flags take an
/// optional `=true`/`=false` (`-follow=false`).
#[derive(Parser, Debug)]
#[command(name = "httpget")]
#[command(author, version, about)]
#[command(args_override_self = true)]
#[command(override_usage = "httpget [-v] [-m METHOD] [-follow] [-insecure] [-timeout DURATION] [-summary] <URL>")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short = 'v', action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true",
          value_name = "BOOL", value_parser = parse_flag_bool)]
    pub verbose: bool,

    /// HTTP method
    #[arg(short = 'm', value_name = "METHOD", default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Follow redirects
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true",
          value_name = "BOOL", value_parser = parse_flag_bool)]
    pub follow: bool,

    /// Allow insecure HTTPS connections
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true",
          value_name = "BOOL", value_parser = parse_flag_bool)]
    pub insecure: bool,

    /// Timeout for the http client (e.g. 10s, 500ms, 1m30s; 0 disables)
    #[arg(long, value_name = "DURATION", default_value = DEFAULT_TIMEOUT, allow_hyphen_values = true)]
    pub timeout: String,

    /// Print a one-line response summary instead of the body
    #[arg(long, action = ArgAction::Set, num_args = 0..=1, require_equals = true,
          default_value = "false", default_missing_value = "true",
          value_name = "BOOL", value_parser = parse_flag_bool)]
    pub summary: bool,

    /// Target URL
    pub url: Option<String>,

    /// Arguments after the URL are ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,
}

impl Args {
    /// Resolves the parsed flags into an immutable [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingUrl`] or [`FetchError::InvalidTimeout`].
    pub fn into_config(self) -> Result<Config, FetchError> {
        if !self.extra.is_empty() {
            debug!(ignored = ?self.extra, "ignoring arguments after the URL");
        }

        let mut builder = Config::builder()
            .method(self.method)
            .verbose(self.verbose)
            .follow_redirects(self.follow)
            .insecure(self.insecure)
            .timeout(self.timeout)
            .summary(self.summary);
        if let Some(url) = self.url {
            builder = builder.url(url);
        }
        builder.build()
    }
}

/// Parses an explicit boolean flag value (`-follow=false`).
///
/// Accepts the spellings `1`, `t`, `T`, `TRUE`, `true`, `True` and their
/// false counterparts.
fn parse_flag_bool(value: &str) -> Result<bool, String> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(format!("invalid boolean value {value:?}")),
    }
}

/// Rewrites single-dash long flags into the form clap expects.
///
/// `-follow` becomes `--follow`, `-timeout=5s` becomes `--timeout=5s` and
/// `--v` becomes `-v`. Other tokens pass through untouched. Rewriting stops
/// at a `--` terminator. The first element (program name) is never rewritten.
pub fn normalize_flag_syntax<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut terminated = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(index, arg)| {
            if index == 0 || terminated {
                return arg;
            }
            if arg == "--" {
                terminated = true;
                return arg;
            }
            arg.to_str()
                .and_then(rewrite_flag)
                .map_or(arg, OsString::from)
        })
        .collect()
}

fn rewrite_flag(arg: &str) -> Option<String> {
    let body = arg
        .strip_prefix("--")
        .or_else(|| arg.strip_prefix('-'))
        .filter(|body| !body.is_empty() && !body.starts_with('-'))?;
    let name = body.split_once('=').map_or(body, |(name, _)| name);

    if LONG_FLAGS.contains(&name) {
        Some(format!("--{body}"))
    } else if SHORT_FLAGS.contains(&name) {
        Some(format!("-{body}"))
    } else {
        None
    }
}
