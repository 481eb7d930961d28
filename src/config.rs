//! Resolved options for one fetch.
//!
//! A [`Config`] is produced once by [`ConfigBuilder::build`] before any
//! network activity and is only read afterwards.

use std::time::Duration;

use tracing::debug;

use crate::duration::parse_duration;
use crate::error::FetchError;

/// HTTP method used when `-m` is not given.
pub const DEFAULT_METHOD: &str = "GET";

/// Timeout used when `-timeout` is not given.
pub const DEFAULT_TIMEOUT: &str = "10s";

/// Immutable options for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    method: String,
    url: String,
    verbose: bool,
    follow_redirects: bool,
    insecure: bool,
    timeout: Option<Duration>,
    summary: bool,
}

impl Config {
    /// Starts a builder with every option at its default.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// HTTP method, exactly as given.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Target URL, not yet parsed.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether verbose diagnostics are printed.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Whether 3xx responses are followed.
    #[must_use]
    pub fn follow_redirects(&self) -> bool {
        self.follow_redirects
    }

    /// Whether TLS certificate verification is skipped.
    #[must_use]
    pub fn insecure(&self) -> bool {
        self.insecure
    }

    /// Overall request deadline. `None` when the timeout is zero or negative.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Whether to print a one-line summary instead of the body.
    #[must_use]
    pub fn summary(&self) -> bool {
        self.summary
    }
}

/// Collects raw option values and resolves them into a [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    url: Option<String>,
    method: String,
    verbose: bool,
    follow_redirects: bool,
    insecure: bool,
    timeout: String,
    summary: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            url: None,
            method: DEFAULT_METHOD.to_string(),
            verbose: false,
            follow_redirects: false,
            insecure: false,
            timeout: DEFAULT_TIMEOUT.to_string(),
            summary: false,
        }
    }
}

impl ConfigBuilder {
    /// Sets the target URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Enables verbose diagnostics.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enables redirect following.
    #[must_use]
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Disables TLS certificate verification.
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Sets the timeout as a duration string such as `"10s"` or `"50ms"`.
    #[must_use]
    pub fn timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = timeout.into();
        self
    }

    /// Selects the one-line summary report.
    #[must_use]
    pub fn summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Resolves the collected values.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MissingUrl`] if no URL (or an empty one) was set
    /// - [`FetchError::InvalidTimeout`] if the timeout string does not parse
    pub fn build(self) -> Result<Config, FetchError> {
        let url = self
            .url
            .filter(|url| !url.is_empty())
            .ok_or(FetchError::MissingUrl)?;

        let timeout = parse_duration(&self.timeout)
            .map_err(FetchError::invalid_timeout)?
            .as_deadline();
        if timeout.is_none() {
            debug!(timeout = %self.timeout, "non-positive timeout, request has no deadline");
        }

        Ok(Config {
            method: self.method,
            url,
            verbose: self.verbose,
            follow_redirects: self.follow_redirects,
            insecure: self.insecure,
            timeout,
            summary: self.summary,
        })
    }
}
