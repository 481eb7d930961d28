//! Error types for a single fetch.
//!
//! Every failure in the tool maps to one [`FetchError`] variant. The
//! `Display` text is the exact message printed to the user before exit.

use std::error::Error as StdError;

use thiserror::Error;

use crate::duration::DurationError;

/// Errors that can end a fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No target URL was given on the command line.
    #[error("url argument must be present")]
    MissingUrl,

    /// The `-timeout` value is not a valid duration.
    #[error("parsing timeout: {source}")]
    InvalidTimeout {
        /// The underlying parse failure.
        #[source]
        source: DurationError,
    },

    /// The HTTP client could not be constructed (TLS backend, resolver).
    #[error("building http client: {}", render_chain(.source))]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The target URL could not be parsed.
    #[error("invalid url: {source}")]
    InvalidUrl {
        /// The rejected URL text.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// The `-m` value is not a valid HTTP method token.
    #[error("invalid url: invalid HTTP method {method:?}")]
    InvalidMethod {
        /// The rejected method text.
        method: String,
    },

    /// The request could not be assembled from a parsed URL and method.
    #[error("invalid url: {}", render_chain(.source))]
    RequestBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Network, TLS, or redirect failure while sending, or deadline expiry
    /// at any point of the exchange.
    #[error("error performing request: {}", render_chain(.source))]
    Transport {
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body stream failed part way through.
    #[error("error reading response body: {}", render_chain(.source))]
    Body {
        /// The underlying stream error.
        #[source]
        source: reqwest::Error,
    },

    /// Writing the response to standard output failed.
    #[error("error writing output: {source}")]
    Output {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Creates a timeout parse error.
    #[must_use]
    pub fn invalid_timeout(source: DurationError) -> Self {
        Self::InvalidTimeout { source }
    }

    /// Creates a client construction error.
    #[must_use]
    pub fn client_build(source: reqwest::Error) -> Self {
        Self::ClientBuild { source }
    }

    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid method error.
    #[must_use]
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidMethod {
            method: method.into(),
        }
    }

    /// Creates a request construction error.
    #[must_use]
    pub fn request_build(source: reqwest::Error) -> Self {
        Self::RequestBuild { source }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(source: reqwest::Error) -> Self {
        Self::Transport { source }
    }

    /// Creates a body stream error.
    #[must_use]
    pub fn body(source: reqwest::Error) -> Self {
        Self::Body { source }
    }

    /// Creates an output write error.
    #[must_use]
    pub fn output(source: std::io::Error) -> Self {
        Self::Output { source }
    }

    /// Short name of the variant, used by verbose diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingUrl => "FetchError::MissingUrl",
            Self::InvalidTimeout { .. } => "FetchError::InvalidTimeout",
            Self::ClientBuild { .. } => "FetchError::ClientBuild",
            Self::InvalidUrl { .. } => "FetchError::InvalidUrl",
            Self::InvalidMethod { .. } => "FetchError::InvalidMethod",
            Self::RequestBuild { .. } => "FetchError::RequestBuild",
            Self::Transport { .. } => "FetchError::Transport",
            Self::Body { .. } => "FetchError::Body",
            Self::Output { .. } => "FetchError::Output",
        }
    }

    /// Returns true if the request or body read hit the configured deadline.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport { source } | Self::Body { source } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Renders an error and its source chain as `outer: inner: root`.
///
/// reqwest keeps the useful part (connection refused, certificate
/// rejected, timed out) in the source chain rather than its own message.
fn render_chain(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !rendered.ends_with(&text) {
            rendered.push_str(": ");
            rendered.push_str(&text);
        }
        current = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn test_missing_url_message_is_exact() {
        assert_eq!(
            FetchError::MissingUrl.to_string(),
            "url argument must be present"
        );
    }

    #[test]
    fn test_invalid_timeout_message_prefix() {
        let err = FetchError::invalid_timeout(DurationError::MissingUnit {
            input: "10".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "parsing timeout: missing unit in duration \"10\""
        );
        assert_eq!(err.kind(), "FetchError::InvalidTimeout");
    }

    #[test]
    fn test_invalid_url_message_prefix() {
        let source = url::Url::parse("ht!tp://").unwrap_err();
        let err = FetchError::invalid_url("ht!tp://", source);
        assert!(err.to_string().starts_with("invalid url: "), "{err}");
    }

    #[test]
    fn test_invalid_method_shares_invalid_url_prefix() {
        let err = FetchError::invalid_method("GE T");
        assert_eq!(err.to_string(), "invalid url: invalid HTTP method \"GE T\"");
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_output_error_message() {
        let err = FetchError::output(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "pipe closed",
        ));
        assert_eq!(err.to_string(), "error writing output: pipe closed");
        assert_eq!(err.kind(), "FetchError::Output");
    }

    #[test]
    fn test_render_chain_joins_sources() {
        assert_eq!(render_chain(&Outer(Inner)), "outer: inner");
    }
}
