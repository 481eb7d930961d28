//! HTTP client wrapper for a single request.
//!
//! [`HttpClient`] turns a [`Config`] into a configured reqwest client
//! (timeout, TLS verification, redirect policy), builds the one outbound
//! request, and sends it.

use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder, Method, Request, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::FetchError;
use crate::user_agent;

/// HTTP client configured from a [`Config`].
///
/// # Example
///
/// ```no_run
/// use httpget_core::{Config, HttpClient, Silent};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::builder().url("https://example.com").build()?;
/// let client = HttpClient::new(&config, &mut Silent)?;
/// let request = client.build_request(&config)?;
/// let response = client.execute(request).await?;
/// println!("{}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds the client for `config`.
    ///
    /// Redirects are returned to the caller as-is unless
    /// [`Config::follow_redirects`] is set. The timeout, when present,
    /// bounds the whole exchange including the body.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if reqwest cannot build the client.
    pub fn new<D>(config: &Config, diagnostics: &mut D) -> Result<Self, FetchError>
    where
        D: Diagnostics + ?Sized,
    {
        let mut builder = base_client_builder(config);
        if config.insecure() {
            diagnostics.debug("tls configured with InsecureSkipVerify");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().map_err(FetchError::client_build)?;
        debug!(
            follow_redirects = config.follow_redirects(),
            insecure = config.insecure(),
            timeout = ?config.timeout(),
            "http client configured"
        );
        Ok(Self { client })
    }

    /// Builds the request for the configured method and URL, with no body.
    ///
    /// An empty method means `GET`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if the URL does not parse
    /// - [`FetchError::InvalidMethod`] if the method is not a valid token
    /// - [`FetchError::RequestBuild`] if reqwest rejects the combination
    pub fn build_request(&self, config: &Config) -> Result<Request, FetchError> {
        let url =
            Url::parse(config.url()).map_err(|e| FetchError::invalid_url(config.url(), e))?;
        let method = if config.method().is_empty() {
            Method::GET
        } else {
            Method::from_bytes(config.method().as_bytes())
                .map_err(|_| FetchError::invalid_method(config.method()))?
        };

        self.client
            .request(method, url)
            .build()
            .map_err(FetchError::request_build)
    }

    /// Sends `request` and waits for the response headers.
    ///
    /// Any status code is a successful response here, including 3xx when
    /// redirects are not followed and 4xx/5xx.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Transport`] on DNS, connect, TLS, redirect-loop
    /// or timeout failures.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        debug!("sending request");
        let response = self
            .client
            .execute(request)
            .await
            .map_err(FetchError::transport)?;
        debug!(status = %response.status(), final_url = %response.url(), "response received");
        Ok(response)
    }
}

fn base_client_builder(config: &Config) -> ClientBuilder {
    let mut builder = Client::builder()
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .redirect(redirect_policy(config.follow_redirects()));
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    builder
}

/// Redirect hops followed before giving up with a transport error.
const MAX_REDIRECTS: usize = 10;

fn redirect_policy(follow: bool) -> Policy {
    if follow {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Silent, Verbose};

    fn config_for(url: &str) -> Config {
        Config::builder().url(url).build().unwrap()
    }

    #[test]
    fn test_build_request_uses_method_and_url() {
        let config = Config::builder()
            .url("http://example.com/path?q=1")
            .method("DELETE")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let request = client.build_request(&config).unwrap();
        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(request.url().as_str(), "http://example.com/path?q=1");
        assert!(request.body().is_none());
    }

    #[test]
    fn test_build_request_keeps_extension_method_verbatim() {
        let config = Config::builder()
            .url("http://example.com")
            .method("purge")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let request = client.build_request(&config).unwrap();
        assert_eq!(request.method().as_str(), "purge");
    }

    #[test]
    fn test_build_request_rejects_malformed_url() {
        let config = config_for("ht!tp://");
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let err = client.build_request(&config).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(err.to_string().starts_with("invalid url: "), "{err}");
    }

    #[test]
    fn test_build_request_rejects_relative_url() {
        let config = config_for("example.com/path");
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let err = client.build_request(&config).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }

    #[test]
    fn test_build_request_empty_method_means_get() {
        let config = Config::builder()
            .url("http://example.com")
            .method("")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let request = client.build_request(&config).unwrap();
        assert_eq!(request.method(), &Method::GET);
    }

    #[test]
    fn test_build_request_rejects_invalid_method() {
        let config = Config::builder()
            .url("http://example.com")
            .method("GE T")
            .build()
            .unwrap();
        let client = HttpClient::new(&config, &mut Silent).unwrap();
        let err = client.build_request(&config).unwrap_err();
        assert!(matches!(err, FetchError::InvalidMethod { .. }));
        assert!(err.to_string().starts_with("invalid url: "), "{err}");
    }

    #[test]
    fn test_insecure_emits_tls_diagnostic() {
        let config = Config::builder()
            .url("https://example.com")
            .insecure(true)
            .build()
            .unwrap();
        let mut verbose = Verbose::new(Vec::new());
        HttpClient::new(&config, &mut verbose).unwrap();
        let output = String::from_utf8(verbose.into_inner()).unwrap();
        assert_eq!(output, "DEBUG: tls configured with InsecureSkipVerify\n");
    }

    #[test]
    fn test_secure_client_emits_no_diagnostic() {
        let config = config_for("https://example.com");
        let mut verbose = Verbose::new(Vec::new());
        HttpClient::new(&config, &mut verbose).unwrap();
        assert!(verbose.into_inner().is_empty());
    }
}
