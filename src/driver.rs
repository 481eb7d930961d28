//! The single request/response cycle.

use tokio::io::AsyncWrite;
use tracing::{debug, instrument};

use crate::client::HttpClient;
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::FetchError;
use crate::report::report;

/// Builds the client, sends one request, and reports the response to `out`.
///
/// The request is echoed through `diagnostics` before it is sent.
///
/// # Errors
///
/// Returns the first [`FetchError`] hit by any step; nothing is retried.
#[instrument(skip_all, fields(method = %config.method(), url = %config.url()))]
pub async fn run<W, D>(config: &Config, out: &mut W, diagnostics: &mut D) -> Result<(), FetchError>
where
    W: AsyncWrite + Unpin,
    D: Diagnostics + ?Sized,
{
    let client = HttpClient::new(config, diagnostics)?;
    let request = client.build_request(config)?;
    diagnostics.request(&request);

    let response = client.execute(request).await?;
    let bytes = report(response, config, out, diagnostics).await?;
    debug!(bytes, "fetch complete");
    Ok(())
}
