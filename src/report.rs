//! Writing the received response to the output stream.

use futures_util::StreamExt;
use reqwest::Response;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::error::FetchError;

/// Reports `response` to `out` and consumes it.
///
/// With [`Config::summary`] set, a single line holding the response's debug
/// representation is written and the body is dropped unread. Otherwise the
/// response is echoed through `diagnostics` and the full body is streamed
/// to `out`.
///
/// Returns the number of body bytes written (zero for a summary).
///
/// # Errors
///
/// - [`FetchError::Transport`] if the deadline expires mid-body
/// - [`FetchError::Body`] if the body stream fails otherwise
/// - [`FetchError::Output`] if writing to `out` fails
pub async fn report<W, D>(
    response: Response,
    config: &Config,
    out: &mut W,
    diagnostics: &mut D,
) -> Result<u64, FetchError>
where
    W: AsyncWrite + Unpin,
    D: Diagnostics + ?Sized,
{
    if config.summary() {
        let line = format!("{response:?}\n");
        out.write_all(line.as_bytes())
            .await
            .map_err(FetchError::output)?;
        out.flush().await.map_err(FetchError::output)?;
        return Ok(0);
    }

    diagnostics.response(&response);
    stream_body(response, out).await
}

/// The deadline covers the whole exchange, so a timeout while reading the
/// body is reported like one while sending.
fn body_error(source: reqwest::Error) -> FetchError {
    if source.is_timeout() {
        FetchError::transport(source)
    } else {
        FetchError::body(source)
    }
}

/// Streams the response body to `out`, returning bytes written.
async fn stream_body<W>(response: Response, out: &mut W) -> Result<u64, FetchError>
where
    W: AsyncWrite + Unpin,
{
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(body_error)?;
        out.write_all(&chunk).await.map_err(FetchError::output)?;
        bytes_written += chunk.len() as u64;
    }

    out.flush().await.map_err(FetchError::output)?;
    debug!(bytes = bytes_written, "response body written");
    Ok(bytes_written)
}
