//! Default User-Agent for outgoing requests.

/// Product token sent with every request.
const PRODUCT: &str = "httpget";

/// Default User-Agent (identifies the tool and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version}")
}
