mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::{PipelineError, Result};
use tracing::debug;

/// Downloads `url` and returns the response body.
///
/// Transport failures and non-success statuses are reported as
/// [`PipelineError::DataUnavailable`].
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let parsed = url
        .parse()
        .map_err(|e| PipelineError::unavailable(url, format!("invalid URL: {e}")))?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let resp = client
        .execute(req)
        .await
        .map_err(|e| PipelineError::unavailable(url, e))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(PipelineError::unavailable(url, format!("HTTP status {status}")));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| PipelineError::unavailable(url, e))?;
    debug!(url, bytes = bytes.len(), "Fetched source");
    Ok(bytes.to_vec())
}
