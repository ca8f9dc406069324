//! Survey ingestion from a URL or a local file.

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::fetch::{BasicClient, HttpClient, fetch_bytes};
use crate::parser::parse_csv;
use crate::survey::{RawTable, require_columns};

/// Public GSS 2018 extract.
pub const DEFAULT_SOURCE: &str =
    "https://github.com/jkropko/DS-6001/raw/master/localdata/gss2018.csv";

/// Loads the raw survey table from `source`.
pub async fn load(source: &str) -> Result<RawTable> {
    load_with(&BasicClient::new(), source).await
}

/// Loads via `client` when `source` is an HTTP(S) URL, else from disk.
///
/// # Errors
///
/// [`PipelineError::DataUnavailable`] when the source cannot be read,
/// [`PipelineError::SchemaMismatch`] when the CSV is malformed or lacks a
/// required column.
#[tracing::instrument(skip(client))]
pub async fn load_with<C: HttpClient>(client: &C, source: &str) -> Result<RawTable> {
    let bytes = if is_remote(source) {
        fetch_bytes(client, source).await?
    } else {
        std::fs::read(source).map_err(|e| PipelineError::unavailable(source, e))?
    };

    let table = parse_csv(&bytes)?;
    require_columns(&table)?;

    info!(
        rows = table.len(),
        columns = table.headers().len(),
        "Survey table loaded"
    );
    Ok(table)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
