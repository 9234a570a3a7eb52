//! Fetch error types.

use thiserror::Error;

/// Errors from fetching a page of a remote collection.
///
/// None of these crash the caller: the pagination engine treats any fetch
/// error as "this page attempt failed, do not advance, retry on the next
/// trigger". Nothing here retries automatically.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The service answered with an error body instead of a page.
    #[error("Service error: {0}")]
    Service(String),

    /// The response body was unparseable or had an unexpected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}
