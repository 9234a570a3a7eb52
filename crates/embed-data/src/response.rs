//! Minimal HTTP response shape handed back by a transport.

use serde::de::DeserializeOwned;

use crate::FetchError;

/// An HTTP response: status plus raw body.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(Response::new(200, vec![]).is_success());
        assert!(Response::new(204, vec![]).is_success());
        assert!(!Response::new(301, vec![]).is_success());
        assert!(!Response::new(404, vec![]).is_success());
        assert!(!Response::new(500, vec![]).is_success());
    }

    #[test]
    fn test_json_parse_failure_is_malformed() {
        let resp = Response::new(200, b"not json".to_vec());
        let err = resp.json::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }
}
