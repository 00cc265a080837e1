use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (offline, DNS, CORS, aborted).
    #[error("transport failure: {0}")]
    Transport(String),
    /// A response arrived but its body was not the expected JSON.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The request could not be assembled on the client.
    #[error("invalid request: {0}")]
    Request(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
