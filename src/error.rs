use thiserror::Error;

/// Everything that can go wrong talking to the quiz service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// Transport failure: connect, timeout, broken body.
    #[error("network error: {0}")]
    Network(String),
    /// Service answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: &'static str, status: u16 },
    /// Body did not match the expected shape.
    #[error("unexpected response from {endpoint}: {detail}")]
    InvalidResponse {
        endpoint: &'static str,
        detail: String,
    },
    /// Service reported an error in its body (e.g. unknown topic).
    #[error("service error: {0}")]
    Service(String),
}

pub type Result<T> = std::result::Result<T, QuizError>;

impl From<reqwest::Error> for QuizError {
    fn from(err: reqwest::Error) -> Self {
        QuizError::Network(err.to_string())
    }
}
