//! Plan and detail service error types.

/// Errors from the plan and detail service client.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Service returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the service
    #[error("rate limited by trip planning service")]
    RateLimited,

    /// Client is shutting down
    #[error("client closed")]
    Closed,
}
