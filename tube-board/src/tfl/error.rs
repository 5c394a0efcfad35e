//! TfL client error types.

/// Errors from fetching or decoding TfL API responses.
#[derive(Debug, thiserror::Error)]
pub enum TflError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API key rejected
    #[error("unauthorized: check TFL_APP_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by TfL API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Mock data missing or unreadable
    #[error("mock data error: {message}")]
    Mock { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TflError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized: check TFL_APP_KEY");

        let err = TflError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = TflError::Json {
            message: "expected a sequence".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("expected a sequence"));
    }
}
