use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// The relevance filter and the sentiment classifier never produce one of these;
/// only the network-facing layers do.
#[derive(Debug, Error)]
pub enum PulseError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found at {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The upstream provider is throttling requests (HTTP 429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned 429.
        url: String,
    },

    /// The upstream provider failed (HTTP 5xx).
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The news provider answered with an error envelope (`"status": "error"`).
    #[error("News API error {code}: {message}")]
    Api {
        /// Provider error code, e.g. `apiKeyInvalid`.
        code: String,
        /// Human readable message.
        message: String,
    },

    /// An error occurred during the cookie and crumb handshake with Yahoo.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No news API key is configured on the client.
    #[error("no news API key configured")]
    MissingApiKey,

    /// No bearer token is configured for the social search endpoint.
    #[error("no social search bearer token configured")]
    MissingBearerToken,

    /// The polarity scorer could not score a piece of text.
    #[error("polarity scoring failed: {0}")]
    Scorer(String),

    /// A configuration value (environment variable, alias table, ...) is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

impl PulseError {
    /// Maps a non-success status code to the most specific variant.
    pub(crate) fn from_status(code: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        match code {
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            500..=599 => Self::ServerError { status: code, url },
            _ => Self::Status { status: code, url },
        }
    }
}
