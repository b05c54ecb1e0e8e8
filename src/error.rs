use thiserror::Error;

/// Coarse classification used by the retry policy.
///
/// Only timeouts are retried; every other upstream failure ends the logical
/// fetch immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Timeout,
    Other,
}

/// Failure of a single logical upstream request.
///
/// This type is `Clone` so that one failed fetch can be handed to every
/// caller that was waiting on the same in-flight request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Upstream timed out after {timeout_ms} ms: {url}")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Connection failed to: {url} - {message}")]
    Connection { url: String, message: String },

    #[error("Upstream resource not found (404): {url}")]
    NotFound { url: String },

    #[error("Upstream rate limit exceeded (429): {message} (URL: {url})")]
    RateLimit { message: String, url: String },

    #[error("Upstream client error ({status}): {message} (URL: {url})")]
    ClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Upstream server error ({status}): {message} (URL: {url})")]
    ServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Upstream service unavailable ({status}): {message} (URL: {url})")]
    ServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Upstream returned malformed JSON: {message} (URL: {url})")]
    MalformedJson { message: String, url: String },

    #[error("Upstream returned unexpected data structure: {message} (URL: {url})")]
    UnexpectedStructure { message: String, url: String },

    #[error("Upstream returned empty or missing data: {message} (URL: {url})")]
    NoData { message: String, url: String },

    #[error("Request to {url} failed: {message}")]
    Request { message: String, url: String },
}

impl UpstreamError {
    /// Create a timeout error for an attempt that exceeded its deadline
    pub fn timeout(url: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::Timeout {
            url: url.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create a connection error
    pub fn connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    pub fn rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a client error (4xx status codes except 404 and 429)
    pub fn client_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a server error (5xx status codes except 502 and 503)
    pub fn server_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
            url: url.into(),
        }
    }

    pub fn request(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Maps a status code that is known to be unsuccessful onto the matching variant
    pub fn from_status(status: u16, reason: &str, url: &str) -> Self {
        match status {
            404 => Self::not_found(url),
            429 => Self::rate_limit(reason, url),
            502 | 503 => Self::service_unavailable(status, reason, url),
            400..=499 => Self::client_error(status, reason, url),
            _ => Self::server_error(status, reason, url),
        }
    }

    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            Self::Timeout { .. } => UpstreamErrorKind::Timeout,
            _ => UpstreamErrorKind::Other,
        }
    }

    /// Check if error is eligible for another attempt within the same logical fetch
    pub fn is_timeout(&self) -> bool {
        self.kind() == UpstreamErrorKind::Timeout
    }

    /// Check if error indicates missing data rather than a technical failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoData { .. })
    }

    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Connection { url, .. }
            | Self::NotFound { url }
            | Self::RateLimit { url, .. }
            | Self::ClientError { url, .. }
            | Self::ServerError { url, .. }
            | Self::ServiceUnavailable { url, .. }
            | Self::MalformedJson { url, .. }
            | Self::UnexpectedStructure { url, .. }
            | Self::NoData { url, .. }
            | Self::Request { url, .. } => url,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),

    #[error("Match not found in current listing: {match_id}")]
    MatchNotFound { match_id: u64 },
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    pub fn match_not_found(match_id: u64) -> Self {
        Self::MatchNotFound { match_id }
    }

    /// Check if error is retryable (only upstream timeouts are)
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Upstream(e) if e.is_timeout())
    }

    /// Check if error indicates data not found (business logic, not technical error)
    pub fn is_not_found(&self) -> bool {
        match self {
            AppError::Upstream(e) => e.is_not_found(),
            AppError::MatchNotFound { .. } => true,
            _ => false,
        }
    }
}
