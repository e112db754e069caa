use thiserror::Error;

/// Everything a controller call can fail with.
///
/// `unifigw-core` turns these into setup form errors or poll log lines;
/// nothing here knows which.
#[derive(Debug, Error)]
pub enum Error {
    /// Login rejected, or the session cookie is no longer accepted.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Connection, DNS, timeout or body-read failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Client construction failed, usually an unreadable CA bundle.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The controller answered but refused the request: a non-2xx status,
    /// `meta.rc != "ok"`, or a console error object.
    #[error("Legacy API error: {message}")]
    LegacyApi { message: String },

    /// Body was not the expected envelope. `body` keeps the raw text.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The handle has no such endpoint.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

impl Error {
    /// Credentials or session were rejected.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// No HTTP exchange happened: refused connection or timeout.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout() || e.is_connect())
    }
}
