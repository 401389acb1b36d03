use thiserror::Error;

/// Top-level error type for the `slnet-api` crate.
///
/// Covers every failure a service call can produce: authentication,
/// transport, remote API faults, and response decoding. `slnet-core`
/// passes these through to its callers untouched.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Username / API key rejected by the endpoint.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Remote API ──────────────────────────────────────────────────
    /// Fault raised by the remote service, parsed from `{"error", "code"}`.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        message: String,
        /// Exception class reported by the service (e.g. `SoftLayer_Exception_ObjectNotFound`).
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the credentials were rejected.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::Authentication { .. } => true,
            Self::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    ///
    /// Server faults carrying a `SoftLayer_Exception*` code are application
    /// errors reported as 5xx and are never transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            Self::Api { status, code, .. } => {
                *status >= 500
                    && !code
                        .as_deref()
                        .is_some_and(|c| c.starts_with("SoftLayer_Exception"))
            }
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            Self::Api { code: Some(code), .. } => code.ends_with("ObjectNotFound"),
            _ => false,
        }
    }

    /// Extract the remote exception code, if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_not_found_code_counts_as_not_found() {
        let err = Error::Api {
            message: "Unable to find object with id of '5'.".into(),
            code: Some("SoftLayer_Exception_ObjectNotFound".into()),
            status: 500,
        };
        assert!(err.is_not_found());
        assert_eq!(err.api_error_code(), Some("SoftLayer_Exception_ObjectNotFound"));
    }

    #[test]
    fn server_faults_are_transient() {
        let err = Error::Api {
            message: "Internal Error".into(),
            code: None,
            status: 503,
        };
        assert!(err.is_transient());
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn application_faults_are_not_transient() {
        let err = Error::Api {
            message: "Unable to place order: price 1234 is not valid.".into(),
            code: Some("SoftLayer_Exception_Public".into()),
            status: 500,
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn timeouts_are_transient() {
        assert!(Error::Timeout { timeout_secs: 30 }.is_transient());
    }

    #[test]
    fn authentication_is_not_transient() {
        let err = Error::Authentication {
            message: "Invalid API token.".into(),
        };
        assert!(err.is_auth_failure());
        assert!(!err.is_transient());
    }
}
