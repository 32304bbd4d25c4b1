//! Error taxonomy for remote data access.
//!
//! Credential decode failures never appear here: they degrade to the
//! least-privileged tier inside `reporta_core::resolve_tier` and are
//! not surfaced as errors. Everything that can go wrong past that
//! boundary is an [`ApiError`].

use thiserror::Error;

/// Errors produced by the console's remote data access.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection, timeout, bad TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the caller's tier (HTTP 403).
    #[error("Access denied. Only administrators and curators can access this resource.")]
    Forbidden,

    /// The console itself refused a sign-in from a non-staff account.
    #[error("This console is restricted to administrators and curators.")]
    StaffOnly,

    /// Any other non-success response, with the server's diagnostic
    /// text when the body carried one.
    #[error("API error: {status}{}", detail_suffix(.detail))]
    Api {
        status: u16,
        detail: Option<String>,
    },

    /// A response body that could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this failure is an authorization rejection rather than
    /// a source fault.
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden | Self::StaffOnly)
    }

    /// The HTTP status that produced this error, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Forbidden => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::StaffOnly | Self::Parse(_) => None,
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {d}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_detail() {
        let err = ApiError::Api {
            status: 500,
            detail: Some("division by zero in resolution query".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "API error: 500: division by zero in resolution query"
        );
    }

    #[test]
    fn test_api_error_display_without_detail() {
        let err = ApiError::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "API error: 502");
    }

    #[test]
    fn test_forbidden_is_authorization_rejection() {
        assert!(ApiError::Forbidden.is_forbidden());
        assert!(ApiError::StaffOnly.is_forbidden());
        assert!(
            !ApiError::Api {
                status: 500,
                detail: None
            }
            .is_forbidden()
        );
    }

    #[test]
    fn test_status_extraction() {
        assert_eq!(ApiError::Forbidden.status(), Some(403));
        assert_eq!(
            ApiError::Api {
                status: 404,
                detail: None
            }
            .status(),
            Some(404)
        );
        assert_eq!(ApiError::Parse("bad json".to_string()).status(), None);
    }
}
