// ── Sync failure types ──
//
// The caller-facing failure of one synchronization. Serializes to the
// boundary's `{ error, details?, status? }` body; the kind drives the
// HTTP status and CLI exit code but is not part of the body itself.
// The `From<possync_api::Error>` impl classifies transport-layer errors.

use serde::Serialize;
use strum::{AsRefStr, Display};
use thiserror::Error;

/// Classification of a failed synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Username or password absent/empty. No network call was made.
    MissingCredentials,
    /// StoreHub could not be reached (connect failure, DNS, timeout).
    UpstreamUnreachable,
    /// StoreHub answered the required call with a non-success status or
    /// an unparseable body.
    UpstreamRejected,
    /// Anything else.
    InternalError,
}

/// A structured sync failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct SyncFailure {
    #[serde(skip)]
    pub kind: ErrorKind,

    #[serde(rename = "error")]
    pub message: String,

    /// Upstream body or transport detail for diagnosis. Never holds credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Upstream HTTP status, when StoreHub answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl SyncFailure {
    pub fn missing_credentials() -> Self {
        Self {
            kind: ErrorKind::MissingCredentials,
            message: "Missing StoreHub credentials".into(),
            details: Some("storehub_username and storehub_password are required".into()),
            status: None,
        }
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InternalError,
            message: "Internal error".into(),
            details: Some(details.into()),
            status: None,
        }
    }

    /// Classify a failed call for `resource` into a caller-facing failure.
    pub fn from_api(resource: &str, err: possync_api::Error) -> Self {
        use possync_api::Error as ApiError;

        let message = format!("Failed to fetch {resource} from StoreHub");
        match err {
            ApiError::Transport(ref e) => Self {
                kind: ErrorKind::UpstreamUnreachable,
                message,
                details: Some(if e.is_timeout() {
                    format!("request timed out: {err}")
                } else {
                    err.to_string()
                }),
                status: None,
            },
            ApiError::Http { status, body } => Self {
                kind: ErrorKind::UpstreamRejected,
                message,
                details: Some(body),
                status: Some(status),
            },
            ApiError::Deserialization { message: reason, .. } => Self {
                kind: ErrorKind::UpstreamRejected,
                message,
                details: Some(format!("malformed {resource} payload: {reason}")),
                status: None,
            },
            other @ (ApiError::InvalidCredentials { .. }
            | ApiError::InvalidUrl(_)
            | ApiError::ClientBuild(_)) => Self::internal(other.to_string()),
        }
    }

    /// HTTP status for a request/response boundary.
    ///
    /// `UpstreamRejected` echoes StoreHub's own status as long as it is an
    /// error status; a missing or non-error status (a malformed 200 body)
    /// becomes 502.
    pub fn http_status(&self) -> u16 {
        match self.kind {
            ErrorKind::MissingCredentials => 400,
            ErrorKind::UpstreamRejected => match self.status {
                Some(status) if (400..=599).contains(&status) => status,
                _ => 502,
            },
            ErrorKind::UpstreamUnreachable | ErrorKind::InternalError => 500,
        }
    }
}

impl From<possync_api::Error> for SyncFailure {
    fn from(err: possync_api::Error) -> Self {
        Self::from_api("data", err)
    }
}
