use thiserror::Error;

/// Upper bound on how much of an upstream error body is kept for diagnostics.
pub const MAX_ERROR_BODY_BYTES: usize = 4096;

/// Top-level error type for the `possync-api` crate.
///
/// Covers every failure mode of a single StoreHub call: building the
/// authorization header, reaching the API, a non-success status, and
/// a payload that is not the expected JSON array. `possync-core` maps
/// these into `SyncFailure` values.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The derived credentials could not be encoded as a header value.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Failed to construct the underlying HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── API ─────────────────────────────────────────────────────────
    /// StoreHub answered with a non-success status.
    #[error("StoreHub API error (HTTP {status})")]
    Http { status: u16, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the API was never reached or the call timed out.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns `true` if the request exceeded the configured timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The upstream HTTP status, if StoreHub answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The (possibly truncated) upstream body attached to this error.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Cut `body` down to at most [`MAX_ERROR_BODY_BYTES`], respecting UTF-8
/// boundaries.
pub(crate) fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_are_kept_verbatim() {
        assert_eq!(truncate_body("denied".into()), "denied");
    }

    #[test]
    fn long_bodies_are_cut_on_a_char_boundary() {
        // The leading ASCII byte shifts every two-byte 'é' onto an odd offset,
        // so the byte limit lands mid-character.
        let body = format!("a{}", "é".repeat(MAX_ERROR_BODY_BYTES));
        let cut = truncate_body(body);
        assert_eq!(cut.len(), MAX_ERROR_BODY_BYTES - 1);
        assert!(cut.starts_with('a'));
        assert!(cut.chars().skip(1).all(|c| c == 'é'));
    }
}
