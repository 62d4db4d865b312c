// ── Runtime sync configuration ──
//
// Describes *where* and *how patiently* to talk to StoreHub. Carries no
// credentials (those arrive per request) and never touches disk; the
// binary builds a `SyncConfig` from possync-config and hands it in.

use std::time::Duration;

use possync_api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TransportConfig};

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// StoreHub API base (e.g., `https://api.storehubhq.com`).
    pub base_url: String,
    /// Bound applied to each of the three StoreHub calls.
    pub timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SyncConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig::default().with_timeout(self.timeout)
    }
}
