// possync-core: StoreHub sync aggregation between possync-api and consumers (CLI/server).

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod error;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::{SyncAggregator, SyncOutcome};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::SyncConfig;
pub use error::{ErrorKind, SyncFailure};
pub use model::{SyncRequest, SyncResult};

pub use possync_api::{DEFAULT_BASE_URL, Record};
