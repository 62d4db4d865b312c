//! Effective configuration for one CLI invocation.
//!
//! The file and environment layering lives in `possync-config`; this
//! module picks the file and applies the global flag overrides on top.

use std::path::PathBuf;

use possync_config::Config;
use possync_core::SyncAggregator;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file in effect: `--config` / `POSSYNC_CONFIG`, else the
/// platform default.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(possync_config::config_path)
}

/// Load config and apply `--base-url` and `--timeout`.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = match &global.config {
        Some(path) => possync_config::load_config_from(path)?,
        None => possync_config::load_config()?,
    };

    if let Some(ref url) = global.base_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
    Ok(cfg)
}

/// Build an aggregator from validated `[api]` settings.
pub fn aggregator(cfg: &Config) -> Result<SyncAggregator, CliError> {
    Ok(SyncAggregator::new(cfg.sync_config()?))
}
