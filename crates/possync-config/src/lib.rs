//! Shared configuration for the possync binary.
//!
//! TOML file + `POSSYNC_*` environment layering, credential resolution
//! (env + keyring + plaintext), and translation to
//! `possync_core::SyncConfig`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use possync_core::SyncConfig;

/// Keyring service name for stored StoreHub passwords.
pub const KEYRING_SERVICE: &str = "possync";

/// Environment variable holding the StoreHub username.
pub const USERNAME_ENV: &str = "POSSYNC_USERNAME";

/// Environment variable holding the StoreHub password.
pub const PASSWORD_ENV: &str = "POSSYNC_PASSWORD";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub credentials: CredentialSettings,
}

/// Where StoreHub lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    possync_core::DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}

/// The HTTP boundary served by `possync serve`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// `*` for any origin, otherwise a comma-separated origin list.
    #[serde(default = "default_cors_origin")]
    pub cors_allow_origin: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_allow_origin: default_cors_origin(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".into()
}
fn default_cors_origin() -> String {
    "*".into()
}

/// Default StoreHub credentials for `possync sync`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CredentialSettings {
    pub username: Option<String>,

    /// Plaintext password. Prefer the keyring or `POSSYNC_PASSWORD`.
    pub password: Option<String>,
}

impl Config {
    /// A copy safe to print: plaintext secrets are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.credentials.password.is_some() {
            copy.credentials.password = Some("****".into());
        }
        copy
    }

    /// Translate the `[api]` section into the aggregator's runtime config.
    pub fn sync_config(&self) -> Result<SyncConfig, ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::Validation {
            field: "api.base_url".into(),
            reason: format!("{e}: {}", self.api.base_url),
        })?;
        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        Ok(SyncConfig::new(
            self.api.base_url.clone(),
            Duration::from_secs(self.api.timeout),
        ))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "possync", "possync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("possync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the default file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load defaults, then `path` (if it exists), then `POSSYNC_*` variables.
///
/// Nested keys use a double underscore: `POSSYNC_API__TIMEOUT=10`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("POSSYNC_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Username and password as far as they could be resolved.
///
/// Missing pieces stay `None`; the aggregator turns that into a
/// `MissingCredentials` failure instead of this crate guessing.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCredentials {
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

/// Resolve credentials from the environment, system keyring, and config.
///
/// `username` is an explicit override (e.g. a CLI flag) that beats every
/// other source and also selects the keyring entry.
pub fn resolve_credentials(cfg: &Config, username: Option<String>) -> ResolvedCredentials {
    resolve_credentials_with(
        cfg,
        username,
        |name| std::env::var(name).ok(),
        keyring_password,
    )
}

/// Credential chain with injectable sources.
///
/// Username: override → env → config. Password: env → keyring (keyed by
/// the resolved username) → plaintext config.
pub fn resolve_credentials_with(
    cfg: &Config,
    username: Option<String>,
    env: impl Fn(&str) -> Option<String>,
    keyring_lookup: impl Fn(&str) -> Option<String>,
) -> ResolvedCredentials {
    let username = username
        .filter(|u| !u.is_empty())
        .or_else(|| env(USERNAME_ENV).filter(|u| !u.is_empty()))
        .or_else(|| cfg.credentials.username.clone());

    let password = env(PASSWORD_ENV)
        .filter(|p| !p.is_empty())
        .or_else(|| username.as_deref().and_then(&keyring_lookup))
        .or_else(|| cfg.credentials.password.clone())
        .map(SecretString::from);

    ResolvedCredentials { username, password }
}

/// Look up a stored password for `username` in the system keyring.
pub fn keyring_password(username: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, username)
        .ok()?
        .get_password()
        .ok()
}

/// Store `password` for `username` in the system keyring.
pub fn store_keyring_password(username: &str, password: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, username)?.set_password(password)?;
    Ok(())
}
