use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Derived HTTP Basic credentials for the StoreHub API.
///
/// Holds only the Base64 token of `"{username}:{password}"`. The token is
/// reversible, so it is treated as secret material: it lives in a
/// [`SecretString`], the header built from it is marked sensitive, and the
/// `Debug` output is redacted.
#[derive(Clone)]
pub struct Credentials {
    token: SecretString,
}

impl Credentials {
    /// Derive Basic credentials from a username and password.
    pub fn basic(username: &str, password: &SecretString) -> Self {
        let raw = format!("{username}:{}", password.expose_secret());
        Self {
            token: SecretString::from(STANDARD.encode(raw.as_bytes())),
        }
    }

    /// Build the `Authorization: Basic <token>` header value.
    ///
    /// The value is flagged sensitive so reqwest and hyper never print it.
    pub fn header_value(&self) -> Result<HeaderValue, Error> {
        let mut value = HeaderValue::from_str(&format!("Basic {}", self.token.expose_secret()))
            .map_err(|e| Error::InvalidCredentials {
                message: format!("invalid authorization header value: {e}"),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn basic_token_is_base64_of_user_colon_password() {
        let creds = Credentials::basic("u", &SecretString::from("p".to_owned()));
        assert_eq!(creds.header_value().unwrap().to_str().unwrap(), "Basic dTpw");
    }

    #[test]
    fn header_value_is_sensitive_basic_auth() {
        let creds = Credentials::basic("cashier", &SecretString::from("s3cret".to_owned()));
        let value = creds.header_value().unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Basic Y2FzaGllcjpzM2NyZXQ=");
    }

    #[test]
    fn debug_output_never_contains_the_token() {
        let creds = Credentials::basic("u", &SecretString::from("p".to_owned()));
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("dTpw"));
        assert!(rendered.contains("REDACTED"));
    }
}
