// ── Request and result payloads ──
//
// Wire shapes of the sync boundary. Field names follow the inbound
// contract (`storehub_username`, `storehub_password`, `date`); records
// are opaque JSON values owned by StoreHub.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use possync_api::Record;

/// Inbound request for one synchronization.
///
/// Every field is optional on the wire: a missing or empty credential is a
/// `MissingCredentials` failure raised by the aggregator, not a parse error.
#[derive(Clone, Default, Deserialize)]
pub struct SyncRequest {
    #[serde(rename = "storehub_username", default)]
    pub username: Option<String>,

    #[serde(
        rename = "storehub_password",
        default,
        deserialize_with = "deserialize_secret"
    )]
    pub password: Option<SecretString>,

    /// Target day, `YYYY-MM-DD`. Forwarded verbatim when present.
    #[serde(default)]
    pub date: Option<String>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl SyncRequest {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password),
            date: None,
        }
    }

    /// Pin the sync window to `date` instead of the current day.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Both credentials, if present and non-empty.
    pub(crate) fn credentials(&self) -> Option<(&str, &SecretString)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())?;
        Some((username, password))
    }

    /// The explicitly requested date; an empty string counts as absent.
    pub(crate) fn requested_date(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.is_empty())
    }
}

impl fmt::Debug for SyncRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncRequest")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("date", &self.date)
            .finish()
    }
}

/// Successful synchronization payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncResult {
    pub success: bool,
    pub transactions: Vec<Record>,
    pub customers: Vec<Record>,
    pub products: Vec<Record>,
    /// The resolved sync window, echoed back.
    pub date: String,
}

impl SyncResult {
    pub fn new(
        date: String,
        transactions: Vec<Record>,
        customers: Vec<Record>,
        products: Vec<Record>,
    ) -> Self {
        Self {
            success: true,
            transactions,
            customers,
            products,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn request_reads_boundary_field_names() {
        let req: SyncRequest = serde_json::from_value(json!({
            "storehub_username": "u",
            "storehub_password": "p",
            "date": "2024-03-01",
        }))
        .unwrap();

        let (user, pass) = req.credentials().unwrap();
        assert_eq!(user, "u");
        assert_eq!(pass.expose_secret(), "p");
        assert_eq!(req.requested_date(), Some("2024-03-01"));
    }

    #[test]
    fn missing_or_empty_credentials_are_absent() {
        let req: SyncRequest = serde_json::from_value(json!({ "storehub_username": "u" })).unwrap();
        assert!(req.credentials().is_none());

        let req: SyncRequest = serde_json::from_value(json!({
            "storehub_username": "",
            "storehub_password": "p",
        }))
        .unwrap();
        assert!(req.credentials().is_none());

        let req = SyncRequest::new("u", SecretString::from(String::new()));
        assert!(req.credentials().is_none());
    }

    #[test]
    fn empty_date_counts_as_absent() {
        let req = SyncRequest::new("u", SecretString::from("p".to_owned())).with_date("");
        assert_eq!(req.requested_date(), None);
    }

    #[test]
    fn debug_redacts_password() {
        let req = SyncRequest::new("u", SecretString::from("hunter2".to_owned()));
        let rendered = format!("{req:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("REDACTED"));
    }

    #[test]
    fn result_serializes_success_body() {
        let result = SyncResult::new(
            "2024-03-01".into(),
            vec![json!({ "id": 1 })],
            Vec::new(),
            Vec::new(),
        );

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "transactions": [{ "id": 1 }],
                "customers": [],
                "products": [],
                "date": "2024-03-01",
            })
        );
    }
}
