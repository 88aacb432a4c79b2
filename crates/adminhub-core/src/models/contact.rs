use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Pagination;
use crate::utils::parse_date;

/// A message left through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Contact {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub message: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl Contact {
    pub fn received_on(&self) -> Option<chrono::NaiveDate> {
        self.created_at.as_deref().and_then(parse_date)
    }
}

/// Counts returned by `admin-contacts?stats=1`. The per-status keys depend
/// on the backend, so everything except `total` is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactStats {
    #[serde(default)]
    pub total: u64,
    #[serde(flatten)]
    pub counts: Map<String, Value>,
}

impl ContactStats {
    /// Integer count for a stats key, if present.
    pub fn count(&self, key: &str) -> Option<u64> {
        self.counts.get(key).and_then(Value::as_u64)
    }
}

/// `data` of the admin contact list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPage {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub pagination: Pagination,
    pub stats: Option<ContactStats>,
}

/// Body of the public contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub message: String,
}
