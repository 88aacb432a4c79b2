use serde::{Deserialize, Serialize};

use super::Pagination;

/// A customer company projects are delivered for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Client {
    pub id: i64,
    #[serde(default)]
    pub company: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub projects_count: Option<u32>,
    pub created_at: Option<String>,
}

/// `data` of the client list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPage {
    #[serde(default)]
    pub clients: Vec<Client>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// Create/update body. Unset fields are left out so the same type serves
/// partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
