use serde::{Deserialize, Serialize};

/// Profile of the logged-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub role: Option<String>,
}

impl User {
    /// Name if known, otherwise the email address.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

/// `data` of a successful `login` call.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}
