use serde::Serialize;

use super::ApiError;

/// Filter and pagination options for list endpoints. Unset fields are left
/// out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_stats: Option<u8>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Blank search text means no search.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn status(mut self, status: impl ToString) -> Self {
        let status = status.to_string();
        self.status = if status.is_empty() { None } else { Some(status) };
        self
    }

    pub fn client(mut self, client_id: i64) -> Self {
        self.client_id = Some(client_id);
        self
    }

    /// Ask list endpoints to include their stats block.
    pub fn with_stats(mut self) -> Self {
        self.include_stats = Some(1);
        self
    }

    /// Encoded query string without the leading `?`; empty when nothing is set.
    pub fn to_query(&self) -> Result<String, ApiError> {
        serde_urlencoded::to_string(self)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode query: {}", e)))
    }
}

/// `resource` with `params` appended as a query string when any are set.
pub fn endpoint_with_query(resource: &str, params: &ListParams) -> Result<String, ApiError> {
    let query = params.to_query()?;
    if query.is_empty() {
        Ok(resource.to_string())
    } else {
        Ok(format!("{}?{}", resource, query))
    }
}
