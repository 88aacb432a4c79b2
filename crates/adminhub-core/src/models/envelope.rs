use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Response envelope every backend endpoint wraps its data in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

/// Acknowledgement of a call whose data the caller does not need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ack {
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    fn rejection(message: Option<String>) -> ApiError {
        ApiError::Rejected(message.unwrap_or_else(|| "The server did not accept the request".to_string()))
    }

    /// The data of a successful envelope.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(Self::rejection(self.message));
        }
        self.data
            .ok_or_else(|| ApiError::Parse("Response is missing its data field".to_string()))
    }

    /// Success check only; `data` may be absent.
    pub fn into_ack(self) -> Result<Ack, ApiError> {
        if !self.success {
            return Err(Self::rejection(self.message));
        }
        Ok(Ack {
            message: self.message,
        })
    }
}

/// Pagination block of list responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Pagination {
    pub current_page: Option<u32>,
    #[serde(default = "first_page")]
    pub last_page: u32,
    pub per_page: Option<u32>,
    pub total: Option<u64>,
}

fn first_page() -> u32 {
    1
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.current_page.unwrap_or(1) < self.last_page
    }

    /// "page 2/5"
    pub fn display(&self) -> String {
        format!("page {}/{}", self.current_page.unwrap_or(1), self.last_page.max(1))
    }
}
