use serde_json::json;
use serde_json::Value;

use super::client::ApiClient;
use super::params::{endpoint_with_query, ListParams};
use super::transport::Method;
use super::ApiError;
use crate::models::{Ack, Contact, ContactForm, ContactPage, ContactStats};

impl ApiClient {
    /// Public contact form submission.
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<Ack, ApiError> {
        self.send_ack(Method::Post, "contacts", Some(form)).await
    }

    /// Contacts as seen by an administrator.
    pub async fn list_contacts(&self, params: &ListParams) -> Result<ContactPage, ApiError> {
        let endpoint = endpoint_with_query("admin-contacts", params)?;
        self.fetch(&endpoint).await
    }

    pub async fn get_contact(&self, id: i64) -> Result<Contact, ApiError> {
        self.fetch(&format!("contacts/{}", id)).await
    }

    pub async fn contact_stats(&self) -> Result<ContactStats, ApiError> {
        self.fetch("admin-contacts?stats=1").await
    }

    pub async fn update_contact_status(&self, id: i64, status: &str) -> Result<Ack, ApiError> {
        let body = json!({ "status": status });
        self.send_ack(Method::Patch, &format!("contacts/{}", id), Some(&body)).await
    }

    /// Update the status, then reload the stats it affects. Stats are only
    /// fetched once the update has been accepted.
    pub async fn change_contact_status(&self, id: i64, status: &str) -> Result<ContactStats, ApiError> {
        self.update_contact_status(id, status).await?;
        self.contact_stats().await
    }

    pub async fn delete_contact(&self, id: i64) -> Result<Ack, ApiError> {
        self.send_ack::<Value>(Method::Delete, &format!("contacts/{}", id), None).await
    }

    /// Absolute URL of the CSV export. The download does not go through the
    /// gateway, so the token travels as a query parameter.
    pub fn contacts_export_url(&self, params: &ListParams) -> Result<String, ApiError> {
        let token = self
            .gateway()
            .session()
            .token()
            .ok_or_else(|| ApiError::InvalidRequest("Not logged in".to_string()))?;

        let mut query = params.to_query()?;
        let token_pair = serde_urlencoded::to_string([("token", token.as_str())])
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode token: {}", e)))?;
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&token_pair);

        Ok(format!("{}?{}", self.gateway().url_for("admin-contacts/export"), query))
    }
}
