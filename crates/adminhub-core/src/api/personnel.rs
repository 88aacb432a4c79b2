use serde_json::{json, Value};

use super::client::ApiClient;
use super::params::{endpoint_with_query, ListParams};
use super::transport::Method;
use super::ApiError;
use crate::models::{Ack, Personnel, PersonnelForm, PersonnelPage, PersonnelStatus};

impl ApiClient {
    pub async fn list_personnel(&self, params: &ListParams) -> Result<PersonnelPage, ApiError> {
        let endpoint = endpoint_with_query("personnel", params)?;
        self.fetch(&endpoint).await
    }

    pub async fn get_personnel(&self, id: i64) -> Result<Personnel, ApiError> {
        self.fetch(&format!("personnel/{}", id)).await
    }

    /// Distinct job positions in use, for form suggestions.
    pub async fn personnel_positions(&self) -> Result<Vec<String>, ApiError> {
        self.fetch("personnel?positions=1").await
    }

    pub async fn create_personnel(&self, form: &PersonnelForm) -> Result<Personnel, ApiError> {
        self.send(Method::Post, "personnel", Some(form)).await?.into_data()
    }

    pub async fn update_personnel(&self, id: i64, form: &PersonnelForm) -> Result<Personnel, ApiError> {
        self.send(Method::Patch, &format!("personnel/{}", id), Some(form))
            .await?
            .into_data()
    }

    pub async fn update_personnel_status(&self, id: i64, status: PersonnelStatus) -> Result<Ack, ApiError> {
        let body = json!({ "status": status });
        self.send_ack(Method::Patch, &format!("personnel/{}", id), Some(&body)).await
    }

    pub async fn delete_personnel(&self, id: i64) -> Result<Ack, ApiError> {
        self.send_ack::<Value>(Method::Delete, &format!("personnel/{}", id), None).await
    }
}
