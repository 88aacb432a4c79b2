use serde_json::Value;

use super::client::ApiClient;
use super::params::{endpoint_with_query, ListParams};
use super::transport::Method;
use super::ApiError;
use crate::models::{Ack, Client, ClientForm, ClientPage};

impl ApiClient {
    pub async fn list_clients(&self, params: &ListParams) -> Result<ClientPage, ApiError> {
        let endpoint = endpoint_with_query("clients", params)?;
        self.fetch(&endpoint).await
    }

    pub async fn get_client(&self, id: i64) -> Result<Client, ApiError> {
        self.fetch(&format!("clients/{}", id)).await
    }

    pub async fn create_client(&self, form: &ClientForm) -> Result<Client, ApiError> {
        self.send(Method::Post, "clients", Some(form)).await?.into_data()
    }

    pub async fn update_client(&self, id: i64, form: &ClientForm) -> Result<Client, ApiError> {
        self.send(Method::Patch, &format!("clients/{}", id), Some(form))
            .await?
            .into_data()
    }

    pub async fn delete_client(&self, id: i64) -> Result<Ack, ApiError> {
        self.send_ack::<Value>(Method::Delete, &format!("clients/{}", id), None).await
    }
}
