//! Typed API client for the admin backend.
//!
//! `ApiClient` turns resource operations into endpoint paths and methods
//! and hands them to the [`Gateway`]. The resource families live in their
//! own files as further `impl ApiClient` blocks.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::gateway::{Gateway, RequestOptions};
use super::transport::Method;
use super::ApiError;
use crate::models::{Ack, Envelope, LoginData, LoginRequest, User};

/// Clone is cheap; clones share one gateway.
#[derive(Clone)]
pub struct ApiClient {
    gateway: Gateway,
}

impl ApiClient {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // ===== Request helpers =====

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.gateway
            .request_json::<Envelope<T>>(endpoint, RequestOptions::get())
            .await?
            .into_data()
    }

    pub(crate) async fn send<T, B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<Envelope<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut options = RequestOptions::new(method);
        if let Some(body) = body {
            options = options.json(body)?;
        }
        self.gateway.request_json(endpoint, options).await
    }

    pub(crate) async fn send_ack<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
    ) -> Result<Ack, ApiError> {
        self.send::<Value, B>(method, endpoint, body).await?.into_ack()
    }

    // ===== Session =====

    /// Log in and store the returned token and profile.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let body = LoginRequest { email, password };
        let data: LoginData = self
            .send(Method::Post, "login", Some(&body))
            .await?
            .into_data()?;

        let token = data
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Rejected("Login response did not include a token".to_string()))?;

        self.gateway
            .session()
            .save_login(&token, data.user.as_ref())
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))?;

        let user = data.user.unwrap_or_else(|| User {
            id: 0,
            name: None,
            email: email.to_string(),
            role: None,
        });
        info!(email = %user.email, "Logged in");
        Ok(user)
    }

    /// Tell the server to revoke the token, then forget the session locally.
    /// The local session is cleared even when the server call fails.
    pub async fn logout(&self) -> Result<Ack, ApiError> {
        let result = self.send_ack::<Value>(Method::Post, "logout", None).await;
        if let Err(e) = self.gateway.session().clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        result
    }

    pub fn is_authenticated(&self) -> bool {
        self.gateway.session().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.gateway.session().user()
    }

    // ===== Dashboard =====

    /// Aggregated numbers for the dashboard landing page.
    pub async fn dashboard_summary(&self) -> Result<Value, ApiError> {
        self.fetch("dashboard/summary").await
    }
}
