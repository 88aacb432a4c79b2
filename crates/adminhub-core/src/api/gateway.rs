//! The request gateway: every backend call goes through here.
//!
//! GET requests are deduplicated while in flight and cached for the
//! freshness window. Successful mutations clear the whole cache. A 401 from
//! any endpoint clears the stored session and publishes
//! [`SessionEvent::Expired`] so the application shell can send the user back
//! to the login page.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::ApiError;
use crate::auth::Session;
use crate::cache::ResponseCache;

/// Used when neither the environment nor the config file names a backend.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Where the shell should send the user once the session has expired.
pub const LOGIN_PATH: &str = "/admin/login";

/// Capacity of the session event channel. Subscribers that fall further
/// behind only miss duplicate expiry notices.
const SESSION_EVENT_CAPACITY: usize = 16;

type SharedResponse = Shared<BoxFuture<'static, Result<Value, ApiError>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The server rejected the stored credentials; they have been cleared.
    Expired { login_path: &'static str },
}

/// Per-call options: method, extra headers, and a pre-serialized body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::Get)
    }

    pub fn post() -> Self {
        Self::new(Method::Post)
    }

    pub fn patch() -> Self {
        Self::new(Method::Patch)
    }

    pub fn delete() -> Self {
        Self::new(Method::Delete)
    }

    /// Add a header, replacing the default of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Use an already serialized body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `body` as JSON.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, ApiError> {
        let raw = serde_json::to_string(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize body: {}", e)))?;
        Ok(self.body(raw))
    }
}

/// Single choke point for backend calls. Clone is cheap; clones share the
/// cache, the in-flight table and the session.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<Inner>,
}

struct Inner {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Session,
    cache: Mutex<ResponseCache>,
    pending: Mutex<HashMap<String, SharedResponse>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Gateway {
    pub fn new(base_url: impl Into<String>, transport: impl Transport, session: Session) -> Self {
        Self::with_cache(base_url, transport, session, ResponseCache::default())
    }

    /// Like [`Gateway::new`] with a custom cache (e.g. a different window).
    pub fn with_cache(
        base_url: impl Into<String>,
        transport: impl Transport,
        session: Session,
        cache: ResponseCache,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let (events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                base_url,
                transport: Arc::new(transport),
                session,
                cache: Mutex::new(cache),
                pending: Mutex::new(HashMap::new()),
                events,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Subscribe to session events (currently only expiry).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Absolute URL for a relative endpoint.
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.inner.base_url, endpoint.trim_start_matches('/'))
    }

    /// Number of cached GET responses (fresh or not).
    pub fn cache_len(&self) -> usize {
        self.inner.cache.lock().len()
    }

    /// Number of GET requests currently in flight.
    pub fn pending_len(&self) -> usize {
        self.inner.pending.lock().len()
    }

    pub fn clear_cache(&self) {
        let cleared = self.inner.cache.lock().clear();
        debug!(cleared, "Response cache cleared");
    }

    /// Send `options.method` to `endpoint` and return the JSON payload.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            return Err(ApiError::InvalidRequest("endpoint must not be empty".to_string()));
        }
        let url = self.url_for(endpoint);

        if options.method.is_mutating() {
            self.mutate(url, options).await
        } else {
            self.read(url, options).await
        }
    }

    /// [`Gateway::request`] followed by deserialization into `T`.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let payload = self.request(endpoint, options).await?;
        serde_json::from_value(payload)
            .map_err(|e| ApiError::Parse(format!("Unexpected response shape from {}: {}", endpoint, e)))
    }

    async fn read(&self, url: String, options: RequestOptions) -> Result<Value, ApiError> {
        let shared = {
            let mut pending = self.inner.pending.lock();
            if let Some(in_flight) = pending.get(&url).cloned() {
                debug!(url = %url, "Joining in-flight request");
                in_flight
            } else {
                let cached = self.inner.cache.lock().fresh(&url);
                if let Some(payload) = cached {
                    debug!(url = %url, "Serving cached response");
                    return Ok(payload);
                }
                let call = self.spawn_read(url.clone(), options);
                pending.insert(url, call.clone());
                call
            }
        };
        shared.await
    }

    /// Run the GET on its own task so it completes (and caches) even if every
    /// caller stops waiting. The caller must register the returned future in
    /// `pending` while still holding that lock.
    fn spawn_read(&self, url: String, options: RequestOptions) -> SharedResponse {
        let gateway = self.clone();
        let task = tokio::spawn(async move {
            let result = gateway.execute(Method::Get, &url, options).await;
            if let Ok(payload) = &result {
                gateway.inner.cache.lock().insert(url.clone(), payload.clone());
            }
            gateway.inner.pending.lock().remove(&url);
            result
        });

        async move {
            match task.await {
                Ok(result) => result,
                Err(e) => Err(ApiError::Network(format!("Request task failed: {}", e))),
            }
        }
        .boxed()
        .shared()
    }

    async fn mutate(&self, url: String, options: RequestOptions) -> Result<Value, ApiError> {
        let method = options.method;
        let payload = self.execute(method, &url, options).await?;
        let cleared = self.inner.cache.lock().clear();
        debug!(%method, url = %url, cleared, "Mutation succeeded, cache invalidated");
        Ok(payload)
    }

    async fn execute(&self, method: Method, url: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: self.build_headers(method, &options.headers)?,
            body: options.body,
        };

        debug!(%method, url, "Sending request");
        let response = self.inner.transport.send(request).await.map_err(|e| {
            warn!(%method, url, error = %e, "Request failed");
            e
        })?;

        if response.status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ApiError::AuthExpired);
        }

        classify_response(response).map_err(|e| {
            debug!(%method, url, error = %e, "Request returned an error");
            e
        })
    }

    /// Defaults, then caller overrides, then the bearer token.
    fn build_headers(&self, method: Method, overrides: &HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if method.is_mutating() {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(token) = self.inner.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidRequest("stored token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    fn expire_session(&self) {
        warn!("Server rejected credentials, clearing session");
        if let Err(e) = self.inner.session.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        // No subscribers is fine
        let _ = self.inner.events.send(SessionEvent::Expired {
            login_path: LOGIN_PATH,
        });
    }
}

/// Turn a raw response into a payload or an error. 401 is handled by the
/// gateway before this is called.
fn classify_response(response: HttpResponse) -> Result<Value, ApiError> {
    let status = response.status;

    if !response.is_json() {
        if status.is_success() {
            return Err(ApiError::Parse(format!(
                "Expected JSON but got {}: {}",
                response.content_type.as_deref().unwrap_or("no content type"),
                ApiError::truncate_body(&response.body)
            )));
        }
        return Err(ApiError::from_status(status, Some(&response.body)));
    }

    let payload: Value = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Parse(format!("Malformed JSON (status {}): {}", status.as_u16(), e)))?;

    if !status.is_success() {
        let message = payload.get("message").and_then(Value::as_str);
        return Err(ApiError::from_status(status, message));
    }

    Ok(payload)
}
