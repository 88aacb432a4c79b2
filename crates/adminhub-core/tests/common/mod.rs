#![allow(dead_code)]

use std::sync::Arc;

use adminhub_core::api::{HttpRequest, HttpResponse};
use adminhub_core::{ApiClient, ApiError, Gateway, MemoryStorage, Session, Storage, Transport};
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::Semaphore;

pub const BASE_URL: &str = "http://api.test/api";

type Responder = dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync;

/// Scripted transport that records every request it is asked to send.
/// A gated transport holds every response until [`MockTransport::release`].
#[derive(Clone)]
pub struct MockTransport {
    inner: Arc<MockInner>,
}

struct MockInner {
    requests: Mutex<Vec<HttpRequest>>,
    responder: Box<Responder>,
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self::build(responder, None)
    }

    pub fn gated<F>(responder: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self::build(responder, Some(Semaphore::new(0)))
    }

    fn build<F>(responder: F, gate: Option<Semaphore>) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(MockInner {
                requests: Mutex::new(Vec::new()),
                responder: Box::new(responder),
                gate,
            }),
        }
    }

    /// Let every held (and future) response through.
    pub fn release(&self) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(1_000_000);
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.inner.requests.lock().len()
    }

    pub fn calls_to(&self, url: &str) -> usize {
        self.inner.requests.lock().iter().filter(|r| r.url == url).count()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.inner.requests.lock().last().cloned()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> BoxFuture<'static, Result<HttpResponse, ApiError>> {
        let inner = self.inner.clone();
        async move {
            inner.requests.lock().push(request.clone());
            if let Some(gate) = &inner.gate {
                let _permit = gate.acquire().await.expect("gate closed");
            }
            (inner.responder)(&request)
        }
        .boxed()
    }
}

pub fn json_response(status: u16, body: Value) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    })
}

pub fn text_response(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse {
        status: StatusCode::from_u16(status).expect("valid status"),
        content_type: Some("text/html; charset=UTF-8".to_string()),
        body: body.to_string(),
    })
}

pub fn url(endpoint: &str) -> String {
    format!("{}/{}", BASE_URL, endpoint)
}

/// Gateway over `transport` with in-memory storage, optionally logged in.
pub fn gateway(transport: MockTransport, token: Option<&str>) -> (Gateway, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    if let Some(token) = token {
        storage.set("auth_token", token).expect("memory storage");
        storage
            .set("user", r#"{"id":1,"name":"Admin","email":"admin@example.com"}"#)
            .expect("memory storage");
    }
    let session = Session::new(storage.clone());
    (Gateway::new(BASE_URL, transport, session), storage)
}

pub fn api(transport: MockTransport, token: Option<&str>) -> (ApiClient, Arc<MemoryStorage>) {
    let (gateway, storage) = gateway(transport, token);
    (ApiClient::new(gateway), storage)
}
