//! REST API access for the admin backend.
//!
//! Every call goes through the [`Gateway`], which deduplicates concurrent
//! reads, caches read responses briefly, invalidates the cache on writes and
//! handles session expiry. [`ApiClient`] layers typed resource operations
//! (contacts, clients, personnel, projects) on top of it.
//!
//! The backend authenticates with a bearer token obtained from `login`.

pub mod client;
pub mod clients;
pub mod contacts;
pub mod error;
pub mod gateway;
pub mod params;
pub mod personnel;
pub mod projects;
pub mod transport;

pub use client::ApiClient;
pub use error::ApiError;
pub use gateway::{Gateway, RequestOptions, SessionEvent, DEFAULT_BASE_URL, LOGIN_PATH};
pub use params::{endpoint_with_query, ListParams};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
