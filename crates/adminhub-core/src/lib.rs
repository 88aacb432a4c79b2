//! adminhub core library - request gateway, session, cache and typed API
//! for the contacts / clients / personnel / projects admin backend.
//!
//! The composition root builds one [`Gateway`] and shares it:
//!
//! ```no_run
//! use std::sync::Arc;
//! use adminhub_core::{ApiClient, FileStorage, Gateway, ListParams, ReqwestTransport, Session};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let session = Session::new(Arc::new(FileStorage::open("storage.json")?));
//! let gateway = Gateway::new("http://127.0.0.1:8000/api", ReqwestTransport::new()?, session);
//! let api = ApiClient::new(gateway);
//! let page = api.list_projects(&ListParams::new().page(1)).await?;
//! println!("{} projects", page.projects.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{
    ApiClient, ApiError, Gateway, ListParams, Method, RequestOptions, ReqwestTransport, SessionEvent,
    Transport,
};
pub use auth::{FileStorage, MemoryStorage, Session, Storage};
pub use config::Config;
