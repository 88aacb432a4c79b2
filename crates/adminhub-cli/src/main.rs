//! adminhub - command-line admin client for the contacts, clients,
//! personnel and projects backend.
//!
//! This binary is the composition root: it builds the single request
//! gateway, hands it to the typed API client, and reacts to session expiry.

mod commands;
mod output;

use std::io;
use std::sync::Arc;

use adminhub_core::api::SessionEvent;
use adminhub_core::{ApiClient, ApiError, Config, FileStorage, Gateway, ReqwestTransport, Session};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{Cli, Command};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::load()?;
    let storage_path = config.storage_path()?;
    let storage = FileStorage::open(&storage_path)
        .with_context(|| format!("Failed to open session storage at {}", storage_path.display()))?;

    let base_url = cli.api_url.clone().unwrap_or_else(|| config.api_base_url());
    let gateway = Gateway::new(&base_url, ReqwestTransport::new()?, Session::new(Arc::new(storage)));
    let mut session_events = gateway.subscribe();
    let api = ApiClient::new(gateway);
    info!(base_url = %base_url, "adminhub starting");

    // A rejected login also clears the session; that is not an expiry
    let is_login = matches!(cli.command, Command::Login { .. });
    let result = commands::run(cli.command, &api, &mut config).await;

    if !is_login {
        report_session_events(&mut session_events);
    }
    if let Err(e) = &result {
        if matches!(e.downcast_ref::<ApiError>(), Some(ApiError::AuthExpired)) {
            // Already explained by the session event
            std::process::exit(2);
        }
    }
    result
}

/// Tell the user where to go once the server has rejected their session.
fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>) {
    let mut expired = None;
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Expired { login_path } => expired = Some(login_path),
        }
    }
    if let Some(login_path) = expired {
        eprintln!("Your session has expired ({}). Run `adminhub login` to sign in again.", login_path);
    }
}
