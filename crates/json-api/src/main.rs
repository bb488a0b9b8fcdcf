//! Bastion JSON API Server

use std::{process, sync::Arc};

use salvo::prelude::*;
use tracing::{error, info};

use bastion_app::{context::AppContext, policy::Rule, store::MemoryStore};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod actions;
mod auth;
mod config;
mod extensions;
mod healthcheck;
mod observability;
mod organizations;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Bastion JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    if let Err(init_error) = observability::init_subscriber(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Logging error: {init_error}");
        }

        process::exit(1);
    }

    let store = Arc::new(MemoryStore::new());

    if let Some(admin) = &config.auth.bootstrap_admin {
        store.bind_rules(admin.as_str(), [Rule::admin()]).await;
    }

    let app = match AppContext::from_store(store).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    if let Some(admin) = &config.auth.bootstrap_admin {
        match app.auth.issue_tokens(admin).await {
            Ok(pair) => {
                info!(subject = %admin, "issued bootstrap admin tokens");

                #[expect(
                    clippy::print_stdout,
                    reason = "bootstrap tokens go to the operator, never to the log"
                )]
                {
                    println!("access_token={}", pair.access_token);
                    println!("refresh_token={}", pair.refresh_token);
                }
            }
            Err(issue_error) => {
                error!("failed to issue bootstrap admin tokens: {issue_error}");

                process::exit(1);
            }
        }
    }

    let state = State::new(app)
        .with_store_timeout(config.auth.store_timeout())
        .into_shared();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let server = Server::new(listener);

    let handle = server.handle();
    let grace = config.server.shutdown_grace();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle, grace).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router::app_router(state)).await;
}
