// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document Submission Gateway Service
//!
//! Accepts document-submission requests on `POST /api/create/{signature}`
//! and admits at most `capacity` requests per sliding window, process-wide.
//! Rejected requests receive a fixed 502 overload response without reaching
//! the document handler.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables:
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `WINDOW_MS`: Sliding window length in milliseconds (default: 1000)
//! - `CAPACITY`: Requests admitted per window (default: 1)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use document_gateway::{
    config::{Config, RateLimitConfig},
    dispatcher,
    handlers::AppState,
    limiter::RateWindow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = load_config();
    info!(
        bind_addr = %config.bind_addr,
        window_ms = config.rate_limit.window_ms,
        capacity = config.rate_limit.capacity,
        "Starting document gateway"
    );

    // Misconfiguring the gate is fatal at startup
    let limiter = RateWindow::new(
        config.rate_limit.window_duration(),
        config.rate_limit.capacity,
    )?;

    let state = Arc::new(AppState::new(limiter, config.clone()));
    let app = dispatcher::router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Load configuration from environment variables.
fn load_config() -> Config {
    Config {
        bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        rate_limit: RateLimitConfig {
            window_ms: std::env::var("WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            capacity: std::env::var("CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        },
    }
}
