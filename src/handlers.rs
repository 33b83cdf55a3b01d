// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the document gateway.
//!
//! The admission route accepts `POST /api/create/{signature}` with a JSON
//! body and answers with the gateway's literal response contract. Everything
//! here runs downstream of the admission gate in [`crate::dispatcher`].

use crate::config::Config;
use crate::limiter::RateWindow;
use crate::metrics::DOCUMENTS_CREATED_TOTAL;
use crate::response::GatewayResponse;
use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Shared application state.
pub struct AppState {
    pub limiter: RateWindow,
    pub config: Config,
    epoch: Instant,
}

impl AppState {
    pub fn new(limiter: RateWindow, config: Config) -> Self {
        Self {
            limiter,
            config,
            epoch: Instant::now(),
        }
    }

    /// Milliseconds since this state was created. Monotonic; this is the
    /// limiter's time base.
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Document submission body. The wire format has a single optional string
/// field; an empty object is a valid submission.
#[derive(Debug, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "document-gateway",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Create a document under the path-embedded signature.
///
/// Registered for every method so the admission gate wraps the whole route;
/// anything but POST is answered 404 downstream of the gate, mirroring the
/// route-then-method order of the upstream contract.
pub async fn create_document(
    method: Method,
    Path(signature): Path<String>,
    body: Bytes,
) -> GatewayResponse {
    if method != Method::POST {
        debug!(method = %method, "non-POST on admission route");
        return GatewayResponse::not_found();
    }

    let document: Document = match serde_json::from_slice(&body) {
        Ok(document) => document,
        Err(err) => {
            debug!(error = %err, "malformed document body");
            return GatewayResponse::bad_request();
        }
    };

    // A signature is a single path segment; an embedded separator makes the
    // route ambiguous.
    if signature.contains('/') || signature.contains('?') {
        debug!(signature = %signature, "malformed signature segment");
        return GatewayResponse::bad_request();
    }

    let id = Uuid::new_v4();
    DOCUMENTS_CREATED_TOTAL.inc();
    info!(
        signature = %signature,
        id = %id,
        data_len = document.data.as_deref().map(str::len).unwrap_or(0),
        "document created"
    );

    GatewayResponse::document_created(&signature, id)
}

/// Fallback for routes outside the gateway's table.
pub async fn not_found() -> GatewayResponse {
    GatewayResponse::not_found()
}

/// Prometheus metrics endpoint.
pub async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&prometheus::gather(), &mut buffer) {
        error!(error = %err, "failed to encode metrics");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    String::from_utf8_lossy(&buffer).into_owned().into_response()
}

/// Map a panic escaping a handler to the fixed failure response.
///
/// Installed through the catch-panic layer so that no per-request failure
/// can take down the transport or skew limiter state.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("opaque panic payload");
    error!(panic = detail, "request handler panicked");

    GatewayResponse::handler_failure().into_response()
}
