// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Admission gate between the HTTP transport and the route handlers.
//!
//! Every request on the admission route passes through [`admission_gate`]
//! before any routing or body parsing happens. The gate either forwards the
//! request downstream untouched or answers with the fixed overload response;
//! those are its only observable effects.

use crate::handlers::{self, AppState};
use crate::limiter::AdmissionDecision;
use crate::metrics::{ADMITTED_TOTAL, GATE_REQUESTS_TOTAL, REJECTED_TOTAL};
use crate::response::GatewayResponse;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Gate one request through the rate window.
///
/// The admission timestamp is recorded before the downstream handler runs,
/// so a handler failure still consumes budget and cannot skew the window.
pub async fn admission_gate(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    GATE_REQUESTS_TOTAL.inc();
    let now_ms = state.now_ms();

    match state.limiter.try_admit(now_ms) {
        AdmissionDecision::Admitted => {
            ADMITTED_TOTAL.inc();
            debug!(now_ms, path = %request.uri().path(), "request admitted");
            next.run(request).await
        }
        AdmissionDecision::Rejected => {
            REJECTED_TOTAL.inc();
            info!(now_ms, path = %request.uri().path(), "request rejected, window full");
            GatewayResponse::overloaded().into_response()
        }
    }
}

/// Assemble the gateway's route table.
///
/// The admission route sits behind the gate; health and metrics do not
/// count against the rate budget. Unknown routes fall through to the
/// literal 404 body.
pub fn router(state: Arc<AppState>) -> Router {
    let admission = Router::new()
        .route("/api/create/*signature", any(handlers::create_document))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admission_gate,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/healthz", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .merge(admission)
        .fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handlers::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
