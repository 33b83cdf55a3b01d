// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Response vocabulary of the gateway.
//!
//! Every outcome the gateway can produce maps to a fixed status and body
//! pair. Handlers construct responses exclusively through the constructors
//! below; the body strings are part of the wire contract and must not drift.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Immutable status and body written back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    pub body: String,
}

impl GatewayResponse {
    /// Acknowledgement for a stored document.
    pub fn document_created(signature: &str, id: Uuid) -> Self {
        Self {
            status: StatusCode::OK,
            body: format!(
                "You successfully create document with signature={}, id={}",
                signature, id
            ),
        }
    }

    /// Malformed body or path signature.
    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: "Bad request".to_string(),
        }
    }

    /// Unknown route or method.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: "Not Found".to_string(),
        }
    }

    /// Unexpected failure inside the request handler.
    pub fn handler_failure() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Fail".to_string(),
        }
    }

    /// Turned away by the admission gate.
    pub fn overloaded() -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            body: "Maximum number of requests. Please try again".to_string(),
        }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}
