// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Document Submission Gateway
//!
//! This crate provides a minimal ingress gateway for document-submission
//! requests. Every request on the admission route passes a process-wide
//! sliding-window rate limit before any business logic runs:
//!
//! - Exact sliding window: a queue of admission timestamps with strict
//!   age-based eviction, no bucket-edge bursts
//! - Global budget: at most `capacity` admissions in any trailing window
//! - Fixed overload response (502) for rejected requests
//! - Literal response contract for the document route
//!
//! The core decision primitive is [`limiter::RateWindow`]; the
//! [`dispatcher`] module wires it in front of the HTTP handlers.

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod response;

pub use config::Config;
pub use limiter::{AdmissionDecision, InvalidConfiguration, RateWindow};
pub use response::GatewayResponse;
