// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Process-wide Prometheus counters for the gateway.

use lazy_static::lazy_static;
use prometheus::{register_int_counter, IntCounter};

lazy_static! {
    pub static ref GATE_REQUESTS_TOTAL: IntCounter = register_int_counter!(
        "gateway_requests_total",
        "Requests reaching the admission gate"
    )
    .unwrap();
    pub static ref ADMITTED_TOTAL: IntCounter = register_int_counter!(
        "gateway_admitted_total",
        "Requests admitted by the rate window"
    )
    .unwrap();
    pub static ref REJECTED_TOTAL: IntCounter = register_int_counter!(
        "gateway_rejected_total",
        "Requests rejected by the rate window"
    )
    .unwrap();
    pub static ref DOCUMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "gateway_documents_created_total",
        "Documents successfully created"
    )
    .unwrap();
}
