//! Prometheus metrics for core components.
//!
//! The server crate registers these alongside its HTTP metrics.

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

/// Tickets created, by assigned category.
pub static TICKETS_CREATED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("directline_tickets_created_total", "Total tickets created"),
        &["category"],
    )
    .unwrap()
});

/// Status changes that were applied.
pub static STATUS_TRANSITIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "directline_ticket_status_transitions_total",
            "Ticket status transitions applied",
        ),
        &["to_status"],
    )
    .unwrap()
});

/// Status changes that were refused, by reason.
pub static STATUS_UPDATES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "directline_ticket_status_updates_rejected_total",
            "Ticket status updates that were refused",
        ),
        &["reason"], // "not_found", "invalid_transition", "error"
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKETS_CREATED.clone()),
        Box::new(STATUS_TRANSITIONS.clone()),
        Box::new(STATUS_UPDATES_REJECTED.clone()),
    ]
}
