//! HTTP surface for The Direct Line ticket service.

pub mod api;
pub mod metrics;
pub mod state;
