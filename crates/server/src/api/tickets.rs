//! Ticket API handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use directline_core::{ReportRequest, Ticket, TicketError, TicketStatus};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a report
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketBody {
    /// What is wrong
    pub description: String,
    /// Where it is
    pub location: String,
    /// Reporter name, "Anonymous" when absent or blank
    #[serde(default)]
    pub reported_by: Option<String>,
}

impl From<CreateTicketBody> for ReportRequest {
    fn from(body: CreateTicketBody) -> Self {
        Self {
            description: body.description,
            location: body.location,
            reported_by: body.reported_by,
        }
    }
}

/// Request body for a status change
#[derive(Debug, Deserialize)]
pub struct StatusUpdateBody {
    pub status: TicketStatus,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct TicketErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<TicketErrorResponse>);

fn error_response(e: TicketError) -> ApiError {
    let (status, message) = match &e {
        TicketError::NotFound(_) => (StatusCode::NOT_FOUND, "Ticket not found".to_string()),
        TicketError::InvalidTransition { .. } => (StatusCode::CONFLICT, e.to_string()),
        TicketError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),
        // Already logged by the service with the underlying message.
        TicketError::Database(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred".to_string(),
        ),
    };

    (status, Json(TicketErrorResponse { error: message }))
}

// ============================================================================
// Handlers
// ============================================================================

/// Submit a new citizen report
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateTicketBody>,
) -> Result<Json<Ticket>, ApiError> {
    state
        .tickets()
        .create_ticket(body.into())
        .map(Json)
        .map_err(error_response)
}

/// List all tickets, newest first
pub async fn list_tickets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Ticket>>, ApiError> {
    state
        .tickets()
        .list_tickets()
        .map(Json)
        .map_err(error_response)
}

/// Move a ticket along its lifecycle
pub async fn update_ticket_status(
    State(state): State<Arc<AppState>>,
    Path(ticket_id): Path<String>,
    Json(body): Json<StatusUpdateBody>,
) -> Result<Json<Ticket>, ApiError> {
    state
        .tickets()
        .update_status(&ticket_id, body.status)
        .map(Json)
        .map_err(error_response)
}
