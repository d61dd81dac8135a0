//! Ticket service: validation, classification and store orchestration.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::{NewTicket, Ticket, TicketError, TicketStatus, TicketStore};
use crate::classifier::classify;
use crate::metrics::{STATUS_TRANSITIONS, STATUS_UPDATES_REJECTED, TICKETS_CREATED};

/// Maximum number of tickets returned by [`TicketService::list_tickets`].
pub const MAX_LIST_TICKETS: i64 = 1000;

/// Name recorded when a report carries no reporter.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// A citizen report as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub description: String,
    pub location: String,
    pub reported_by: Option<String>,
}

/// Orchestrates ticket creation, listing and status changes.
#[derive(Clone)]
pub struct TicketService {
    store: Arc<dyn TicketStore>,
}

impl TicketService {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    /// Classify and persist a new report.
    pub fn create_ticket(&self, request: ReportRequest) -> Result<Ticket, TicketError> {
        if request.description.trim().is_empty() {
            return Err(TicketError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        let reported_by = request
            .reported_by
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string());

        let category = classify(&request.description);

        let ticket = self
            .store
            .create(NewTicket {
                description: request.description,
                location: request.location,
                category,
                reported_by,
            })
            .inspect_err(|e| error!("Error creating ticket: {}", e))?;

        TICKETS_CREATED
            .with_label_values(&[ticket.category.label()])
            .inc();
        info!(
            ticket_id = %ticket.ticket_id,
            category = %ticket.category,
            "Created ticket"
        );

        Ok(ticket)
    }

    /// All tickets, newest first, capped at [`MAX_LIST_TICKETS`].
    pub fn list_tickets(&self) -> Result<Vec<Ticket>, TicketError> {
        self.store
            .list(MAX_LIST_TICKETS)
            .inspect_err(|e| error!("Error fetching tickets: {}", e))
    }

    /// Move a ticket to `status`.
    pub fn update_status(&self, id: &str, status: TicketStatus) -> Result<Ticket, TicketError> {
        match self.store.update_status(id, status) {
            Ok(ticket) => {
                STATUS_TRANSITIONS
                    .with_label_values(&[status.as_str()])
                    .inc();
                info!(ticket_id = %id, status = %status, "Updated ticket status");
                Ok(ticket)
            }
            Err(e) => {
                let reason = match &e {
                    TicketError::NotFound(_) => {
                        warn!(ticket_id = %id, "Status update for unknown ticket");
                        "not_found"
                    }
                    TicketError::InvalidTransition { .. } => {
                        warn!(ticket_id = %id, "{}", e);
                        "invalid_transition"
                    }
                    _ => {
                        error!(ticket_id = %id, "Error updating ticket: {}", e);
                        "error"
                    }
                };
                STATUS_UPDATES_REJECTED.with_label_values(&[reason]).inc();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use crate::ticket::SqliteTicketStore;

    fn create_test_service() -> TicketService {
        TicketService::new(Arc::new(SqliteTicketStore::in_memory().unwrap()))
    }

    fn report(description: &str, location: &str, reported_by: Option<&str>) -> ReportRequest {
        ReportRequest {
            description: description.to_string(),
            location: location.to_string(),
            reported_by: reported_by.map(str::to_string),
        }
    }

    #[test]
    fn test_create_classifies_and_starts_pending() {
        let service = create_test_service();
        let ticket = service
            .create_ticket(report("Large pothole near market", "Market Road", None))
            .unwrap();

        assert_eq!(ticket.ticket_id, "TICK-001");
        assert_eq!(ticket.category, Category::RoadsInfrastructure);
        assert_eq!(ticket.status, TicketStatus::Pending);
        assert_eq!(ticket.location, "Market Road");
        assert!(ticket.dispatched_at.is_none());
        assert!(ticket.resolved_at.is_none());
    }

    #[test]
    fn test_missing_or_blank_reporter_is_anonymous() {
        let service = create_test_service();

        for reported_by in [None, Some(""), Some("   ")] {
            let ticket = service
                .create_ticket(report("Trash on the corner", "Main St", reported_by))
                .unwrap();
            assert_eq!(ticket.reported_by, ANONYMOUS_REPORTER);
        }

        let ticket = service
            .create_ticket(report("Trash on the corner", "Main St", Some("Kavita Rao")))
            .unwrap();
        assert_eq!(ticket.reported_by, "Kavita Rao");
    }

    #[test]
    fn test_blank_description_rejected() {
        let service = create_test_service();
        let result = service.create_ticket(report("  ", "Main St", None));

        assert!(matches!(result, Err(TicketError::Validation(_))));
        assert!(service.list_tickets().unwrap().is_empty());
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let service = create_test_service();
        let ids: Vec<String> = ["Broken lamp", "Dirty park", "Pipe burst"]
            .iter()
            .map(|d| service.create_ticket(report(d, "Somewhere", None)).unwrap().ticket_id)
            .collect();

        assert_eq!(ids, vec!["TICK-001", "TICK-002", "TICK-003"]);
    }

    #[test]
    fn test_list_newest_first_and_idempotent() {
        let service = create_test_service();
        service
            .create_ticket(report("Broken lamp", "A", None))
            .unwrap();
        service
            .create_ticket(report("Dirty park", "B", None))
            .unwrap();

        let first = service.list_tickets().unwrap();
        let second = service.list_tickets().unwrap();

        assert_eq!(first, second);
        assert_eq!(first[0].ticket_id, "TICK-002");
        assert_eq!(first[1].ticket_id, "TICK-001");
    }

    #[test]
    fn test_list_capped_at_newest_thousand() {
        let service = create_test_service();
        let total = MAX_LIST_TICKETS + 3;
        for i in 0..total {
            service
                .create_ticket(report(&format!("Report {}", i), "Ward 7", None))
                .unwrap();
        }

        let tickets = service.list_tickets().unwrap();

        assert_eq!(tickets.len() as i64, MAX_LIST_TICKETS);
        assert_eq!(tickets[0].ticket_id, "TICK-1003");
        assert_eq!(tickets[tickets.len() - 1].ticket_id, "TICK-004");
    }

    #[test]
    fn test_status_lifecycle() {
        let service = create_test_service();
        let ticket = service
            .create_ticket(report("Power outage", "Sector 4", None))
            .unwrap();

        let dispatched = service
            .update_status(&ticket.ticket_id, TicketStatus::Dispatched)
            .unwrap();
        assert!(dispatched.dispatched_at.is_some());
        assert!(dispatched.resolved_at.is_none());

        let resolved = service
            .update_status(&ticket.ticket_id, TicketStatus::Resolved)
            .unwrap();
        assert_eq!(resolved.dispatched_at, dispatched.dispatched_at);
        assert!(resolved.resolved_at.is_some());
    }

    #[test]
    fn test_update_unknown_ticket_is_not_found() {
        let service = create_test_service();
        let result = service.update_status("TICK-999", TicketStatus::Dispatched);
        assert!(matches!(result, Err(TicketError::NotFound(_))));
    }

    #[test]
    fn test_backwards_transition_rejected() {
        let service = create_test_service();
        let ticket = service
            .create_ticket(report("Accident at junction", "NH 44", None))
            .unwrap();
        service
            .update_status(&ticket.ticket_id, TicketStatus::Dispatched)
            .unwrap();
        service
            .update_status(&ticket.ticket_id, TicketStatus::Resolved)
            .unwrap();

        let result = service.update_status(&ticket.ticket_id, TicketStatus::Pending);
        assert!(matches!(result, Err(TicketError::InvalidTransition { .. })));
    }
}
