//! Ticket storage trait and errors.

use thiserror::Error;

use crate::ticket::{NewTicket, Ticket, TicketStatus};

/// Error type for ticket operations.
#[derive(Debug, Error)]
pub enum TicketError {
    /// Ticket not found.
    #[error("Ticket not found: {0}")]
    NotFound(String),

    /// The requested status change is not in the transition table.
    #[error("Cannot move ticket {ticket_id} from {from} to {to}")]
    InvalidTransition {
        ticket_id: String,
        from: TicketStatus,
        to: TicketStatus,
    },

    /// Request data failed validation.
    #[error("Invalid ticket: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for TicketError {
    fn from(e: rusqlite::Error) -> Self {
        TicketError::Database(e.to_string())
    }
}

/// Trait for ticket storage backends.
///
/// Every method is atomic with respect to the other methods on the same store.
pub trait TicketStore: Send + Sync {
    /// Create a new ticket, assigning the next sequential id.
    fn create(&self, ticket: NewTicket) -> Result<Ticket, TicketError>;

    /// Persist a fully-formed ticket as-is.
    ///
    /// The sequence number is taken from the ticket id, which must be in the
    /// canonical `TICK-NNN` form.
    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError>;

    /// List tickets, newest first, returning at most `limit` rows.
    fn list(&self, limit: i64) -> Result<Vec<Ticket>, TicketError>;

    /// Count all tickets.
    fn count(&self) -> Result<i64, TicketError>;

    /// Move a ticket to a new status, stamping the matching timestamp.
    fn update_status(&self, id: &str, status: TicketStatus) -> Result<Ticket, TicketError>;

    /// Delete every ticket and insert `tickets` in a single transaction.
    /// Returns the number of removed rows.
    fn replace_all(&self, tickets: Vec<Ticket>) -> Result<usize, TicketError>;
}
