//! Ticket system for citizen issue reports.

mod seed;
mod service;
mod sqlite_store;
mod store;
mod types;

pub use seed::{seed_store, seed_tickets};
pub use service::{ReportRequest, TicketService, ANONYMOUS_REPORTER, MAX_LIST_TICKETS};
pub use sqlite_store::SqliteTicketStore;
pub use store::{TicketError, TicketStore};
pub use types::{format_ticket_id, parse_ticket_id, NewTicket, Ticket, TicketStatus, TICKET_ID_PREFIX};
