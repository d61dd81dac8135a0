use std::sync::Arc;

use directline_core::{TicketService, TicketStore};

/// Shared application state
pub struct AppState {
    tickets: TicketService,
}

impl AppState {
    pub fn new(ticket_store: Arc<dyn TicketStore>) -> Self {
        Self {
            tickets: TicketService::new(ticket_store),
        }
    }

    pub fn tickets(&self) -> &TicketService {
        &self.tickets
    }
}
