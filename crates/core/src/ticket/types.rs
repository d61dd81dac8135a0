//! Core ticket data types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::Category;

/// Prefix shared by every ticket id.
pub const TICKET_ID_PREFIX: &str = "TICK-";

/// Format a ticket sequence number as a display id (`TICK-001`).
pub fn format_ticket_id(seq: i64) -> String {
    format!("{}{:03}", TICKET_ID_PREFIX, seq)
}

/// Parse a display id back into its sequence number.
///
/// Only the exact form produced by [`format_ticket_id`] is accepted.
pub fn parse_ticket_id(id: &str) -> Option<i64> {
    let seq: i64 = id.strip_prefix(TICKET_ID_PREFIX)?.parse().ok()?;
    (seq >= 1 && format_ticket_id(seq) == id).then_some(seq)
}

/// Lifecycle stage of a ticket.
///
/// Tickets only move forward: `Pending -> Dispatched -> Resolved`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    /// Reported, nobody assigned yet.
    Pending,
    /// A crew has been sent out.
    Dispatched,
    /// Issue fixed.
    Resolved,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [
        TicketStatus::Pending,
        TicketStatus::Dispatched,
        TicketStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "Pending",
            TicketStatus::Dispatched => "Dispatched",
            TicketStatus::Resolved => "Resolved",
        }
    }

    /// Returns true if the transition table allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        matches!(
            (self, next),
            (TicketStatus::Pending, TicketStatus::Dispatched)
                | (TicketStatus::Dispatched, TicketStatus::Resolved)
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown ticket status: {}", s))
    }
}

/// A citizen issue report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Display id, `TICK-NNN`.
    #[serde(rename = "id")]
    pub ticket_id: String,
    pub description: String,
    pub location: String,
    pub category: Category,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub reported_by: String,
    /// Set once, when the ticket moves to `Dispatched`.
    pub dispatched_at: Option<DateTime<Utc>>,
    /// Set once, when the ticket moves to `Resolved`.
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Fields the store needs to create a ticket. Id, status and timestamps are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub description: String,
    pub location: String,
    pub category: Category,
    pub reported_by: String,
}
