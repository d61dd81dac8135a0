//! SQLite-backed ticket store implementation.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use super::{
    format_ticket_id, parse_ticket_id, NewTicket, Ticket, TicketError, TicketStatus, TicketStore,
};
use crate::classifier::Category;

const SELECT_COLUMNS: &str = "ticket_id, description, location, category, status, created_at, reported_by, dispatched_at, resolved_at";

/// SQLite-backed ticket store.
pub struct SqliteTicketStore {
    conn: Mutex<Connection>,
}

impl SqliteTicketStore {
    /// Create a new SQLite ticket store, creating the database file and tables if needed.
    pub fn new(path: &Path) -> Result<Self, TicketError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite ticket store (useful for testing).
    pub fn in_memory() -> Result<Self, TicketError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), TicketError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                ticket_id TEXT PRIMARY KEY,
                seq INTEGER NOT NULL UNIQUE,
                description TEXT NOT NULL,
                location TEXT NOT NULL,
                category TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                reported_by TEXT NOT NULL,
                dispatched_at TEXT,
                resolved_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_tickets_created_at ON tickets(created_at DESC);
            "#,
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, TicketError> {
        self.conn
            .lock()
            .map_err(|_| TicketError::Database("ticket store lock poisoned".to_string()))
    }

    fn next_seq(conn: &Connection) -> rusqlite::Result<i64> {
        conn.query_row("SELECT COALESCE(MAX(seq), 0) + 1 FROM tickets", [], |row| {
            row.get(0)
        })
    }

    fn seq_of(ticket: &Ticket) -> Result<i64, TicketError> {
        parse_ticket_id(&ticket.ticket_id).ok_or_else(|| {
            TicketError::Validation(format!("malformed ticket id: {}", ticket.ticket_id))
        })
    }

    fn insert_row(conn: &Connection, seq: i64, ticket: &Ticket) -> rusqlite::Result<()> {
        conn.execute(
            &format!(
                "INSERT INTO tickets (seq, {}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                SELECT_COLUMNS
            ),
            params![
                seq,
                ticket.ticket_id,
                ticket.description,
                ticket.location,
                ticket.category.label(),
                ticket.status.as_str(),
                encode_time(&ticket.created_at),
                ticket.reported_by,
                ticket.dispatched_at.as_ref().map(encode_time),
                ticket.resolved_at.as_ref().map(encode_time),
            ],
        )?;
        Ok(())
    }

    fn row_to_ticket(row: &rusqlite::Row) -> rusqlite::Result<Ticket> {
        let category: String = row.get(3)?;
        let status: String = row.get(4)?;
        let created_at: String = row.get(5)?;
        let dispatched_at: Option<String> = row.get(7)?;
        let resolved_at: Option<String> = row.get(8)?;

        Ok(Ticket {
            ticket_id: row.get(0)?,
            description: row.get(1)?,
            location: row.get(2)?,
            category: category
                .parse::<Category>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?,
            status: status
                .parse::<TicketStatus>()
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, e.into()))?,
            created_at: decode_time(5, &created_at)?,
            reported_by: row.get(6)?,
            dispatched_at: dispatched_at.map(|s| decode_time(7, &s)).transpose()?,
            resolved_at: resolved_at.map(|s| decode_time(8, &s)).transpose()?,
        })
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn encode_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn decode_time(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl TicketStore for SqliteTicketStore {
    fn create(&self, ticket: NewTicket) -> Result<Ticket, TicketError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let seq = Self::next_seq(&tx)?;
        let ticket = Ticket {
            ticket_id: format_ticket_id(seq),
            description: ticket.description,
            location: ticket.location,
            category: ticket.category,
            status: TicketStatus::Pending,
            created_at: Utc::now(),
            reported_by: ticket.reported_by,
            dispatched_at: None,
            resolved_at: None,
        };

        Self::insert_row(&tx, seq, &ticket)?;
        tx.commit()?;

        Ok(ticket)
    }

    fn insert(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        let seq = Self::seq_of(&ticket)?;
        let conn = self.conn()?;
        Self::insert_row(&conn, seq, &ticket)?;
        Ok(ticket)
    }

    fn list(&self, limit: i64) -> Result<Vec<Ticket>, TicketError> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tickets ORDER BY created_at DESC, seq DESC LIMIT ?",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![limit], Self::row_to_ticket)?;

        let mut tickets = Vec::new();
        for row_result in rows {
            tickets.push(row_result?);
        }

        Ok(tickets)
    }

    fn count(&self) -> Result<i64, TicketError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tickets", [], |row| row.get(0))?;
        Ok(count)
    }

    fn update_status(&self, id: &str, status: TicketStatus) -> Result<Ticket, TicketError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let current = tx
            .query_row(
                &format!("SELECT {} FROM tickets WHERE ticket_id = ?", SELECT_COLUMNS),
                params![id],
                Self::row_to_ticket,
            )
            .optional()?
            .ok_or_else(|| TicketError::NotFound(id.to_string()))?;

        if !current.status.can_transition_to(status) {
            return Err(TicketError::InvalidTransition {
                ticket_id: id.to_string(),
                from: current.status,
                to: status,
            });
        }

        let now = Utc::now();
        let mut updated = Ticket { status, ..current };
        match status {
            TicketStatus::Dispatched => updated.dispatched_at = Some(now),
            TicketStatus::Resolved => updated.resolved_at = Some(now),
            TicketStatus::Pending => {}
        }

        tx.execute(
            "UPDATE tickets SET status = ?, dispatched_at = ?, resolved_at = ? WHERE ticket_id = ?",
            params![
                updated.status.as_str(),
                updated.dispatched_at.as_ref().map(encode_time),
                updated.resolved_at.as_ref().map(encode_time),
                id,
            ],
        )?;
        tx.commit()?;

        Ok(updated)
    }

    fn replace_all(&self, tickets: Vec<Ticket>) -> Result<usize, TicketError> {
        let rows = tickets
            .iter()
            .map(|ticket| Self::seq_of(ticket).map(|seq| (seq, ticket)))
            .collect::<Result<Vec<_>, TicketError>>()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let removed = tx.execute("DELETE FROM tickets", [])?;
        for (seq, ticket) in rows {
            Self::insert_row(&tx, seq, ticket)?;
        }
        tx.commit()?;

        Ok(removed)
    }
}
