//! Demonstration data for a fresh installation.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use super::{format_ticket_id, Ticket, TicketError, TicketStatus, TicketStore};
use crate::classifier::Category;

struct SeedTicket {
    description: &'static str,
    location: &'static str,
    category: Category,
    status: TicketStatus,
    reported_by: &'static str,
    created_ago: Duration,
    dispatched_ago: Option<Duration>,
    resolved_ago: Option<Duration>,
}

fn seed_table() -> [SeedTicket; 6] {
    [
        SeedTicket {
            description: "Large pothole near Tea Lobby Cafe causing traffic issues",
            location: "Tea Lobby Cafe, Gwalior",
            category: Category::RoadsInfrastructure,
            status: TicketStatus::Pending,
            reported_by: "Rajesh Kumar",
            created_ago: Duration::hours(2),
            dispatched_ago: None,
            resolved_ago: None,
        },
        SeedTicket {
            description: "Garbage not collected for 3 days, causing health hazard",
            location: "Lashkar Area, Gwalior",
            category: Category::Sanitation,
            status: TicketStatus::Dispatched,
            reported_by: "Priya Sharma",
            created_ago: Duration::hours(5),
            dispatched_ago: Some(Duration::hours(1)),
            resolved_ago: None,
        },
        SeedTicket {
            description: "Street light not working for past week",
            location: "City Center, Gwalior",
            category: Category::Electricity,
            status: TicketStatus::Pending,
            reported_by: "Amit Verma",
            created_ago: Duration::hours(8),
            dispatched_ago: None,
            resolved_ago: None,
        },
        SeedTicket {
            description: "Water pipe leaking causing road flooding",
            location: "Madhav Nagar, Gwalior",
            category: Category::WaterSupply,
            status: TicketStatus::Resolved,
            reported_by: "Sunita Gupta",
            created_ago: Duration::days(1),
            dispatched_ago: Some(Duration::hours(20)),
            resolved_ago: Some(Duration::hours(12)),
        },
        SeedTicket {
            description: "Broken pavement near school entrance creating danger for children",
            location: "Model School Road, Gwalior",
            category: Category::PublicSafety,
            status: TicketStatus::Pending,
            reported_by: "Mohan Singh",
            created_ago: Duration::hours(12),
            dispatched_ago: None,
            resolved_ago: None,
        },
        SeedTicket {
            description: "Illegal dumping of construction waste",
            location: "Residency Area, Gwalior",
            category: Category::Sanitation,
            status: TicketStatus::Dispatched,
            reported_by: "Kavita Rao",
            created_ago: Duration::hours(15),
            dispatched_ago: Some(Duration::hours(3)),
            resolved_ago: None,
        },
    ]
}

/// Build the demonstration tickets with timestamps relative to `now`.
///
/// Categories are curated by hand rather than taken from the classifier.
pub fn seed_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    seed_table()
        .into_iter()
        .enumerate()
        .map(|(i, seed)| Ticket {
            ticket_id: format_ticket_id(i as i64 + 1),
            description: seed.description.to_string(),
            location: seed.location.to_string(),
            category: seed.category,
            status: seed.status,
            created_at: now - seed.created_ago,
            reported_by: seed.reported_by.to_string(),
            dispatched_at: seed.dispatched_ago.map(|ago| now - ago),
            resolved_at: seed.resolved_ago.map(|ago| now - ago),
        })
        .collect()
}

/// Replace the store contents with the demonstration tickets.
///
/// Runs as one store transaction, so a failure leaves the previous contents
/// in place. Returns the number of inserted tickets.
pub fn seed_store(store: &dyn TicketStore, now: DateTime<Utc>) -> Result<usize, TicketError> {
    let tickets = seed_tickets(now);
    let inserted = tickets.len();

    let removed = store.replace_all(tickets)?;
    info!("Replaced {} existing tickets", removed);

    Ok(inserted)
}
