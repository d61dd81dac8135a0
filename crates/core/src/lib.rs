pub mod classifier;
pub mod config;
pub mod metrics;
pub mod ticket;

pub use classifier::{classify, Category};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ServerConfig,
};
pub use ticket::{
    seed_store, ReportRequest, SqliteTicketStore, Ticket, TicketError, TicketService,
    TicketStatus, TicketStore,
};
