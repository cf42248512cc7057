pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod remote;
pub mod session;
pub mod store;
pub mod types;

pub use config::{Config, Theme};
pub use error::{DeskError, Result};
pub use remote::{HttpTicketService, NewTicket, TicketService};
pub use session::{Action, Overlay, TicketSession};
pub use store::{TicketFilter, TicketStats, TicketStore};
pub use types::{
    BadgeColor, Priority, Ticket, TicketStatus, TicketUpdate, VALID_PRIORITIES, VALID_STATUSES,
};
