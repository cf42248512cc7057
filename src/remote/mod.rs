//! Ticket service client.
//!
//! The ticket service owns persistence, priority assignment and AI reply
//! drafting. This module defines the [`TicketService`] seam the store and
//! sessions talk to, and the HTTP implementation used by the binary.

pub mod error;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Ticket, TicketUpdate};

pub use error::ApiError;
pub use http::HttpTicketService;

pub const TICKETS_PATH: &str = "api/tickets";
pub const SUGGEST_PATH: &str = "api/ai/suggest-response";

/// Body of `POST /api/tickets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub text: String,
    pub source: String,
}

impl NewTicket {
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
        }
    }
}

/// Body of `POST /api/ai/suggest-response`
#[derive(Debug, Clone, Serialize)]
pub struct SuggestRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub suggestion: Option<String>,
}

/// Operations the dashboard needs from the ticket service.
///
/// Every failure is reported as [`crate::DeskError::NetworkFailure`].
pub trait TicketService: Send + Sync + 'static {
    /// Fetch every ticket
    fn list_tickets(&self) -> impl std::future::Future<Output = Result<Vec<Ticket>>> + Send;

    /// Submit a new ticket, returning it as created by the service
    fn create_ticket(
        &self,
        ticket: &NewTicket,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    /// Apply a partial update, returning the updated ticket
    fn update_ticket(
        &self,
        id: u64,
        update: &TicketUpdate,
    ) -> impl std::future::Future<Output = Result<Ticket>> + Send;

    /// Ask for a drafted reply to a customer message
    fn suggest_response(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
