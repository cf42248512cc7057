//! Ticket store: the last-fetched snapshot of the ticket list.
//!
//! The snapshot is only ever replaced wholesale by [`TicketStore::fetch_all`],
//! or patched one ticket at a time with a session-confirmed ticket through
//! [`TicketStore::reconcile`]. Filtering and stats are derived on demand.

pub mod demo;
pub mod filter;
pub mod stats;

use std::sync::Arc;

use rand::Rng;
use tracing::{info, warn};

use crate::error::{DeskError, Result};
use crate::remote::{NewTicket, TicketService};
use crate::types::Ticket;

pub use demo::{DEFAULT_DEMO_COUNT, DEMO_SCENARIOS, DEMO_SOURCE, pick_scenario};
pub use filter::TicketFilter;
pub use stats::{PriorityCounts, StatusCounts, TicketStats};

pub struct TicketStore<S: TicketService> {
    service: Arc<S>,
    tickets: Vec<Ticket>,
}

impl<S: TicketService> TicketStore<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self {
            service,
            tickets: Vec::new(),
        }
    }

    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn get(&self, id: u64) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == id)
    }

    /// Like [`TicketStore::get`], but a missing ticket is an error
    pub fn require(&self, id: u64) -> Result<&Ticket> {
        self.get(id).ok_or(DeskError::TicketNotFound(id))
    }

    /// Replace the snapshot with the service's current ticket list.
    ///
    /// On failure the previous snapshot is kept.
    pub async fn fetch_all(&mut self) -> Result<&[Ticket]> {
        match self.service.list_tickets().await {
            Ok(tickets) => {
                info!(count = tickets.len(), "fetched tickets");
                self.tickets = tickets;
                Ok(&self.tickets)
            }
            Err(e) => {
                warn!("Failed to fetch tickets, keeping {} cached: {}", self.tickets.len(), e);
                Err(e)
            }
        }
    }

    /// Submit a new ticket. The snapshot is unchanged until the next fetch.
    pub async fn create(&self, text: &str, source: &str) -> Result<Ticket> {
        let ticket = self
            .service
            .create_ticket(&NewTicket::new(text, source))
            .await
            .inspect_err(|e| warn!("Failed to create ticket: {}", e))?;
        info!(id = ticket.id, priority = %ticket.priority, "created ticket");
        Ok(ticket)
    }

    /// Replace one ticket in the snapshot with a confirmed copy
    pub fn reconcile(&mut self, ticket: &Ticket) {
        if let Some(existing) = self.tickets.iter_mut().find(|t| t.id == ticket.id) {
            *existing = ticket.clone();
        }
    }

    pub fn filter(&self, filter: &TicketFilter) -> Vec<&Ticket> {
        filter.apply(&self.tickets)
    }

    pub fn stats(&self) -> TicketStats {
        TicketStats::compute(&self.tickets)
    }

    /// Create `count` demo tickets from random scenarios, then refresh.
    ///
    /// Individual create failures are logged and skipped. Returns how many
    /// tickets were created.
    pub async fn generate_demo<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> Result<usize> {
        let mut created = 0;
        for _ in 0..count {
            let text = pick_scenario(rng);
            if self.create(text, DEMO_SOURCE).await.is_ok() {
                created += 1;
            }
        }

        self.fetch_all().await?;
        Ok(created)
    }
}
