//! Ticket session: one ticket open in the detail view.
//!
//! A session owns a local mirror of the ticket, the agent's draft reply, the
//! latest AI suggestion and the active [`Overlay`]. Remote-backed operations
//! are optimistic: the mirror changes before the request is sent, is
//! reconciled with the ticket the service returns, and is rolled back if the
//! request fails.
//!
//! Requests run on their own task. If the caller stops awaiting an operation
//! the request still completes, and its result is dropped.
//!
//! Dropping the session cancels a pending rating prompt.

pub mod overlay;
pub mod pending;
pub mod schedule;
pub mod suggest;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::error::{DeskError, Result};
use crate::remote::TicketService;
use crate::types::{MAX_RATING, MIN_RATING, Ticket, TicketStatus, TicketUpdate};

pub use overlay::{INFO_KINDS, Overlay, TEAM_MEMBERS};
pub use pending::{Action, PendingActions};
pub use schedule::{RATING_PROMPT_DELAY, ScheduledTransition};
pub use suggest::{FALLBACK_SUGGESTIONS, pick_fallback};

pub const NO_NOTES: &str = "No notes provided";

#[derive(Debug, Clone)]
struct SessionState {
    ticket: Ticket,
    draft: String,
    ai_suggestion: String,
}

pub struct TicketSession<S: TicketService> {
    service: Arc<S>,
    state: Mutex<SessionState>,
    overlay: Arc<watch::Sender<Overlay>>,
    pending: PendingActions,
    rating_prompt: Mutex<ScheduledTransition>,
    rating_delay: Duration,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl<S: TicketService> TicketSession<S> {
    /// Open a session seeded from a ticket snapshot
    pub fn new(service: Arc<S>, ticket: Ticket) -> Self {
        Self::with_rng(service, ticket, StdRng::from_os_rng())
    }

    /// Open a session with an explicit randomness source for fallback replies
    pub fn with_rng<R: RngCore + Send + 'static>(service: Arc<S>, ticket: Ticket, rng: R) -> Self {
        let (overlay, _) = watch::channel(Overlay::Idle);
        Self {
            service,
            state: Mutex::new(SessionState {
                ticket,
                draft: String::new(),
                ai_suggestion: String::new(),
            }),
            overlay: Arc::new(overlay),
            pending: PendingActions::default(),
            rating_prompt: Mutex::new(ScheduledTransition::default()),
            rating_delay: RATING_PROMPT_DELAY,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Override the delay before the rating prompt
    pub fn rating_delay(mut self, delay: Duration) -> Self {
        self.rating_delay = delay;
        self
    }

    /// Tear the session down, cancelling any scheduled transition
    pub fn close(self) {
        self.rating_prompt.lock().cancel();
    }

    // Read access

    pub fn ticket(&self) -> Ticket {
        self.state.lock().ticket.clone()
    }

    pub fn ticket_id(&self) -> u64 {
        self.state.lock().ticket.id
    }

    pub fn draft(&self) -> String {
        self.state.lock().draft.clone()
    }

    pub fn ai_suggestion(&self) -> String {
        self.state.lock().ai_suggestion.clone()
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay.borrow().clone()
    }

    /// Watch overlay changes, including the deferred rating prompt
    pub fn subscribe(&self) -> watch::Receiver<Overlay> {
        self.overlay.subscribe()
    }

    pub fn is_pending(&self, action: Action) -> bool {
        self.pending.is_pending(action)
    }

    pub fn rating_prompt_scheduled(&self) -> bool {
        self.rating_prompt.lock().is_scheduled()
    }

    // Overlay transitions driven by the agent

    pub fn open_assign(&self) {
        self.set_overlay(Overlay::Assigning);
    }

    pub fn open_notes(&self) {
        self.set_overlay(Overlay::adding_notes());
    }

    pub fn open_request_info(&self) {
        self.set_overlay(Overlay::RequestingInfo);
    }

    pub fn open_escalate(&self) {
        self.set_overlay(Overlay::Escalating);
    }

    pub fn open_rating(&self) {
        self.set_overlay(Overlay::Rating);
    }

    /// Cancel the open overlay or dismiss a result
    pub fn close_overlay(&self) {
        self.set_overlay(Overlay::Idle);
    }

    /// Update the notes being typed. Returns false if the notes overlay is not open.
    pub fn set_notes_input(&self, text: &str) -> bool {
        self.overlay.send_if_modified(|overlay| overlay.set_input(text))
    }

    pub fn set_draft(&self, text: impl Into<String>) {
        self.state.lock().draft = text.into();
    }

    /// Copy the current AI suggestion into the draft
    pub fn accept_suggestion(&self) {
        let mut state = self.state.lock();
        if !state.ai_suggestion.is_empty() {
            state.draft = state.ai_suggestion.clone();
        }
    }

    fn set_overlay(&self, overlay: Overlay) {
        self.overlay.send_replace(overlay);
    }

    fn show_result(&self, message: String) {
        self.set_overlay(Overlay::ShowingResult(message));
    }

    // Remote-backed operations

    /// Change the ticket status. A confirmed `resolved` schedules the rating prompt.
    pub async fn change_status(&self, status: TicketStatus) -> Result<Ticket> {
        let ticket = self
            .apply_update(
                Action::ChangeStatus,
                TicketUpdate::status(status),
                format!("Status updated to: {}", status),
            )
            .await?;

        if status == TicketStatus::Resolved {
            self.rating_prompt
                .lock()
                .schedule(&self.overlay, Overlay::Rating, self.rating_delay);
        }
        Ok(ticket)
    }

    /// Assign to a team member, which also moves the ticket in progress
    pub async fn assign(&self, member: &str) -> Result<Ticket> {
        let update = TicketUpdate {
            assigned_to: Some(member.to_string()),
            status: Some(TicketStatus::InProgress),
            ..Default::default()
        };
        self.apply_update(
            Action::Assign,
            update,
            format!(
                "Ticket assigned to: {} and status updated to {}",
                member,
                TicketStatus::InProgress.label()
            ),
        )
        .await
    }

    pub async fn escalate(&self) -> Result<Ticket> {
        self.apply_update(
            Action::Escalate,
            TicketUpdate::status(TicketStatus::Escalated),
            "Ticket escalated to senior support team!".to_string(),
        )
        .await
    }

    /// Record the customer's satisfaction rating (1-5)
    pub async fn rate(&self, rating: u8) -> Result<Ticket> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DeskError::InvalidRating(rating));
        }

        let update = TicketUpdate {
            customer_rating: Some(rating),
            ..Default::default()
        };
        self.apply_update(
            Action::Rate,
            update,
            format!("Thank you! Customer rated: {}/5 stars", rating),
        )
        .await
    }

    /// Fetch a drafted reply and put it in the draft.
    ///
    /// Service failures are never reported: one of the fallback replies is
    /// used instead. The only error is a request already in flight.
    pub async fn request_ai_suggestion(&self) -> Result<String> {
        let _guard = self.pending.begin(Action::AiSuggestion)?;
        let text = self.state.lock().ticket.text.clone();

        let service = Arc::clone(&self.service);
        let outcome = tokio::spawn(async move { service.suggest_response(&text).await }).await;

        let suggestion = match flatten(outcome) {
            Ok(suggestion) => suggestion,
            Err(e) => {
                warn!("Failed to get AI suggestion, using fallback: {}", e);
                pick_fallback(&mut **self.rng.lock()).to_string()
            }
        };

        let mut state = self.state.lock();
        state.ai_suggestion = suggestion.clone();
        state.draft = suggestion.clone();
        Ok(suggestion)
    }

    // Local-only operations

    /// Add an internal note. Nothing is sent to the service.
    pub fn add_notes(&self, notes: &str) {
        let notes = if notes.trim().is_empty() { NO_NOTES } else { notes };
        info!(ticket = self.ticket_id(), "internal note added");
        self.show_result(format!("Internal note added: \"{}\"", notes));
    }

    /// Add the note typed into the notes overlay
    pub fn submit_notes(&self) {
        let notes = match self.overlay() {
            Overlay::AddingNotes { notes } => notes,
            _ => String::new(),
        };
        self.add_notes(&notes);
    }

    /// Ask the customer for more information. Nothing is sent to the service.
    pub fn request_info(&self, kind: &str) {
        info!(ticket = self.ticket_id(), kind, "information requested");
        self.show_result("Information request sent to customer!".to_string());
    }

    /// Send the draft reply, clearing it. A blank draft is rejected unchanged.
    pub fn submit_response(&self) -> Result<String> {
        let response = {
            let mut state = self.state.lock();
            if state.draft.trim().is_empty() {
                return Err(DeskError::EmptyResponse);
            }
            std::mem::take(&mut state.draft)
        };

        self.show_result(format!("Response sent to customer: \"{}\"", response));
        Ok(response)
    }

    /// The optimistic-update protocol shared by every remote-backed operation
    async fn apply_update(
        &self,
        action: Action,
        update: TicketUpdate,
        message: String,
    ) -> Result<Ticket> {
        let _guard = self.pending.begin(action)?;

        let (id, previous) = {
            let mut state = self.state.lock();
            let previous = update.apply_to(&mut state.ticket);
            (state.ticket.id, previous)
        };

        let service = Arc::clone(&self.service);
        let request = update.clone();
        let outcome =
            tokio::spawn(async move { service.update_ticket(id, &request).await }).await;

        match flatten(outcome) {
            Ok(confirmed) => {
                let ticket = {
                    let mut state = self.state.lock();
                    state.ticket.apply_confirmed(&confirmed);
                    state.ticket.clone()
                };
                info!(ticket = id, ?update, "{} confirmed", action);
                self.show_result(message);
                Ok(ticket)
            }
            Err(e) => {
                error!(ticket = id, "Failed to apply {}: {}", action, e);
                self.rollback(&update, &previous);
                self.close_overlay();
                Err(e)
            }
        }
    }

    /// Restore fields that still hold the value this update set. A field a
    /// later operation has changed since is left alone.
    fn rollback(&self, update: &TicketUpdate, previous: &Ticket) {
        let mut state = self.state.lock();
        let ticket = &mut state.ticket;

        if update.status.is_some_and(|s| ticket.status == s) {
            ticket.status = previous.status;
        }
        if update.assigned_to.is_some() && ticket.assigned_to == update.assigned_to {
            ticket.assigned_to = previous.assigned_to.clone();
        }
        if update.customer_rating.is_some() && ticket.customer_rating == update.customer_rating {
            ticket.customer_rating = previous.customer_rating;
        }
    }
}

fn flatten<T>(outcome: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    outcome.unwrap_or_else(|e| Err(DeskError::NetworkFailure(format!("request task failed: {e}"))))
}
