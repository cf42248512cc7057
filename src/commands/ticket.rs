//! One-shot session operations: open a session, run one operation, close it.

use serde_json::json;

use super::{CommandOutput, Context, resolve_member};
use crate::error::Result;
use crate::remote::HttpTicketService;
use crate::session::TicketSession;
use crate::types::{Ticket, TicketStatus};

fn confirmed_output(
    session: &TicketSession<HttpTicketService>,
    ticket: &Ticket,
    action: &str,
) -> CommandOutput {
    let message = session
        .overlay()
        .result_message()
        .map(str::to_string)
        .unwrap_or_default();

    CommandOutput::new(json!({
        "id": ticket.id,
        "action": action,
        "message": message,
        "ticket": ticket,
    }))
    .with_text(message)
}

/// Set a ticket's status
pub async fn cmd_status(id: u64, status: TicketStatus, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let session = ctx.open_session(id).await?;
    let ticket = session.change_status(status).await?;
    ctx.store.reconcile(&ticket);

    let mut output = confirmed_output(&session, &ticket, "status_changed");
    if status == TicketStatus::Resolved && !output_json {
        let message = session.overlay().result_message().unwrap_or_default().to_string();
        output = output.with_text(format!(
            "{}\nRecord the customer's rating with: ticketdesk rate {} <1-5>",
            message, id
        ));
    }
    session.close();
    output.print(output_json)
}

/// Assign a ticket to a team member (menu number or name)
pub async fn cmd_assign(id: u64, member: &str, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let session = ctx.open_session(id).await?;
    let ticket = session.assign(&resolve_member(member)).await?;
    ctx.store.reconcile(&ticket);

    let output = confirmed_output(&session, &ticket, "assigned");
    session.close();
    output.print(output_json)
}

/// Escalate a ticket to senior support
pub async fn cmd_escalate(id: u64, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let session = ctx.open_session(id).await?;
    let ticket = session.escalate().await?;
    ctx.store.reconcile(&ticket);

    let output = confirmed_output(&session, &ticket, "escalated");
    session.close();
    output.print(output_json)
}

/// Record a customer satisfaction rating
pub async fn cmd_rate(id: u64, rating: u8, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let session = ctx.open_session(id).await?;
    let ticket = session.rate(rating).await?;
    ctx.store.reconcile(&ticket);

    let output = confirmed_output(&session, &ticket, "rated");
    session.close();
    output.print(output_json)
}

/// Print a drafted reply for a ticket
pub async fn cmd_suggest(id: u64, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let session = ctx.open_session(id).await?;
    let suggestion = session.request_ai_suggestion().await?;
    session.close();

    CommandOutput::new(json!({
        "id": id,
        "suggestion": suggestion,
    }))
    .with_text(suggestion)
    .print(output_json)
}
