//! Interactive ticket session on stdin.
//!
//! Each input line is one agent action. Remote operations run in the
//! background so input and overlay changes keep flowing while a request is in
//! flight; only a second request of the same kind is refused until the first
//! one completes. Requests still running at `quit` are awaited before exit.

use std::io::Write;
use std::sync::Arc;

use owo_colors::{OwoColorize, Stream};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinSet};

use super::{Context, format_menu, resolve_member, resolve_option};
use crate::display::format_ticket_detail;
use crate::error::{DeskError, Result};
use crate::remote::HttpTicketService;
use crate::session::{Action, INFO_KINDS, Overlay, TEAM_MEMBERS, TicketSession};
use crate::types::{MAX_RATING, MIN_RATING, Ticket, TicketStatus, VALID_STATUSES};

const HELP: &str = "\
Commands:
  show                 show the ticket
  status <status>      change status (new, in-progress, resolved, escalated)
  assign [n|name]      assign to a team member
  note [text]          add an internal note
  info [n|kind]        request more information from the customer
  escalate             escalate to senior support (then 'confirm')
  rate [1-5]           record customer satisfaction
  suggest              draft a reply with AI
  draft <text>         write the reply draft
  accept               copy the AI suggestion into the draft
  send                 send the draft to the customer
  close                close the open dialog
  quit                 leave the ticket";

type Session = Arc<TicketSession<HttpTicketService>>;

enum Flow {
    Continue,
    Quit,
}

/// A service-backed operation started from the prompt
enum RemoteOp {
    Status(TicketStatus),
    Assign(String),
    Escalate,
    Rate(u8),
    Suggest,
}

enum Outcome {
    Updated(Ticket),
    Suggested(String),
}

impl RemoteOp {
    fn action(&self) -> Action {
        match self {
            RemoteOp::Status(_) => Action::ChangeStatus,
            RemoteOp::Assign(_) => Action::Assign,
            RemoteOp::Escalate => Action::Escalate,
            RemoteOp::Rate(_) => Action::Rate,
            RemoteOp::Suggest => Action::AiSuggestion,
        }
    }

    async fn run(self, session: Session) -> Result<Outcome> {
        match self {
            RemoteOp::Status(status) => session.change_status(status).await.map(Outcome::Updated),
            RemoteOp::Assign(member) => session.assign(&member).await.map(Outcome::Updated),
            RemoteOp::Escalate => session.escalate().await.map(Outcome::Updated),
            RemoteOp::Rate(rating) => session.rate(rating).await.map(Outcome::Updated),
            RemoteOp::Suggest => session
                .request_ai_suggestion()
                .await
                .map(Outcome::Suggested),
        }
    }
}

/// Remote operations started from the prompt and not yet reported
struct InFlight {
    tasks: JoinSet<Result<Outcome>>,
}

impl InFlight {
    fn new() -> Self {
        Self {
            tasks: JoinSet::new(),
        }
    }

    /// Start `op` in the background, unless the same kind is still running
    fn start(&mut self, session: &Session, op: RemoteOp) {
        let action = op.action();
        if session.is_pending(action) {
            eprintln!("{}", DeskError::ActionPending(action));
            return;
        }
        if action == Action::AiSuggestion {
            println!("Generating...");
        }
        self.tasks.spawn(op.run(Arc::clone(session)));
    }
}

/// Open a ticket and drive a session from stdin until `quit` or EOF
pub async fn cmd_open(id: u64) -> Result<()> {
    let mut ctx = Context::load()?;
    let session: Session = Arc::new(ctx.open_session(id).await?);

    println!("{}", format_ticket_detail(&session.ticket(), &ctx.palette));
    println!();
    println!("{}", HELP);

    let mut overlay_rx = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight = InFlight::new();

    loop {
        prompt(id)?;
        tokio::select! {
            changed = overlay_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let overlay = overlay_rx.borrow_and_update().clone();
                println!();
                render_overlay(&overlay);
            }
            Some(joined) = in_flight.tasks.join_next() => {
                println!();
                report(&mut ctx, joined);
                render_if_changed(&mut overlay_rx);
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match handle_line(&ctx, &session, &mut in_flight, line.trim()) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(e) => eprintln!("{}", e),
                }
                render_if_changed(&mut overlay_rx);
            }
        }
    }

    if !in_flight.tasks.is_empty() {
        println!("Waiting for {} pending request(s)...", in_flight.tasks.len());
    }
    while let Some(joined) = in_flight.tasks.join_next().await {
        report(&mut ctx, joined);
        render_if_changed(&mut overlay_rx);
    }

    if let Ok(session) = Arc::try_unwrap(session) {
        session.close();
    }
    Ok(())
}

fn prompt(id: u64) -> Result<()> {
    print!("ticket #{}> ", id);
    std::io::stdout().flush()?;
    Ok(())
}

/// Print the result of a finished remote operation
fn report(ctx: &mut Context, joined: std::result::Result<Result<Outcome>, JoinError>) {
    match joined {
        Ok(Ok(Outcome::Updated(ticket))) => ctx.store.reconcile(&ticket),
        Ok(Ok(Outcome::Suggested(suggestion))) => {
            println!("AI suggestion:\n  {}", suggestion);
            println!("(copied into the draft; 'send' to send it)");
        }
        Ok(Err(e)) => eprintln!("{}", e),
        Err(e) => eprintln!("request task failed: {}", e),
    }
}

fn render_if_changed(overlay_rx: &mut watch::Receiver<Overlay>) {
    if overlay_rx.has_changed().unwrap_or(false) {
        let overlay = overlay_rx.borrow_and_update().clone();
        render_overlay(&overlay);
    }
}

fn handle_line(
    ctx: &Context,
    session: &Session,
    in_flight: &mut InFlight,
    line: &str,
) -> Result<Flow> {
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" | "?" => println!("{}", HELP),
        "show" => println!("{}", format_ticket_detail(&session.ticket(), &ctx.palette)),
        "status" => {
            if arg.is_empty() {
                println!("Usage: status <{}>", VALID_STATUSES.join("|"));
            } else {
                let status: TicketStatus = arg.parse()?;
                in_flight.start(session, RemoteOp::Status(status));
            }
        }
        "assign" => {
            if arg.is_empty() {
                session.open_assign();
            } else {
                in_flight.start(session, RemoteOp::Assign(resolve_member(arg)));
            }
        }
        "note" | "notes" => {
            session.open_notes();
            if !arg.is_empty() {
                session.set_notes_input(arg);
                session.submit_notes();
            }
        }
        "info" => {
            if arg.is_empty() {
                session.open_request_info();
            } else {
                session.request_info(&resolve_option(INFO_KINDS, arg));
            }
        }
        "escalate" => session.open_escalate(),
        "confirm" | "yes" => match session.overlay() {
            Overlay::Escalating => in_flight.start(session, RemoteOp::Escalate),
            Overlay::AddingNotes { .. } => session.submit_notes(),
            _ => println!("Nothing to confirm"),
        },
        "rate" => {
            if arg.is_empty() {
                session.open_rating();
            } else if let Ok(rating) = arg.parse::<u8>() {
                in_flight.start(session, RemoteOp::Rate(rating));
            } else {
                println!("Usage: rate <{}-{}>", MIN_RATING, MAX_RATING);
            }
        }
        "suggest" => in_flight.start(session, RemoteOp::Suggest),
        "draft" => session.set_draft(arg),
        "accept" => {
            session.accept_suggestion();
            println!("Draft: {}", session.draft());
        }
        "send" => {
            session.submit_response()?;
        }
        "close" | "cancel" | "ok" => session.close_overlay(),
        "quit" | "exit" | "q" => return Ok(Flow::Quit),
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }

    Ok(Flow::Continue)
}

fn render_overlay(overlay: &Overlay) {
    match overlay {
        Overlay::Idle => {}
        Overlay::Assigning => {
            println!("{}:\n{}", overlay.title(), format_menu(TEAM_MEMBERS));
            println!("Type 'assign <number>' or 'close'");
        }
        Overlay::AddingNotes { .. } => {
            println!("{}: type 'note <text>' or 'close'", overlay.title());
        }
        Overlay::RequestingInfo => {
            println!("{}:\n{}", overlay.title(), format_menu(INFO_KINDS));
            println!("Type 'info <number>' or 'close'");
        }
        Overlay::Escalating => {
            println!(
                "{}: senior support will be notified. Type 'confirm' or 'close'",
                overlay.title()
            );
        }
        Overlay::Rating => {
            println!(
                "{}: how satisfied was the customer? Type 'rate <{}-{}>' ({} - Poor, {} - Excellent)",
                overlay.title(),
                MIN_RATING,
                MAX_RATING,
                MIN_RATING,
                MAX_RATING
            );
        }
        Overlay::ShowingResult(message) => {
            let check = "✔".if_supports_color(Stream::Stdout, |t| t.green()).to_string();
            println!("{} {}", check, message);
        }
    }
}
