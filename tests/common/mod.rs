#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tempfile::TempDir;

use ticketdesk::error::{DeskError, Result};
use ticketdesk::remote::{NewTicket, TicketService};
use ticketdesk::types::{Priority, Ticket, TicketStatus, TicketUpdate};

pub fn ticket(id: u64, text: &str, priority: Priority) -> Ticket {
    Ticket {
        id,
        text: text.to_string(),
        priority,
        status: TicketStatus::New,
        assigned_to: None,
        customer_rating: None,
        source: Some("web".to_string()),
    }
}

/// In-memory ticket service with switchable failures
#[derive(Default)]
pub struct FakeService {
    tickets: Mutex<Vec<Ticket>>,
    next_id: AtomicU64,
    suggestion: Mutex<Option<String>>,
    updates: Mutex<Vec<(u64, TicketUpdate)>>,
    created: Mutex<Vec<NewTicket>>,
    update_delay: Mutex<Duration>,
    fail_list: AtomicBool,
    fail_create: AtomicBool,
    fail_updates: AtomicBool,
    fail_assignments: AtomicBool,
}

impl FakeService {
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let next_id = tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            tickets: Mutex::new(tickets),
            next_id: AtomicU64::new(next_id),
            ..Default::default()
        }
    }

    pub fn set_suggestion(&self, suggestion: Option<&str>) {
        *self.suggestion.lock() = suggestion.map(str::to_string);
    }

    pub fn set_update_delay(&self, delay: Duration) {
        *self.update_delay.lock() = delay;
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Fail only updates that set an assignee
    pub fn fail_assignments(&self, fail: bool) {
        self.fail_assignments.store(fail, Ordering::SeqCst);
    }

    pub fn updates(&self) -> Vec<(u64, TicketUpdate)> {
        self.updates.lock().clone()
    }

    pub fn created(&self) -> Vec<NewTicket> {
        self.created.lock().clone()
    }

    pub fn stored(&self, id: u64) -> Option<Ticket> {
        self.tickets.lock().iter().find(|t| t.id == id).cloned()
    }
}

impl TicketService for FakeService {
    async fn list_tickets(&self) -> Result<Vec<Ticket>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(DeskError::NetworkFailure("connection refused".to_string()));
        }
        Ok(self.tickets.lock().clone())
    }

    async fn create_ticket(&self, new: &NewTicket) -> Result<Ticket> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DeskError::NetworkFailure("connection refused".to_string()));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Ticket {
            id,
            text: new.text.clone(),
            priority: Priority::Medium,
            status: TicketStatus::New,
            assigned_to: None,
            customer_rating: None,
            source: Some(new.source.clone()),
        };
        self.created.lock().push(new.clone());
        self.tickets.lock().push(created.clone());
        Ok(created)
    }

    async fn update_ticket(&self, id: u64, update: &TicketUpdate) -> Result<Ticket> {
        self.updates.lock().push((id, update.clone()));

        let delay = *self.update_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let fail = self.fail_updates.load(Ordering::SeqCst)
            || (update.assigned_to.is_some() && self.fail_assignments.load(Ordering::SeqCst));
        if fail {
            return Err(DeskError::NetworkFailure("500 Internal Server Error".to_string()));
        }

        let mut tickets = self.tickets.lock();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DeskError::NetworkFailure("404 Not Found".to_string()))?;
        update.apply_to(ticket);
        Ok(ticket.clone())
    }

    async fn suggest_response(&self, _text: &str) -> Result<String> {
        self.suggestion
            .lock()
            .clone()
            .ok_or_else(|| DeskError::NetworkFailure("503 Service Unavailable".to_string()))
    }
}

/// Runs the ticketdesk binary with an isolated config file
pub struct DeskTest {
    pub temp_dir: TempDir,
    api_url: String,
}

impl DeskTest {
    pub fn new(api_url: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        DeskTest {
            temp_dir,
            api_url: api_url.to_string(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.yaml")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_ticketdesk"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("TICKETDESK_CONFIG", self.config_path())
            .env("TICKETDESK_API_URL", &self.api_url)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute ticketdesk command")
    }

    /// Start the binary with all three standard streams piped
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn ticketdesk command")
    }

    /// Run with `input` on stdin, closing it afterwards
    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self.spawn(args);
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");

        child
            .wait_with_output()
            .expect("Failed to wait for ticketdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
