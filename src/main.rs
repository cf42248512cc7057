use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use ticketdesk::commands::{
    cmd_assign, cmd_config_get, cmd_config_set, cmd_config_show, cmd_create, cmd_demo,
    cmd_escalate, cmd_ls, cmd_open, cmd_rate, cmd_show, cmd_stats, cmd_status, cmd_suggest,
    cmd_theme,
};
use ticketdesk::store::DEFAULT_DEMO_COUNT;
use ticketdesk::types::{Priority, TicketStatus, VALID_PRIORITIES, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "ticketdesk")]
#[command(about = "Customer-support ticket dashboard")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List tickets, optionally filtered
    #[command(visible_alias = "l")]
    Ls {
        /// Case-insensitive match on ticket text or assignee
        #[arg(short, long)]
        search: Option<String>,

        /// Only tickets with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<TicketStatus>,

        /// Only tickets with this priority
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },

    /// Show dashboard statistics
    Stats,

    /// Submit a new ticket
    #[command(visible_alias = "c")]
    Create {
        /// Ticket text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Where the ticket came from
        #[arg(long, default_value = "web")]
        source: String,
    },

    /// Submit a batch of demo tickets
    Demo {
        /// Number of tickets to submit
        #[arg(short = 'n', long, default_value_t = DEFAULT_DEMO_COUNT)]
        count: usize,
    },

    /// Display one ticket
    #[command(visible_alias = "s")]
    Show {
        /// Ticket ID
        id: u64,
    },

    /// Change a ticket's status
    Status {
        /// Ticket ID
        id: u64,

        /// New status
        #[arg(value_parser = parse_status)]
        status: TicketStatus,
    },

    /// Assign a ticket to a team member
    Assign {
        /// Ticket ID
        id: u64,

        /// Team member name, or its number in the team list (1-4)
        member: String,
    },

    /// Escalate a ticket to senior support
    Escalate {
        /// Ticket ID
        id: u64,
    },

    /// Record the customer's satisfaction rating
    Rate {
        /// Ticket ID
        id: u64,

        /// Rating from 1 (poor) to 5 (excellent)
        rating: u8,
    },

    /// Draft a reply to the customer with AI
    Suggest {
        /// Ticket ID
        id: u64,
    },

    /// Work on a ticket interactively
    #[command(visible_alias = "o")]
    Open {
        /// Ticket ID
        id: u64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show or change the display theme
    Theme {
        /// light, dark or toggle
        choice: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api.url, api.timeout_secs, display.dark_mode)
        key: String,
        /// Value to set
        value: String,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api.url, api.timeout_secs, display.dark_mode)
        key: String,
    },
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid priority. Must be one of: {}",
            VALID_PRIORITIES.join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<TicketStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let json = cli.json;
    let result = match cli.command {
        Commands::Ls {
            search,
            status,
            priority,
        } => cmd_ls(search.as_deref(), status, priority, json).await,
        Commands::Stats => cmd_stats(json).await,
        Commands::Create { text, source } => cmd_create(&text.join(" "), &source, json).await,
        Commands::Demo { count } => cmd_demo(count, json).await,
        Commands::Show { id } => cmd_show(id, json).await,
        Commands::Status { id, status } => cmd_status(id, status, json).await,
        Commands::Assign { id, member } => cmd_assign(id, &member, json).await,
        Commands::Escalate { id } => cmd_escalate(id, json).await,
        Commands::Rate { id, rating } => cmd_rate(id, rating, json).await,
        Commands::Suggest { id } => cmd_suggest(id, json).await,
        Commands::Open { id } => cmd_open(id).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(json),
            ConfigAction::Set { key, value } => cmd_config_set(&key, &value, json),
            ConfigAction::Get { key } => cmd_config_get(&key, json),
        },
        Commands::Theme { choice } => cmd_theme(choice.as_deref(), json),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
