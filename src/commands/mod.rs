mod config;
mod create;
mod ls;
mod open;
mod show;
mod ticket;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show, cmd_theme};
pub use create::{cmd_create, cmd_demo};
pub use ls::{cmd_ls, cmd_stats};
pub use open::cmd_open;
pub use show::cmd_show;
pub use ticket::{cmd_assign, cmd_escalate, cmd_rate, cmd_status, cmd_suggest};

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::display::Palette;
use crate::error::Result;
use crate::remote::HttpTicketService;
use crate::session::{TEAM_MEMBERS, TicketSession};
use crate::store::TicketStore;

/// Everything a command needs: settings, the service client and the palette
pub struct Context {
    pub config: Config,
    pub palette: Palette,
    pub store: TicketStore<HttpTicketService>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let service = Arc::new(HttpTicketService::from_config(&config)?);
        Ok(Self {
            palette: Palette::new(config.theme()),
            store: TicketStore::new(service),
            config,
        })
    }

    /// Fetch the list and open a session on one ticket
    pub async fn open_session(&mut self, id: u64) -> Result<TicketSession<HttpTicketService>> {
        self.store.fetch_all().await?;
        let ticket = self.store.require(id)?.clone();
        Ok(TicketSession::new(Arc::clone(self.store.service()), ticket))
    }
}

/// Command result with a JSON form and a human-readable form
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output_json: bool) -> Result<()> {
        match (output_json, self.text) {
            (false, Some(text)) => println!("{}", text),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Resolve a 1-based menu number to its option; anything else is taken as typed
pub fn resolve_option(options: &[&str], arg: &str) -> String {
    arg.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| options.get(i))
        .map(|o| o.to_string())
        .unwrap_or_else(|| arg.trim().to_string())
}

/// Resolve a team member from a menu number or a free-form name
pub fn resolve_member(arg: &str) -> String {
    resolve_option(TEAM_MEMBERS, arg)
}

/// Numbered menu lines for a list of options
pub fn format_menu(options: &[&str]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("  {}. {}", i + 1, option))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_member() {
        assert_eq!(resolve_member("2"), "Mike (Billing Specialist)");
        assert_eq!(resolve_member(" 4 "), "David (Urgent Issues)");
        assert_eq!(resolve_member("0"), "0");
        assert_eq!(resolve_member("9"), "9");
        assert_eq!(resolve_member("Alex"), "Alex");
    }

    #[test]
    fn test_resolve_option_info_kinds() {
        use crate::session::INFO_KINDS;
        assert_eq!(resolve_option(INFO_KINDS, "4"), "Steps to reproduce");
        assert_eq!(resolve_option(INFO_KINDS, "Logs"), "Logs");
    }

    #[test]
    fn test_format_menu() {
        assert_eq!(format_menu(&["a", "b"]), "  1. a\n  2. b");
    }
}
