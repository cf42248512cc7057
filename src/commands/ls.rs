use serde_json::json;

use super::{CommandOutput, Context};
use crate::display::{format_list_summary, format_stats, format_ticket_line};
use crate::error::Result;
use crate::store::TicketFilter;
use crate::types::{Priority, TicketStatus};

/// List tickets, optionally filtered by search text, status and priority
pub async fn cmd_ls(
    search: Option<&str>,
    status: Option<TicketStatus>,
    priority: Option<Priority>,
    output_json: bool,
) -> Result<()> {
    let mut ctx = Context::load()?;
    ctx.store.fetch_all().await?;

    let filter = TicketFilter {
        search: search.unwrap_or_default().to_string(),
        status,
        priority,
    };
    let filtered = ctx.store.filter(&filter);
    let total = ctx.store.tickets().len();

    if output_json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    if filtered.is_empty() {
        if filter.search.is_empty() {
            println!("No tickets match the current filters");
        } else {
            println!("No tickets found. Try adjusting your search terms");
        }
    }
    for ticket in &filtered {
        println!("{}", format_ticket_line(ticket, &ctx.palette));
    }
    println!();
    println!(
        "{}  Avg. Rating: {}",
        format_list_summary(filtered.len(), total),
        ctx.store.stats().average_rating
    );

    Ok(())
}

/// Show aggregate stats for all tickets
pub async fn cmd_stats(output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    ctx.store.fetch_all().await?;
    let stats = ctx.store.stats();

    CommandOutput::new(json!(stats))
        .with_text(format_stats(&stats))
        .print(output_json)
}
