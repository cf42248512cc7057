use serde_json::json;

use super::{CommandOutput, Context};
use crate::display::format_ticket_detail;
use crate::error::Result;

/// Display one ticket
pub async fn cmd_show(id: u64, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    ctx.store.fetch_all().await?;
    let ticket = ctx.store.require(id)?;

    CommandOutput::new(json!(ticket))
        .with_text(format_ticket_detail(ticket, &ctx.palette))
        .print(output_json)
}
