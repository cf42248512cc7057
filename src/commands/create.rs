use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use super::{CommandOutput, Context};
use crate::error::Result;

/// Submit a new ticket and print what the service created
pub async fn cmd_create(text: &str, source: &str, output_json: bool) -> Result<()> {
    let ctx = Context::load()?;
    let ticket = ctx.store.create(text, source).await?;

    CommandOutput::new(json!(ticket))
        .with_text(format!(
            "Created ticket #{} ({} priority)",
            ticket.id, ticket.priority
        ))
        .print(output_json)
}

/// Create random demo tickets and print the refreshed total
pub async fn cmd_demo(count: usize, output_json: bool) -> Result<()> {
    let mut ctx = Context::load()?;
    let mut rng = StdRng::from_os_rng();
    let created = ctx.store.generate_demo(&mut rng, count).await?;
    let total = ctx.store.tickets().len();

    CommandOutput::new(json!({
        "requested": count,
        "created": created,
        "total": total,
    }))
    .with_text(format!(
        "Created {} of {} demo tickets ({} tickets total)",
        created, count, total
    ))
    .print(output_json)
}
