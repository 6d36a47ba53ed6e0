use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

use super::{AppContext, Command};
use crate::console::Console;
use crate::purchase::PurchaseFlow;
use crate::reporter::summarize;

/// Single linear purchase session
pub struct BuyCommand;

impl Command for BuyCommand {
    async fn execute<R: BufRead, W: Write>(&self, ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
        let config = &ctx.config;
        let flow = PurchaseFlow::new(
            ctx.workflow.as_ref(),
            ctx.store.as_ref(),
            &config.store.drinks_table,
            &config.workflows.purchase_state_machine,
        )
        .with_execution_name(config.workflows.purchase_execution_name.clone());

        let execution = flow.run(console).await?;
        let summary = summarize(&execution, &config.workflows.purchase_result_keys)?;

        info!(execution = %execution.id, status = %execution.status, "Purchase reported");
        console.say("")?;
        console.say(summary)?;
        Ok(())
    }
}
