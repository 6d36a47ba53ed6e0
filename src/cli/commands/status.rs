use anyhow::Result;
use std::io::{BufRead, Write};

use super::{AppContext, Command};
use crate::cli::Flow;
use crate::console::Console;
use crate::reporter::{summarize, ExecutionReporter};

/// Wait for an existing execution and print its summary
pub struct StatusCommand {
    pub execution_id: String,
    pub flow: Flow,
}

impl Command for StatusCommand {
    async fn execute<R: BufRead, W: Write>(&self, ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
        let config = &ctx.config;
        let reporter = ExecutionReporter::new(ctx.workflow.as_ref(), config.status_interval());
        let execution = reporter.await_terminal(&self.execution_id).await?;

        let keys = match self.flow {
            Flow::Purchase => &config.workflows.purchase_result_keys,
            Flow::Relay => &config.workflows.relay_result_keys,
        };
        console.say(summarize(&execution, keys)?)?;
        Ok(())
    }
}
