use anyhow::Result;
use std::io::{BufRead, Write};

use super::{AppContext, Command};
use crate::console::Console;
use crate::relay::ActivityRelay;
use crate::reporter::summarize;

/// Start the relay workflow and answer its activities at the console
pub struct RelayCommand;

impl Command for RelayCommand {
    async fn execute<R: BufRead, W: Write>(&self, ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
        let config = &ctx.config;
        let workflow = ctx.workflow.as_ref();

        let execution_id = workflow
            .start_execution(&config.workflows.relay_state_machine, None)
            .await?;
        console.say(format!("Execution {execution_id} started"))?;

        let relay = ActivityRelay::new(
            workflow,
            &config.workflows.input_activity,
            config.settle_delay(),
            config.status_interval(),
        );
        let execution = relay.run(&execution_id, console).await?;
        let summary = summarize(&execution, &config.workflows.relay_result_keys)?;

        console.say("")?;
        console.say(summary)?;
        Ok(())
    }
}
