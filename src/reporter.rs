use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::VendError;
use crate::types::{Execution, ExecutionStatus};
use crate::workflow::WorkflowService;

/// Shown instead of sub-result messages when a successful execution has no output.
pub const MISSING_OUTPUT: &str = "ERR: can't display info as the workflow service didn't return output";

/// Human-readable outcome of one execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub headline: String,
    pub lines: Vec<String>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        for line in &self.lines {
            write!(f, "\n{line}")?;
        }
        Ok(())
    }
}

/// Polls an execution until it leaves `RUNNING`
pub struct ExecutionReporter<'a> {
    workflow: &'a dyn WorkflowService,
    poll_interval: Duration,
}

impl<'a> ExecutionReporter<'a> {
    pub fn new(workflow: &'a dyn WorkflowService, poll_interval: Duration) -> Self {
        Self {
            workflow,
            poll_interval,
        }
    }

    /// Fetch the execution and keep fetching until it is terminal.
    pub async fn await_terminal(&self, execution_id: &str) -> Result<Execution, VendError> {
        let execution = self.workflow.describe_execution(execution_id).await?;
        self.settle(execution).await
    }

    /// Like `await_terminal`, starting from a record already in hand.
    pub async fn settle(&self, mut execution: Execution) -> Result<Execution, VendError> {
        let mut polls = 0u32;
        while execution.status.is_running() {
            tokio::time::sleep(self.poll_interval).await;
            polls += 1;
            debug!(execution = %execution.id, polls, "Execution still running, polling again");
            execution = self.workflow.describe_execution(&execution.id).await?;
        }

        info!(execution = %execution.id, status = %execution.status, polls, "Execution finished");
        Ok(execution)
    }
}

/// Reduce a terminal execution to a summary.
///
/// `result_keys` names the sub-results of a successful execution's output
/// whose messages are printed, in order.
pub fn summarize(execution: &Execution, result_keys: &[String]) -> Result<Summary, VendError> {
    let duration = execution
        .duration_ms()
        .ok_or_else(|| VendError::IncompleteExecutionRecord {
            execution_id: execution.id.clone(),
        })?;

    let summary = match &execution.status {
        ExecutionStatus::TimedOut => Summary {
            headline: format!("Request timed out after {duration}ms. Try again later."),
            lines: Vec::new(),
        },
        ExecutionStatus::Aborted => Summary {
            headline: format!("Request was aborted after {duration}ms. Try again later."),
            lines: Vec::new(),
        },
        ExecutionStatus::Failed => Summary {
            headline: format!(
                "Request failed after {duration}ms with error {} ({})",
                execution.error.as_deref().unwrap_or("unknown"),
                execution.cause.as_deref().unwrap_or("no cause given")
            ),
            lines: Vec::new(),
        },
        ExecutionStatus::Succeeded => Summary {
            headline: format!("Request succeeded after {duration}ms."),
            lines: match &execution.output {
                Some(output) => result_messages(output, result_keys)?,
                None => vec![MISSING_OUTPUT.to_string()],
            },
        },
        status @ (ExecutionStatus::Running | ExecutionStatus::Other(_)) => {
            return Err(VendError::UnhandledExecutionStatus {
                status: status.to_string(),
            })
        }
    };
    Ok(summary)
}

fn result_messages(output: &str, result_keys: &[String]) -> Result<Vec<String>, VendError> {
    let output: Value = serde_json::from_str(output).map_err(|e| VendError::MalformedOutput {
        reason: format!("output is not JSON: {e}"),
    })?;

    result_keys
        .iter()
        .map(|key| {
            let sub_result = output.get(key).ok_or_else(|| VendError::MalformedOutput {
                reason: format!("output has no '{key}' result"),
            })?;
            envelope_message(sub_result).ok_or_else(|| VendError::MalformedOutput {
                reason: format!("'{key}' result has no message"),
            })
        })
        .collect()
}

/// Pull `message` out of a sub-result envelope. Lambda-style results carry
/// the envelope JSON-encoded in `body`; others embed it as a JSON string or
/// as a plain object.
fn envelope_message(sub_result: &Value) -> Option<String> {
    match sub_result {
        Value::String(encoded) => envelope_message(&serde_json::from_str(encoded).ok()?),
        Value::Object(fields) => match (fields.get("message"), fields.get("body")) {
            (Some(Value::String(message)), _) => Some(message.clone()),
            (_, Some(body)) => envelope_message(body),
            _ => None,
        },
        _ => None,
    }
}
