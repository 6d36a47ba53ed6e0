// Activity relay
//
// A running relay execution pauses on an activity whenever it needs something
// from the buyer. The relay claims that activity, asks the question at the
// console, sends the answer back and decides whether to wait for another one.

use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::{debug, info};

use crate::console::Console;
use crate::error::VendError;
use crate::reporter::ExecutionReporter;
use crate::types::{Activity, ActivityInput, AnswerKind, AnswerValue, Execution};
use crate::workflow::WorkflowService;

/// Shown before every activity claim; the claim can long-poll.
pub const CLAIMING: &str = "Getting activity...\n";

/// What to do after an answer has been submitted
#[derive(Debug, Clone, PartialEq)]
pub enum RelayStep {
    /// The execution is still running; claim the next activity.
    AwaitActivity,
    /// Stop relaying and report on this record.
    Report(Execution),
}

pub struct ActivityRelay<'a> {
    workflow: &'a dyn WorkflowService,
    reporter: ExecutionReporter<'a>,
    activity_id: &'a str,
    settle_delay: Duration,
}

impl<'a> ActivityRelay<'a> {
    pub fn new(
        workflow: &'a dyn WorkflowService,
        activity_id: &'a str,
        settle_delay: Duration,
        poll_interval: Duration,
    ) -> Self {
        Self {
            workflow,
            reporter: ExecutionReporter::new(workflow, poll_interval),
            activity_id,
            settle_delay,
        }
    }

    /// Relay activities for `execution_id` until the workflow stops asking,
    /// then wait for the execution to finish.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        execution_id: &str,
        console: &mut Console<R, W>,
    ) -> Result<Execution, VendError> {
        let mut answered = 0u32;
        loop {
            console.say(CLAIMING)?;
            let activity = self.claim_next_activity().await?;
            let answer = render_and_collect(console, &activity)?;
            self.submit_answer(&activity, &answer).await?;
            answered += 1;

            match self.continue_or_finish(execution_id, &activity).await? {
                RelayStep::AwaitActivity => continue,
                RelayStep::Report(execution) => {
                    info!(execution = execution_id, answered, "Relay finished");
                    return self.reporter.settle(execution).await;
                }
            }
        }
    }

    pub async fn claim_next_activity(&self) -> Result<Activity, VendError> {
        let pending = self
            .workflow
            .get_pending_activity(self.activity_id)
            .await?
            .ok_or_else(|| VendError::NoActiveExecution {
                activity_id: self.activity_id.to_string(),
            })?;

        let input = ActivityInput::parse(pending.input.as_deref())?;
        debug!(final_activity = input.final_activity, "Claimed activity");
        Ok(Activity {
            token: pending.token,
            input,
        })
    }

    pub async fn submit_answer(&self, activity: &Activity, answer: &AnswerValue) -> Result<(), VendError> {
        self.workflow
            .submit_activity_answer(&activity.token, answer.to_payload()?)
            .await
    }

    /// After a non-final answer, give the execution a moment and check whether
    /// the answer ended it. After a final one, go straight to reporting.
    pub async fn continue_or_finish(&self, execution_id: &str, activity: &Activity) -> Result<RelayStep, VendError> {
        if activity.input.final_activity {
            let execution = self.workflow.describe_execution(execution_id).await?;
            return Ok(RelayStep::Report(execution));
        }

        tokio::time::sleep(self.settle_delay).await;
        let execution = self.workflow.describe_execution(execution_id).await?;
        if execution.status.is_running() {
            Ok(RelayStep::AwaitActivity)
        } else {
            info!(
                execution = execution_id,
                status = %execution.status,
                "Execution stopped before its final activity"
            );
            Ok(RelayStep::Report(execution))
        }
    }
}

/// Ask the activity's question. Number-typed activities keep asking until
/// they get a finite number; anything else is passed through untouched.
pub fn render_and_collect<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    activity: &Activity,
) -> Result<AnswerValue, VendError> {
    match activity.input.kind {
        AnswerKind::Number => Ok(AnswerValue::Number(console.prompt_number(&activity.input.message)?)),
        AnswerKind::Text => Ok(AnswerValue::Text(console.prompt(&activity.input.message)?)),
    }
}
