// Remote workflow service abstraction
//
// The state machines that hold the vending rules live outside this crate. The
// relay and reporter only ever talk to them through this trait, so tests can
// swap in scripted executions.

pub mod sfn;

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use crate::error::VendError;
use crate::types::{Execution, PendingActivity};

pub use sfn::StepFunctionsClient;

#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Start an execution and return its id without waiting for it.
    async fn start_execution(&self, definition_id: &str, input: Option<String>) -> Result<String, VendError>;

    /// Start an execution and block until it reaches a terminal status.
    async fn start_sync_execution(
        &self,
        definition_id: &str,
        input: String,
        name: Option<String>,
    ) -> Result<Execution, VendError>;

    async fn describe_execution(&self, execution_id: &str) -> Result<Execution, VendError>;

    /// Long-poll the activity queue. `None` means no execution produced a task
    /// before the service gave up waiting.
    async fn get_pending_activity(&self, queue_id: &str) -> Result<Option<PendingActivity>, VendError>;

    /// Answer an activity. Tokens are single use.
    async fn submit_activity_answer(&self, token: &str, payload: String) -> Result<(), VendError>;
}
