use async_trait::async_trait;
use aws_sdk_sfn::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_sfn::primitives::DateTime as SdkDateTime;
use aws_sdk_sfn::Client;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::{AwsConfig, StaticCredentials};
use crate::error::VendError;
use crate::types::{Execution, ExecutionStatus, PendingActivity};
use crate::workflow::WorkflowService;

const CREDENTIALS_PROVIDER: &str = "drink-vend";

/// Workflow service backed by AWS Step Functions
#[derive(Debug, Clone)]
pub struct StepFunctionsClient {
    client: Client,
}

impl StepFunctionsClient {
    pub fn new(aws: &AwsConfig, credentials: &StaticCredentials) -> Self {
        let mut builder = aws_sdk_sfn::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(aws.region.clone()))
            .credentials_provider(Credentials::new(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
                None,
                CREDENTIALS_PROVIDER,
            ));
        if let Some(endpoint) = &aws.endpoint_url {
            builder = builder.endpoint_url(endpoint.clone());
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }
}

fn to_utc(date: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(date.secs(), date.subsec_nanos())
}

#[async_trait]
impl WorkflowService for StepFunctionsClient {
    async fn start_execution(&self, definition_id: &str, input: Option<String>) -> Result<String, VendError> {
        let output = self
            .client
            .start_execution()
            .state_machine_arn(definition_id)
            .set_input(input)
            .send()
            .await
            .map_err(aws_sdk_sfn::Error::from)?;

        info!(execution = output.execution_arn(), "Started execution");
        Ok(output.execution_arn().to_string())
    }

    async fn start_sync_execution(
        &self,
        definition_id: &str,
        input: String,
        name: Option<String>,
    ) -> Result<Execution, VendError> {
        let output = self
            .client
            .start_sync_execution()
            .state_machine_arn(definition_id)
            .input(input)
            .set_name(name)
            .send()
            .await
            .map_err(aws_sdk_sfn::Error::from)?;

        info!(
            execution = output.execution_arn(),
            status = output.status().as_str(),
            "Synchronous execution finished"
        );
        Ok(Execution {
            id: output.execution_arn().to_string(),
            status: ExecutionStatus::parse(output.status().as_str()),
            started_at: to_utc(output.start_date()),
            stopped_at: to_utc(output.stop_date()),
            output: output.output().map(str::to_string),
            error: output.error().map(str::to_string),
            cause: output.cause().map(str::to_string),
        })
    }

    async fn describe_execution(&self, execution_id: &str) -> Result<Execution, VendError> {
        let output = self
            .client
            .describe_execution()
            .execution_arn(execution_id)
            .send()
            .await
            .map_err(aws_sdk_sfn::Error::from)?;

        debug!(execution = execution_id, status = output.status().as_str(), "Described execution");
        Ok(Execution {
            id: output.execution_arn().to_string(),
            status: ExecutionStatus::parse(output.status().as_str()),
            started_at: to_utc(output.start_date()),
            stopped_at: output.stop_date().and_then(to_utc),
            output: output.output().map(str::to_string),
            error: output.error().map(str::to_string),
            cause: output.cause().map(str::to_string),
        })
    }

    async fn get_pending_activity(&self, queue_id: &str) -> Result<Option<PendingActivity>, VendError> {
        debug!(activity = queue_id, "Waiting for activity task");
        let output = self
            .client
            .get_activity_task()
            .activity_arn(queue_id)
            .send()
            .await
            .map_err(aws_sdk_sfn::Error::from)?;

        Ok(output
            .task_token()
            .filter(|token| !token.is_empty())
            .map(|token| PendingActivity {
                token: token.to_string(),
                input: output.input().map(str::to_string),
            }))
    }

    async fn submit_activity_answer(&self, token: &str, payload: String) -> Result<(), VendError> {
        self.client
            .send_task_success()
            .task_token(token)
            .output(payload)
            .send()
            .await
            .map_err(|err| {
                let stale = err
                    .as_service_error()
                    .is_some_and(|e| e.is_task_does_not_exist() || e.is_task_timed_out());
                if stale {
                    VendError::TokenAlreadyUsed
                } else {
                    VendError::from(aws_sdk_sfn::Error::from(err))
                }
            })?;
        Ok(())
    }
}
