// Shared test fixtures: scripted stand-ins for the workflow service and the
// drinks table, plus helpers for building consoles and execution records.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use drink_vend::cli::commands::AppContext;
use drink_vend::{
    Console, Drink, DrinkStore, DrinkVendConfig, Execution, ExecutionStatus, PendingActivity, VendError,
    WorkflowService,
};

pub const EXECUTION_ID: &str = "arn:aws:states:us-east-1:874930755828:execution:BuyDrinkV2:scripted";

pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

pub fn scripted_console(answers: &str) -> ScriptedConsole {
    Console::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
}

pub fn transcript(console: ScriptedConsole) -> String {
    String::from_utf8(console.into_output()).expect("console output is UTF-8")
}

pub fn menu() -> Vec<Drink> {
    vec![
        Drink {
            name: "Diet Coke".to_string(),
            cost: 2.1,
            alcoholic: false,
        },
        Drink {
            name: "Mixed Fruit Kopparberg".to_string(),
            cost: 3.0,
            alcoholic: true,
        },
        Drink {
            name: "Apple Juice".to_string(),
            cost: 1.8,
            alcoholic: false,
        },
    ]
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp")
}

pub fn running(id: &str) -> Execution {
    let mut execution = Execution::new(id, ExecutionStatus::Running);
    execution.started_at = Some(epoch());
    execution
}

pub fn finished(id: &str, status: ExecutionStatus, duration_ms: i64) -> Execution {
    let mut execution = Execution::new(id, status);
    execution.started_at = Some(epoch());
    execution.stopped_at = Some(epoch() + Duration::milliseconds(duration_ms));
    execution
}

pub fn activity(token: &str, input: serde_json::Value) -> PendingActivity {
    PendingActivity {
        token: token.to_string(),
        input: Some(input.to_string()),
    }
}

/// Workflow service that replays queued responses and records every call.
#[derive(Default)]
pub struct ScriptedWorkflow {
    sync_result: Mutex<Option<Execution>>,
    describes: Mutex<VecDeque<Execution>>,
    activities: Mutex<VecDeque<Option<PendingActivity>>>,
    used_tokens: Mutex<Vec<String>>,
    pub started: Mutex<Vec<(String, Option<String>)>>,
    pub sync_requests: Mutex<Vec<(String, String, Option<String>)>>,
    pub submissions: Mutex<Vec<(String, String)>>,
    pub describe_calls: Mutex<u32>,
}

impl ScriptedWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync_result(self, execution: Execution) -> Self {
        *self.sync_result.lock().unwrap() = Some(execution);
        self
    }

    pub fn then_describe(self, execution: Execution) -> Self {
        self.describes.lock().unwrap().push_back(execution);
        self
    }

    pub fn then_activity(self, pending: PendingActivity) -> Self {
        self.activities.lock().unwrap().push_back(Some(pending));
        self
    }

    pub fn then_no_activity(self) -> Self {
        self.activities.lock().unwrap().push_back(None);
        self
    }

    pub fn submitted_payloads(&self) -> Vec<String> {
        self.submissions
            .lock()
            .unwrap()
            .iter()
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl WorkflowService for ScriptedWorkflow {
    async fn start_execution(&self, definition_id: &str, input: Option<String>) -> Result<String, VendError> {
        self.started
            .lock()
            .unwrap()
            .push((definition_id.to_string(), input));
        Ok(EXECUTION_ID.to_string())
    }

    async fn start_sync_execution(
        &self,
        definition_id: &str,
        input: String,
        name: Option<String>,
    ) -> Result<Execution, VendError> {
        self.sync_requests
            .lock()
            .unwrap()
            .push((definition_id.to_string(), input, name));
        self.sync_result
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| VendError::MalformedOutput {
                reason: "no synchronous result scripted".to_string(),
            })
    }

    async fn describe_execution(&self, execution_id: &str) -> Result<Execution, VendError> {
        *self.describe_calls.lock().unwrap() += 1;
        self.describes
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| VendError::IncompleteExecutionRecord {
                execution_id: execution_id.to_string(),
            })
    }

    async fn get_pending_activity(&self, _queue_id: &str) -> Result<Option<PendingActivity>, VendError> {
        Ok(self.activities.lock().unwrap().pop_front().flatten())
    }

    async fn submit_activity_answer(&self, token: &str, payload: String) -> Result<(), VendError> {
        let mut used = self.used_tokens.lock().unwrap();
        if used.iter().any(|t| t == token) {
            return Err(VendError::TokenAlreadyUsed);
        }
        used.push(token.to_string());
        self.submissions
            .lock()
            .unwrap()
            .push((token.to_string(), payload));
        Ok(())
    }
}

/// Drinks table with a fixed set of rows.
pub struct StaticDrinkStore {
    drinks: Vec<Drink>,
}

impl StaticDrinkStore {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self { drinks }
    }
}

#[async_trait]
impl DrinkStore for StaticDrinkStore {
    async fn scan(&self, _table: &str) -> Result<Vec<Drink>, VendError> {
        Ok(self.drinks.clone())
    }
}

/// Context wired to the scripted workflow. Polling delays are kept at their
/// defaults so paused-clock tests can assert on them.
pub fn context(workflow: Arc<ScriptedWorkflow>, drinks: Vec<Drink>) -> AppContext {
    let mut config = DrinkVendConfig::default();
    config.workflows.purchase_execution_name = Some("scripted-purchase".to_string());
    AppContext::new(config, workflow, Arc::new(StaticDrinkStore::new(drinks)))
}
