// Domain types shared by the purchase flow, the activity relay and the reporter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VendError;

/// A drink record as stored in the drinks table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    pub name: String,
    pub cost: f64,
    pub alcoholic: bool,
}

/// The person buying a drink. `age` is only collected for alcoholic drinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Buyer {
    age: Option<u32>,
    balance: f64,
}

impl Buyer {
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }
}

/// Request payload for the purchase workflow.
///
/// The buyer's age is present if and only if the drink is alcoholic; `new` is
/// the only way to build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServeDrinkInput {
    drink: Drink,
    buyer: Buyer,
}

impl ServeDrinkInput {
    pub fn new(drink: Drink, balance: f64, age: Option<u32>) -> Result<Self, VendError> {
        match (drink.alcoholic, age) {
            (true, None) => Err(VendError::InvalidPurchase {
                reason: format!("{} is alcoholic, so the buyer's age is required", drink.name),
            }),
            (false, Some(_)) => Err(VendError::InvalidPurchase {
                reason: format!("{} is not alcoholic, so no age should be given", drink.name),
            }),
            _ if !balance.is_finite() || balance < 0.0 => Err(VendError::InvalidPurchase {
                reason: format!("balance {balance} is not a non-negative amount"),
            }),
            _ => Ok(Self {
                drink,
                buyer: Buyer { age, balance },
            }),
        }
    }

    pub fn drink(&self) -> &Drink {
        &self.drink
    }

    pub fn buyer(&self) -> &Buyer {
        &self.buyer
    }

    pub fn to_json(&self) -> Result<String, VendError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    /// A status this client doesn't know about, kept verbatim.
    Other(String),
}

impl ExecutionStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            "TIMED_OUT" => Self::TimedOut,
            "ABORTED" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::TimedOut => "TIMED_OUT",
            Self::Aborted => "ABORTED",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one workflow execution as reported by the workflow service.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub id: String,
    pub status: ExecutionStatus,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub output: Option<String>,
    pub error: Option<String>,
    pub cause: Option<String>,
}

impl Execution {
    /// A record with only an id and status, as seen while still running.
    pub fn new(id: impl Into<String>, status: ExecutionStatus) -> Self {
        Self {
            id: id.into(),
            status,
            started_at: None,
            stopped_at: None,
            output: None,
            error: None,
            cause: None,
        }
    }

    /// Whole milliseconds between start and stop, if both are known.
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.started_at, self.stopped_at) {
            (Some(start), Some(stop)) => Some((stop - start).num_milliseconds()),
            _ => None,
        }
    }
}

/// A claimed activity exactly as the workflow service hands it out.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingActivity {
    pub token: String,
    pub input: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    Number,
    Text,
}

/// The parsed input payload of an activity.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityInput {
    pub message: String,
    pub kind: AnswerKind,
    pub final_activity: bool,
}

#[derive(Deserialize)]
struct RawActivityInput {
    message: Option<serde_json::Value>,
    #[serde(rename = "type")]
    kind: Option<serde_json::Value>,
    #[serde(rename = "finalActivity")]
    final_activity: Option<serde_json::Value>,
}

/// JavaScript-style truthiness, which is how the workflow definitions treat
/// these flags.
fn truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl ActivityInput {
    /// Parse an activity payload. A missing or blank payload counts as `{}`.
    pub fn parse(raw: Option<&str>) -> Result<Self, VendError> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or("{}");
        let parsed: RawActivityInput =
            serde_json::from_str(raw).map_err(|e| VendError::MalformedActivity {
                reason: format!("input is not a JSON object: {e}"),
            })?;

        let message = match parsed.message {
            Some(serde_json::Value::String(message)) if !message.is_empty() => message,
            Some(other) if truthy(&other) => other.to_string(),
            _ => {
                return Err(VendError::MalformedActivity {
                    reason: "activity doesn't have required 'message' field in state's parameters".to_string(),
                })
            }
        };

        let kind = match parsed.kind {
            Some(serde_json::Value::String(kind)) if kind == "number" => AnswerKind::Number,
            _ => AnswerKind::Text,
        };

        Ok(Self {
            message,
            kind,
            final_activity: parsed.final_activity.as_ref().is_some_and(truthy),
        })
    }
}

/// A pending activity ready to be shown to a human.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub token: String,
    pub input: ActivityInput,
}

/// The answer relayed back to the workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// The `{"response": ...}` document the workflow expects.
    pub fn to_payload(&self) -> Result<String, VendError> {
        Ok(serde_json::to_string(&serde_json::json!({ "response": self }))?)
    }
}
