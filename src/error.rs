use thiserror::Error;

/// Errors raised by the drink-vend client.
///
/// Input mistakes never show up here: they are handled by re-prompting at the
/// console. Everything in this enum is fatal for the current session.
#[derive(Debug, Error)]
pub enum VendError {
    #[error("Missing credential {name}: set it in .env, drink-vend.toml or the environment")]
    MissingCredential { name: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to fetch activity from {activity_id}. Make sure the state machine has an active execution.")]
    NoActiveExecution { activity_id: String },

    #[error("Malformed activity: {reason}")]
    MalformedActivity { reason: String },

    #[error("Activity token was rejected: it has already been used or has timed out")]
    TokenAlreadyUsed,

    #[error("Workflow service didn't return start and stop timestamps for execution {execution_id}")]
    IncompleteExecutionRecord { execution_id: String },

    #[error("Unhandled execution status: {status}")]
    UnhandledExecutionStatus { status: String },

    #[error("Malformed execution output: {reason}")]
    MalformedOutput { reason: String },

    #[error("Malformed drink record: attribute '{attribute}' is missing or has the wrong type")]
    MalformedRecord { attribute: String },

    #[error("Invalid purchase: {reason}")]
    InvalidPurchase { reason: String },

    #[error("The drinks menu is empty")]
    EmptyMenu,

    #[error("Input was closed before an answer was given")]
    InputClosed,

    #[error("Workflow service error: {0}")]
    Workflow(#[from] aws_sdk_sfn::Error),

    #[error("Record store error: {0}")]
    RecordStore(#[from] aws_sdk_dynamodb::Error),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
