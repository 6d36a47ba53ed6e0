// drink-vend library - terminal client for the drink vending state machines
// This exposes the core components for testing and integration

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod input;
pub mod purchase;
pub mod relay;
pub mod reporter;
pub mod store;
pub mod telemetry;
pub mod types;
pub mod workflow;

// Re-export key types for easy access
pub use cli::commands::AppContext;
pub use config::{DrinkVendConfig, StaticCredentials};
pub use console::Console;
pub use error::VendError;
pub use purchase::PurchaseFlow;
pub use relay::{ActivityRelay, RelayStep};
pub use reporter::{summarize, ExecutionReporter, Summary};
pub use store::{DrinkStore, DynamoDrinkStore};
pub use telemetry::{create_session_span, generate_correlation_id, init_telemetry};
pub use types::{
    Activity, ActivityInput, AnswerKind, AnswerValue, Buyer, Drink, Execution, ExecutionStatus, PendingActivity,
    ServeDrinkInput,
};
pub use workflow::{StepFunctionsClient, WorkflowService};
