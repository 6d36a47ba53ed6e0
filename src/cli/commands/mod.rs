use anyhow::Result;
use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::config::DrinkVendConfig;
use crate::console::Console;
use crate::error::VendError;
use crate::store::{DrinkStore, DynamoDrinkStore};
use crate::workflow::{StepFunctionsClient, WorkflowService};

pub mod buy;
pub mod menu;
pub mod relay;
pub mod status;

pub use buy::BuyCommand;
pub use menu::MenuCommand;
pub use relay::RelayCommand;
pub use status::StatusCommand;

/// Everything a command needs, built once at startup and passed in
pub struct AppContext {
    pub config: DrinkVendConfig,
    pub workflow: Arc<dyn WorkflowService>,
    pub store: Arc<dyn DrinkStore>,
}

impl AppContext {
    pub fn new(config: DrinkVendConfig, workflow: Arc<dyn WorkflowService>, store: Arc<dyn DrinkStore>) -> Self {
        Self {
            config,
            workflow,
            store,
        }
    }

    /// Build the AWS-backed clients. Fails before touching the network when
    /// either credential is missing.
    pub fn connect(config: DrinkVendConfig) -> Result<Self, VendError> {
        let credentials = config.credentials()?;
        let workflow = Arc::new(StepFunctionsClient::new(&config.aws, &credentials));
        let store = Arc::new(DynamoDrinkStore::new(&config.aws, &credentials));
        Ok(Self::new(config, workflow, store))
    }
}

#[allow(async_fn_in_trait)]
pub trait Command {
    async fn execute<R: BufRead, W: Write>(&self, ctx: &AppContext, console: &mut Console<R, W>) -> Result<()>;
}
