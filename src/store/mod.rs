pub mod dynamo;

use async_trait::async_trait;

#[cfg(any(test, feature = "testing"))]
use mockall::automock;

use crate::error::VendError;
use crate::types::Drink;

pub use dynamo::DynamoDrinkStore;

/// Read access to the table of drink records
#[cfg_attr(any(test, feature = "testing"), automock)]
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// Every drink in `table`, in the order the store returns them.
    async fn scan(&self, table: &str) -> Result<Vec<Drink>, VendError>;
}
