use std::io::{BufRead, Write};
use tracing::info;

use crate::console::Console;
use crate::error::VendError;
use crate::input;
use crate::store::DrinkStore;
use crate::types::{Drink, Execution, ServeDrinkInput};
use crate::workflow::WorkflowService;

pub const INDEX_PROMPT: &str = "Enter the index of the drink you'd like: ";
pub const INVALID_INDEX: &str = "That's not a valid index. Please try again.\n";
pub const AGE_PROMPT: &str = "\nPlease enter your age to confirm you can purchase alcoholic beverages: ";
pub const INVALID_AGE: &str = "That's not a valid age. Please try again.\n";
pub const BALANCE_PROMPT: &str =
    "\nPlease enter your balance to confirm you have enough money to purchase this drink: £";
pub const INVALID_BALANCE: &str = "That's not a valid balance. Please try again.";

/// Interactive purchase: pick a drink, give age and balance, run the purchase
/// workflow synchronously.
pub struct PurchaseFlow<'a> {
    workflow: &'a dyn WorkflowService,
    store: &'a dyn DrinkStore,
    drinks_table: &'a str,
    state_machine: &'a str,
    execution_name: Option<String>,
}

impl<'a> PurchaseFlow<'a> {
    pub fn new(
        workflow: &'a dyn WorkflowService,
        store: &'a dyn DrinkStore,
        drinks_table: &'a str,
        state_machine: &'a str,
    ) -> Self {
        Self {
            workflow,
            store,
            drinks_table,
            state_machine,
            execution_name: None,
        }
    }

    pub fn with_execution_name(mut self, name: Option<String>) -> Self {
        self.execution_name = name;
        self
    }

    pub async fn fetch_menu(&self) -> Result<Vec<Drink>, VendError> {
        let drinks = self.store.scan(self.drinks_table).await?;
        if drinks.is_empty() {
            return Err(VendError::EmptyMenu);
        }
        Ok(drinks)
    }

    pub async fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<Execution, VendError> {
        let drinks = self.fetch_menu().await?;
        let drink = choose_drink(console, &drinks)?;
        let age = if drink.alcoholic { Some(ask_age(console)?) } else { None };
        let balance = ask_balance(console)?;

        let order = ServeDrinkInput::new(drink, balance, age)?;
        let name = self
            .execution_name
            .clone()
            .unwrap_or_else(|| format!("purchase-{}", uuid::Uuid::new_v4()));

        info!(drink = %order.drink().name, execution_name = %name, "Starting purchase");
        self.workflow
            .start_sync_execution(self.state_machine, order.to_json()?, Some(name))
            .await
    }
}

/// Show the menu and read an index into it.
pub fn choose_drink<R: BufRead, W: Write>(console: &mut Console<R, W>, drinks: &[Drink]) -> Result<Drink, VendError> {
    console.say(input::render_drink_table(drinks))?;
    let index = console.prompt_until(INDEX_PROMPT, INVALID_INDEX, |raw| {
        input::parse_menu_index(raw, drinks.len())
    })?;

    let drink = drinks[index].clone();
    console.say(format!("\nYou've selected {}", drink.name))?;
    Ok(drink)
}

pub fn ask_age<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<u32, VendError> {
    console.prompt_until(AGE_PROMPT, INVALID_AGE, input::parse_age)
}

pub fn ask_balance<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<f64, VendError> {
    console.prompt_until(BALANCE_PROMPT, INVALID_BALANCE, input::parse_balance)
}
