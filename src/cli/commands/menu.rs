use anyhow::Result;
use std::io::{BufRead, Write};

use super::{AppContext, Command};
use crate::console::Console;
use crate::error::VendError;
use crate::input::render_drink_table;

/// Print the drinks table and exit
pub struct MenuCommand;

impl Command for MenuCommand {
    async fn execute<R: BufRead, W: Write>(&self, ctx: &AppContext, console: &mut Console<R, W>) -> Result<()> {
        let drinks = ctx.store.scan(&ctx.config.store.drinks_table).await?;
        if drinks.is_empty() {
            return Err(VendError::EmptyMenu.into());
        }
        console.say(render_drink_table(&drinks))?;
        Ok(())
    }
}
