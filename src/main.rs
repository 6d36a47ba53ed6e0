use anyhow::Result;
use clap::Parser;
use tracing::{debug, error, Instrument};

use drink_vend::cli::commands::{AppContext, BuyCommand, Command, MenuCommand, RelayCommand, StatusCommand};
use drink_vend::cli::{Cli, Commands};
use drink_vend::{create_session_span, generate_correlation_id, init_telemetry, Console, DrinkVendConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_file_loaded = DrinkVendConfig::load_env_file()?;
    let config = DrinkVendConfig::load(cli.config.as_deref())?;
    init_telemetry(&config.observability);
    if env_file_loaded {
        debug!("Loaded environment variables from .env file");
    }

    let command = cli.command.unwrap_or(Commands::Buy);
    let span = create_session_span(command.name(), &generate_correlation_id());

    let result = tokio::runtime::Runtime::new()?.block_on(
        async move {
            // Fails on missing credentials before any request is sent
            let ctx = AppContext::connect(config)?;
            let mut console = Console::stdio();

            match command {
                Commands::Buy => BuyCommand.execute(&ctx, &mut console).await,
                Commands::Relay => RelayCommand.execute(&ctx, &mut console).await,
                Commands::Status { execution_id, flow } => {
                    StatusCommand { execution_id, flow }.execute(&ctx, &mut console).await
                }
                Commands::Menu => MenuCommand.execute(&ctx, &mut console).await,
            }
        }
        .instrument(span),
    );

    if let Err(e) = &result {
        error!(error = %e, "Session ended with an unrecoverable error");
    }
    result
}
