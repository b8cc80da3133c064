use std::io::Write;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use club_api::Client;
use club_cli::commands::{create, delete, events, next, stats, update};
use club_cli::{Cli, Commands, Config};

/// Load config and build the API client.
fn connect(config_path: Option<&std::path::Path>) -> Result<Client> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    Client::new(&config.api_url, config.token).context("failed to create API client")
}

async fn dispatch<W: Write>(writer: &mut W, client: &Client, command: &Commands) -> Result<()> {
    let now = Local::now();
    match command {
        Commands::Events(args) => events::run(writer, client, args, &now).await,
        Commands::Next(args) => next::run(writer, client, args, &now).await,
        Commands::Create(args) => create::run(writer, client, args).await,
        Commands::Update(args) => update::run(writer, client, args).await,
        Commands::Delete(args) => delete::run(writer, client, args).await,
        Commands::Stats(args) => {
            let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());
            stats::run(writer, client, args, &now, &timezone).await
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let client = connect(cli.config.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let mut stdout = std::io::stdout().lock();
    runtime.block_on(dispatch(&mut stdout, &client, command))
}
