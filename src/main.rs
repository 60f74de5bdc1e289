use bbm_inventory::{
    config::{self, database},
    errors::Result,
    shell::Shell,
};
use clap::Parser;
use dotenvy::dotenv;
use std::{io, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "bbm-inventory")]
#[command(about = "BBM fuel supply inventory", long_about = None)]
struct Cli {
    /// TOML config file (defaults to ./bbm.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Database URL, overrides DATABASE_URL and the config file
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env before anything reads the environment
    dotenv().ok(); // Non-fatal, env vars can be set externally
    let cli = Cli::parse();

    // 2. Settings file, needed for the log filter
    let app_config = config::load_app_configuration(cli.config.as_deref())?;

    // 3. Tracing to stderr so it never interleaves with the menu
    let default_filter = app_config.log_filter.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    // 4. Connect and make sure the supply table exists
    let database_url =
        database::resolve_database_url(cli.database_url.as_deref(), app_config.database_url.as_deref());
    let db = database::create_connection(&database_url)
        .await
        .inspect(|_| info!("Connected to store."))
        .inspect_err(|e| error!("Failed to connect to store: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Menu loop on the terminal
    let stdin = io::stdin();
    let mut shell = Shell::new(&db, stdin.lock(), io::stdout());
    shell.run().await?;
    drop(shell);

    db.close().await?;
    Ok(())
}
