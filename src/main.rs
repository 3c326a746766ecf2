//! mongo-nav - browse a MongoDB deployment like a filesystem.

mod cli;

use cli::Cli;
use mongo_nav::commands::CommandDispatcher;
use mongo_nav::config::{Config, ConnectionConfig};
use mongo_nav::db;
use mongo_nav::error::Result;
use mongo_nav::logging;
use mongo_nav::tui::{self, App};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init_file_logging();

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = Config::default_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(&cli, &config)?;
    info!("Connecting to {}", connection.display_string());

    let source = match db::connect(&connection).await {
        Ok(source) => source,
        Err(e) => {
            // The session opens in a permanent error state, then we exit 1
            error!("Connection failed: {}", e);
            let mut app = App::disconnected(&e, connection.display_string());
            tui::run(&mut app).await?;
            return Err(e);
        }
    };
    info!("Connected successfully");

    let mut app = App::new(
        CommandDispatcher::new(source.clone()),
        connection.display_string(),
    );
    let result = tui::run(&mut app).await;

    if let Err(e) = source.close().await {
        warn!("Error closing connection: {}", e);
    }

    result
}

/// Resolves the connection from the config file, the environment and the CLI,
/// each overriding the one before.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = config.connection.clone();
    connection.apply_env_defaults();

    if let Some(from_cli) = cli.to_connection_config()? {
        connection.merge(&from_cli);
    }

    // The environment value is the only one not yet checked
    ConnectionConfig::from_connection_string(connection.uri())?;

    Ok(connection)
}
