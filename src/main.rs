use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use motif::config::StudioConfig;
use motif::database::{connection, seed_data};
use motif::server::{self, MigrateDirection};

#[derive(Parser, Debug)]
#[command(name = "motif", version, about = "Design catalog and SEO workflow service")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, default_value = "motif.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve {
        /// Override the configured port.
        #[arg(short, long)]
        port: Option<u16>,
        /// Override the configured database path.
        #[arg(short, long)]
        database: Option<String>,
        /// Restrict CORS to this origin instead of allowing any.
        #[arg(long)]
        cors_origin: Option<String>,
    },
    /// Apply or roll back database migrations.
    Migrate {
        #[command(subcommand)]
        direction: MigrateDirection,
    },
    /// Insert an example taxonomy and design.
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = StudioConfig::load_or_default(&cli.config)?;

    match cli.command {
        Command::Serve {
            port,
            database,
            cors_origin,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(database) = database {
                config.database = database;
            }
            server::start_server(config, cors_origin.as_deref()).await?;
        }
        Command::Migrate { direction } => {
            server::migrate_database(&config.database, direction).await?;
        }
        Command::Seed => {
            let url = connection::get_database_url(Some(&config.database));
            let db = connection::establish_connection(&url).await?;
            connection::setup_database(&db).await?;
            seed_data::create_example_catalog(&db).await?;
        }
    }

    Ok(())
}
