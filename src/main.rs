use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use storefront::config::ServerConfig;
use storefront::seed::seed_all;
use storefront::server::{AppState, create_router};
use storefront::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "An e-commerce catalog API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and database schema
    Init {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Load the sample catalog into an empty database
    Seed {
        /// Data directory for the database
        #[arg(long, default_value = "./data")]
        data_dir: String,
    },

    /// Start the server
    Serve {
        /// TOML file with host, port and data_dir; flags given here win
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long, short)]
        port: Option<u16>,

        /// Data directory for the database
        #[arg(long)]
        data_dir: Option<String>,
    },
}

fn db_path(data_dir: &str) -> PathBuf {
    ServerConfig {
        data_dir: data_dir.into(),
        ..ServerConfig::default()
    }
    .db_path()
}

/// Opens an existing database, refusing to create one implicitly.
fn open_store(db_path: &std::path::Path) -> anyhow::Result<SqliteStore> {
    if !db_path.exists() {
        bail!(
            "Database not found at {}. Run 'storefront init' first.",
            db_path.display()
        );
    }
    Ok(SqliteStore::new(db_path)?)
}

fn run_init(data_dir: &str) -> anyhow::Result<()> {
    fs::create_dir_all(data_dir)?;

    let db_path = db_path(data_dir);
    let store = SqliteStore::new(&db_path)?;
    store.initialize()?;

    println!("Database ready at {}", db_path.display());
    Ok(())
}

fn run_seed(data_dir: &str) -> anyhow::Result<()> {
    let store = open_store(&db_path(data_dir))?;
    store.initialize()?;

    let summary = seed_all(&store)?;
    println!(
        "Seeded {} categories, {} products, {} tags, {} product tags",
        summary.categories, summary.products, summary.tags, summary.product_tags
    );
    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config.db_path())?;
    store.initialize()?;

    let state = Arc::new(AppState::new(Arc::new(store)));

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("storefront=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { data_dir } => run_init(&data_dir)?,
        Commands::Seed { data_dir } => run_seed(&data_dir)?,
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let mut config = match config {
                Some(path) => ServerConfig::load(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir.into();
            }

            run_serve(config).await?;
        }
    }

    Ok(())
}
