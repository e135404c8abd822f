//! qboard CLI - audience Q&A board
//!
//! `qboard serve` runs the HTTP server: attendees submit and vote on
//! questions, moderators hide/unhide/delete with the `X-Admin-Token`
//! header, and the projector page polls the same list endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use qboard_server::db;
use qboard_server::http::admin::AdminGuard;
use qboard_server::http::{run_server, ServerConfig};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "qboard",
    author,
    version,
    about = "Audience Q&A board: submit questions, vote, moderate"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Path to the SQLite database file
    #[arg(long, default_value = "data/qboard.db")]
    db_path: PathBuf,

    /// Directory holding index.html, projector.html, and assets
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match cli.command {
        Commands::Serve(args) => serve(args).await,
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let bind_addr: SocketAddr = format!("{}:{}", args.bind, args.port)
        .parse()
        .context("invalid bind address")?;

    tracing::info!("Opening database at {}", args.db_path.display());
    let pool = db::create_pool(&args.db_path)
        .await
        .context("failed to open database")?;
    db::migrations::run(&pool)
        .await
        .context("schema bootstrap failed")?;

    // Single out-of-band secret, read once at startup. Absence keeps the
    // board running but answers 503 on moderation endpoints.
    let admin = AdminGuard::new(std::env::var("ADMIN_TOKEN").ok());

    let config = ServerConfig {
        bind_addr,
        static_dir: args.static_dir,
    };

    run_server(pool, admin, config).await?;
    Ok(())
}
