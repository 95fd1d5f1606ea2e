use clap::Parser;
use tracing_subscriber::EnvFilter;

use golf_api::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("golf_api=info,tower_http=info")),
        )
        .init();

    run(Cli::parse()).await
}
