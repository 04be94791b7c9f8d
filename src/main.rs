use clap::Parser;

use community_api::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so DATABASE_URL and JWT_SECRET_KEY can live there
    let _ = dotenvy::dotenv();

    run(Cli::parse()).await
}
