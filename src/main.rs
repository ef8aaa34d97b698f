use anyhow::Result;
use clap::Parser;

use postboard::{Config, PostStore, Server, health, posts};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();

    let app = posts::routes(&config.base_path, PostStore::new())
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    Server::bind(config.listen).serve(app).await?;
    Ok(())
}
