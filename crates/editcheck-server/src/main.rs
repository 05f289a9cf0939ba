use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use editcheck_server::{config::Args, Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ServerConfig::load(&args)?;

    init_tracing(&config);

    let server = Server::new(config)?;
    server.start().await?;

    Ok(())
}

fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
