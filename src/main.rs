use crate::config::Config;
use crate::error::Result;
use crate::services::Pipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod error;
mod infrastructure;
mod services;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.args.log_level))
        .init();

    config.ensure_directories()?;

    let pipeline = Pipeline::new(config);
    pipeline.run().await?;

    info!("Capture completed successfully!");
    Ok(())
}
