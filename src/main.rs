use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use shelfmark::{
    config::Settings, core::Application, http, infrastructure::catalog::CatalogClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::parse();
    let catalog = CatalogClient::new(settings.catalog_client_config())?;
    let listener = TcpListener::bind(settings.listen).await?;

    http::Api::new(Application::new(catalog))
        .start(listener)
        .await?;

    Ok(())
}
