use clap::Parser;
use std::{net::SocketAddr, time::Duration};

use crate::infrastructure::catalog::{CatalogClientConfig, DEFAULT_CATALOG_URL};

/// Start-up settings. Every flag can also come from the environment.
#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(about = "Book search proxy in front of the ISBNdb catalog")]
#[command(version)]
pub struct Settings {
    #[arg(
        long,
        env = "ISBNDB_API_KEY",
        hide_env_values = true,
        help = "ISBNdb API key"
    )]
    pub api_key: String,

    #[arg(
        long,
        env = "ISBNDB_CATALOG_URL",
        default_value = DEFAULT_CATALOG_URL,
        help = "Base URL of the ISBNdb JSON API"
    )]
    pub catalog_url: String,

    #[arg(
        long,
        env = "SHELFMARK_LISTEN",
        default_value = "0.0.0.0:3000",
        help = "Address to serve the search API on"
    )]
    pub listen: SocketAddr,

    #[arg(
        long,
        env = "SHELFMARK_UPSTREAM_TIMEOUT",
        default_value_t = 10,
        help = "Seconds to wait for the catalog before giving up"
    )]
    pub timeout_secs: u64,
}

impl Settings {
    pub fn catalog_client_config(&self) -> CatalogClientConfig {
        CatalogClientConfig {
            catalog_url: self.catalog_url.clone(),
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}
