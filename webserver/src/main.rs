//! WebServer process entry point
//!
//! Parses configuration, picks the order store backend, and serves the order
//! API until Ctrl+C.

use clap::Parser;
use shared::logging;

use webserver::{
    WebServer, WebServerResult,
    config::{Args, StoreBackend},
    services::{InMemoryOrderStore, JsonFileOrderStore},
};

#[tokio::main]
async fn main() -> WebServerResult<()> {
    // Values from .env become defaults for the PIZZA_* flags
    let _ = dotenv::dotenv();

    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = args.into_config().inspect_err(|e| logging::log_error("Configuration", e))?;

    logging::log_startup(&format!(
        "pizza order service on {} ({:?} store, {:.0}% buffer)",
        config.bind_addr,
        config.store,
        config.tally.buffer_fraction * 100.0
    ));

    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("🧪 Using in-memory store; orders are lost on restart");
            WebServer::new(config, InMemoryOrderStore::new()).run().await?;
        }
        StoreBackend::File => {
            let store = JsonFileOrderStore::with_base_dir(&config.data_dir);
            store.initialize().await?;
            WebServer::new(config, store).run().await?;
        }
    }

    logging::log_success("WebServer stopped gracefully");
    Ok(())
}
