//! Server configuration
//!
//! Command line flags, each with an environment variable fallback, folded
//! into a validated `ServerConfig`.

use clap::{Parser, ValueEnum};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use shared::{PizzaType, TallyConfig};

use crate::error::{WebServerError, WebServerResult};

/// Orders shown per date when nothing else is configured
pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

/// Where submitted orders are kept
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    /// Process memory, lost on restart
    Memory,
    /// JSON-lines files under the data directory
    File,
}

/// Command line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "webserver")]
#[command(about = "Order intake and tally service for the pizza lunch fundraiser")]
pub struct Args {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "PIZZA_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port for HTTP server
    #[arg(long, env = "PIZZA_PORT", default_value = "5000")]
    pub port: u16,

    /// Persistence backend
    #[arg(long, env = "PIZZA_STORE", value_enum, default_value = "file")]
    pub store: StoreBackend,

    /// Directory for the file backend
    #[arg(long, env = "PIZZA_DATA_DIR", default_value = "./orders")]
    pub data_dir: PathBuf,

    /// Number of recent orders returned per date
    #[arg(long, env = "PIZZA_DISPLAY_LIMIT", default_value = "5")]
    pub display_limit: usize,

    /// Safety margin added to slice demand (0.1 = 10%)
    #[arg(long, env = "PIZZA_BUFFER_FRACTION", default_value = "0.1")]
    pub buffer_fraction: f64,

    /// Pizza types to tally, comma separated (defaults to the full menu)
    #[arg(long, env = "PIZZA_TYPES", value_delimiter = ',')]
    pub pizza_types: Vec<PizzaType>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PIZZA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn into_config(self) -> WebServerResult<ServerConfig> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| WebServerError::config(format!("Invalid host {}: {}", self.host, e)))?;

        let pizza_types = if self.pizza_types.is_empty() {
            PizzaType::ALL.to_vec()
        } else {
            self.pizza_types
        };

        let config = ServerConfig {
            bind_addr: SocketAddr::new(ip, self.port),
            store: self.store,
            data_dir: self.data_dir,
            display_limit: self.display_limit,
            tally: TallyConfig::default()
                .with_pizza_types(pizza_types)
                .with_buffer_fraction(self.buffer_fraction),
        };
        config.validate()?;

        Ok(config)
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub store: StoreBackend,
    pub data_dir: PathBuf,
    pub display_limit: usize,
    pub tally: TallyConfig,
}

impl ServerConfig {
    pub fn validate(&self) -> WebServerResult<()> {
        if self.display_limit == 0 {
            return Err(WebServerError::config("display_limit must be at least 1"));
        }
        self.tally.validate()?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            store: StoreBackend::Memory,
            data_dir: PathBuf::from("./orders"),
            display_limit: DEFAULT_DISPLAY_LIMIT,
            tally: TallyConfig::default(),
        }
    }
}
