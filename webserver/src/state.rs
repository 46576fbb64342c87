//! Server state shared by every request handler

use std::time::Instant;

use shared::TallyEngine;

use crate::config::ServerConfig;

/// Read-only state handed to handlers through the router
#[derive(Debug)]
pub struct WebServerState {
    pub config: ServerConfig,
    pub engine: TallyEngine,
    pub server_start_time: Instant,
}

impl WebServerState {
    pub fn new(config: ServerConfig) -> Self {
        let engine = TallyEngine::new(config.tally.clone());
        Self {
            config,
            engine,
            server_start_time: Instant::now(),
        }
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }
}
