//! Server configuration types and defaults.
//!
//! This module contains the server configuration structure and default values
//! used to initialize and customize the game server behavior.

use point_index::IndexConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Configuration structure for the game server.
///
/// Contains the network binding, request limits enforced at the HTTP
/// boundary, and the tuning passed to the point index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The socket address to bind the server to
    pub bind_address: SocketAddr,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,

    /// Maximum accepted point name length in bytes
    pub max_name_length: usize,

    /// Point index tuning
    pub index: IndexConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_body_bytes: 64 * 1024, // 64KB
            max_name_length: 1024,
            index: IndexConfig::default(),
        }
    }
}
