//! Utility functions and helper methods for the game server.
//!
//! This module provides convenient factory functions for creating server
//! instances with different configurations.

use crate::{config::ServerConfig, server::GameServer};

/// Creates a new game server with default configuration.
///
/// # Example
///
/// ```rust
/// use game_server::create_server;
///
/// let server = create_server();
/// assert_eq!(server.index().game_count(), 0);
/// ```
pub fn create_server() -> GameServer {
    GameServer::new(ServerConfig::default())
}

/// Creates a new game server with custom configuration.
///
/// # Arguments
///
/// * `config` - A `ServerConfig` instance with desired settings
///
/// # Example
///
/// ```rust
/// use game_server::{create_server_with_config, ServerConfig};
///
/// let config = ServerConfig {
///     bind_address: "0.0.0.0:9000".parse().unwrap(),
///     max_name_length: 64,
///     ..Default::default()
/// };
///
/// let server = create_server_with_config(config);
/// assert_eq!(server.config().max_name_length, 64);
/// ```
pub fn create_server_with_config(config: ServerConfig) -> GameServer {
    GameServer::new(config)
}
