//! # Game Server - Geospatial Point API
//!
//! An HTTP front end for the [`point_index`] crate. Each game owns an
//! independent set of named points on the globe; clients store points, remove
//! them, and ask which points lie within a radius of a coordinate.
//!
//! ## Routes
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | POST | `/games/{game}/points` | 201, body `{"name", "x", "y"}` |
//! | GET | `/games/{game}/points?x=&y=&radius=[&unit=][&count=][&sort=]` | 200, JSON array |
//! | GET | `/games/{game}/points/{point}` | 200, or 404 |
//! | DELETE | `/games/{game}/points/{point}` | 204 |
//! | GET | `/health` | 200 |
//!
//! `x` is the longitude and `y` the latitude, in degrees. Radius units are
//! `m` (default), `km`, `mi` and `ft`; reported distances use the same unit.
//!
//! ## Error Handling
//!
//! The server uses structured error types ([`ServerError`]) to categorize failures:
//!
//! * **Validation errors** - bad names, coordinates, radii, units and
//!   malformed requests are answered with 400 and `{"error": message}`
//! * **Internal errors** - logged, answered with an opaque 500
//!
//! ## Usage
//!
//! ```rust,no_run
//! use game_server::{create_server, ShutdownState};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), game_server::ServerError> {
//! let server = create_server();
//! let shutdown = ShutdownState::new();
//! server.start_with_shutdown_state(shutdown).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! The index is shared as `Arc<GeoIndex>`; games are locked independently,
//! so traffic on one game never waits on another.

// Re-export core types and functions for easy access
pub use config::ServerConfig;
pub use error::ServerError;
pub use server::GameServer;
pub use shutdown::ShutdownState;
pub use utils::{create_server, create_server_with_config};

// Public module declarations
pub mod config;
pub mod error;
pub mod server;
pub mod shutdown;
pub mod types;
pub mod utils;
pub mod validation;
