//! # Point Index
//!
//! In-memory geospatial index of named points, partitioned by game.
//!
//! * [`coord`] - coordinate validation, great-circle distance, units
//! * [`index`] - the [`GeoIndex`] with upsert, idempotent removal and radius
//!   queries
//!
//! ```rust
//! use point_index::{Coordinate, DistanceUnit, GeoIndex};
//!
//! let index = GeoIndex::new();
//! let paris = Coordinate::new(2.3522, 48.8566)?;
//! index.add_point("city", "paris", paris)?;
//! index.add_point("city", "london", Coordinate::new(-0.1278, 51.5074)?)?;
//!
//! let nearby = index.query_radius("city", paris, 300.0, DistanceUnit::Kilometers)?;
//! assert_eq!(nearby.len(), 1);
//! assert_eq!(nearby[0].name, "paris");
//! # Ok::<(), point_index::IndexError>(())
//! ```
//!
//! All operations are synchronous and never block on I/O; the index is meant
//! to be shared behind an `Arc` by concurrent request handlers.

pub mod coord;
pub mod error;
pub mod index;

pub use coord::{convert_unit, distance, validate_coordinate, Coordinate, DistanceUnit};
pub use error::IndexError;
pub use index::{
    GameStats, GeoIndex, IndexConfig, IndexStats, PointMatch, PointRecord, QueryFilters, RadiusQuery,
    SortOrder,
};
