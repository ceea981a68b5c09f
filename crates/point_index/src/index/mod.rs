//! Geospatial index over all games.
//!
//! [`GeoIndex`] owns one [`GamePoints`] collection per game. Games are created
//! implicitly by their first `add_point` and are kept for the lifetime of the
//! index, even once emptied.
//!
//! # Locking
//!
//! Games live in a `DashMap` of `Arc<RwLock<GamePoints>>`. The map guard is
//! released before the game lock is taken, so operations on different games
//! never wait on each other's locks. Within a game, `add_point` and
//! `remove_point` take the write lock and queries take the read lock.

mod query;
mod rtree;

pub use query::{PointMatch, PointRecord, QueryFilters, RadiusQuery, SortOrder};
pub use rtree::{GamePoints, GameStats};

use crate::coord::{Coordinate, DistanceUnit};
use crate::error::IndexError;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

fn default_linear_scan_threshold() -> usize {
    32
}

/// Index tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Games with at most this many points are scanned linearly
    #[serde(default = "default_linear_scan_threshold")]
    pub linear_scan_threshold: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            linear_scan_threshold: default_linear_scan_threshold(),
        }
    }
}

/// Index-wide counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub games: usize,
    pub points: usize,
    pub total_insertions: u64,
    pub total_removals: u64,
    pub total_queries: u64,
}

type SharedGame = Arc<RwLock<GamePoints>>;

/// The top-level point index.
#[derive(Debug, Default)]
pub struct GeoIndex {
    games: DashMap<String, SharedGame>,
    config: IndexConfig,
}

impl GeoIndex {
    /// Creates an empty index with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            games: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> IndexConfig {
        self.config
    }

    /// Inserts or replaces the point `name` in `game`, creating the game if
    /// it does not exist yet.
    pub fn add_point(&self, game: &str, name: &str, coordinate: Coordinate) -> Result<(), IndexError> {
        validate_name(name)?;

        let shared = self.game_or_create(game);
        let replaced = write_game(&shared, game)?.upsert(name, coordinate);

        trace!(game, name, %coordinate, replaced, "Point stored");
        Ok(())
    }

    /// Removes the point `name` from `game`. Removing a missing point, or a
    /// point of an unknown game, succeeds.
    pub fn remove_point(&self, game: &str, name: &str) -> Result<(), IndexError> {
        validate_name(name)?;

        let Some(shared) = self.game(game) else {
            trace!(game, name, "Remove on unknown game");
            return Ok(());
        };
        let removed = write_game(&shared, game)?.remove(name);

        trace!(game, name, removed, "Point removed");
        Ok(())
    }

    /// Returns every point of `game` within `radius` of `center`, nearest first.
    pub fn query_radius(
        &self,
        game: &str,
        center: Coordinate,
        radius: f64,
        unit: DistanceUnit,
    ) -> Result<Vec<PointMatch>, IndexError> {
        self.query(game, &RadiusQuery::new(center, radius, unit))
    }

    /// Runs a radius query with filters. An unknown game yields no matches.
    pub fn query(&self, game: &str, query: &RadiusQuery) -> Result<Vec<PointMatch>, IndexError> {
        if !query.radius.is_finite() || query.radius < 0.0 {
            return Err(IndexError::InvalidRadius(query.radius));
        }

        let Some(shared) = self.game(game) else {
            return Ok(Vec::new());
        };
        let results = read_game(&shared, game)?.query(query);

        trace!(
            game,
            center = %query.center,
            radius = query.radius,
            unit = %query.unit,
            matches = results.len(),
            "Radius query"
        );
        Ok(results)
    }

    /// Looks up a single point.
    pub fn get_point(&self, game: &str, name: &str) -> Result<Option<PointRecord>, IndexError> {
        validate_name(name)?;

        match self.game(game) {
            Some(shared) => Ok(read_game(&shared, game)?.get(name)),
            None => Ok(None),
        }
    }

    /// Counters for one game, `None` if the game was never created.
    pub fn game_stats(&self, game: &str) -> Result<Option<GameStats>, IndexError> {
        match self.game(game) {
            Some(shared) => Ok(Some(read_game(&shared, game)?.stats())),
            None => Ok(None),
        }
    }

    /// Aggregated counters over all games.
    pub fn stats(&self) -> Result<IndexStats, IndexError> {
        let games: Vec<(String, SharedGame)> = self
            .games
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        let mut stats = IndexStats {
            games: games.len(),
            ..IndexStats::default()
        };
        for (game, shared) in &games {
            let game_stats = read_game(shared, game)?.stats();
            stats.points += game_stats.points;
            stats.total_insertions += game_stats.total_insertions;
            stats.total_removals += game_stats.total_removals;
            stats.total_queries += game_stats.total_queries;
        }
        Ok(stats)
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    fn game(&self, game: &str) -> Option<SharedGame> {
        self.games.get(game).map(|entry| Arc::clone(entry.value()))
    }

    fn game_or_create(&self, game: &str) -> SharedGame {
        if let Some(shared) = self.game(game) {
            return shared;
        }

        let threshold = self.config.linear_scan_threshold;
        let entry = self.games.entry(game.to_string()).or_insert_with(|| {
            debug!(game, "Creating game");
            Arc::new(RwLock::new(GamePoints::new(threshold)))
        });
        Arc::clone(entry.value())
    }
}

fn validate_name(name: &str) -> Result<(), IndexError> {
    if name.is_empty() {
        return Err(IndexError::InvalidName("point name must not be empty".to_string()));
    }
    Ok(())
}

fn read_game<'a>(shared: &'a SharedGame, game: &str) -> Result<RwLockReadGuard<'a, GamePoints>, IndexError> {
    shared
        .read()
        .map_err(|e| IndexError::InternalFault(format!("game '{game}' lock poisoned: {e}")))
}

fn write_game<'a>(shared: &'a SharedGame, game: &str) -> Result<RwLockWriteGuard<'a, GamePoints>, IndexError> {
    shared
        .write()
        .map_err(|e| IndexError::InternalFault(format!("game '{game}' lock poisoned: {e}")))
}
