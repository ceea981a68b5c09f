//! R*-tree backed point storage for a single game.
//!
//! Points are indexed by their position on the earth sphere in 3D Cartesian
//! meters. A great-circle radius maps to a chord length, so the tree's
//! Euclidean range search returns a superset of the true matches; candidates
//! are then filtered by exact haversine distance.

use super::query::{compare_matches, PointMatch, PointRecord, RadiusQuery, SortOrder};
use crate::coord::{chord_length, convert_unit, distance, within_radius, Coordinate, DistanceUnit};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Added to the search chord so rounding never drops a true match.
const CHORD_SLACK_M: f64 = 1e-3;

/// Entry stored inside the R-tree.
#[derive(Debug, Clone)]
struct PointEntry {
    name: String,
    coordinate: Coordinate,
    point: [f64; 3],
}

impl PointEntry {
    fn new(name: String, coordinate: Coordinate) -> Self {
        let point = coordinate.to_cartesian();
        Self {
            name,
            coordinate,
            point,
        }
    }

    fn to_match(&self, distance_m: f64, unit: DistanceUnit) -> PointMatch {
        PointMatch {
            name: self.name.clone(),
            coordinate: self.coordinate,
            distance: convert_unit(distance_m, unit),
        }
    }
}

impl PartialEq for PointEntry {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PointEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Counters for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    pub points: usize,
    pub total_insertions: u64,
    pub total_removals: u64,
    pub total_queries: u64,
}

/// All points of one game.
#[derive(Debug)]
pub struct GamePoints {
    /// Underlying R-tree
    tree: RTree<PointEntry>,
    /// Cached entries for upserts and removals by name
    entries: HashMap<String, PointEntry>,
    /// Games this small are scanned instead of searched
    linear_scan_threshold: usize,
    total_insertions: u64,
    total_removals: u64,
    /// Bumped under the read lock
    total_queries: AtomicU64,
}

impl GamePoints {
    pub fn new(linear_scan_threshold: usize) -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
            linear_scan_threshold,
            total_insertions: 0,
            total_removals: 0,
            total_queries: AtomicU64::new(0),
        }
    }

    /// Inserts or replaces a point. Returns true if a point was replaced.
    pub fn upsert(&mut self, name: &str, coordinate: Coordinate) -> bool {
        let replaced = match self.entries.remove(name) {
            Some(existing) => {
                let _ = self.tree.remove(&existing);
                true
            }
            None => false,
        };

        let entry = PointEntry::new(name.to_string(), coordinate);
        self.tree.insert(entry.clone());
        self.entries.insert(entry.name.clone(), entry);
        self.total_insertions += 1;
        replaced
    }

    /// Removes a point. Returns true if it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.entries.remove(name) {
            Some(existing) => {
                let _ = self.tree.remove(&existing);
                self.total_removals += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<PointRecord> {
        self.entries.get(name).map(|entry| PointRecord {
            name: entry.name.clone(),
            coordinate: entry.coordinate,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs a radius query. The radius must already be validated.
    pub fn query(&self, query: &RadiusQuery) -> Vec<PointMatch> {
        self.total_queries.fetch_add(1, Ordering::Relaxed);

        let radius_m = query.unit.to_meters(query.radius);
        let mut results = if self.entries.len() <= self.linear_scan_threshold {
            self.scan_radius(query.center, radius_m, query.unit)
        } else {
            self.tree_radius(query.center, radius_m, query.unit)
        };

        results.sort_by(compare_matches);
        if query.filters.order == SortOrder::Desc {
            results.reverse();
        }
        if let Some(max_results) = query.filters.max_results {
            results.truncate(max_results);
        }
        results
    }

    /// Checks every point.
    pub(crate) fn scan_radius(&self, center: Coordinate, radius_m: f64, unit: DistanceUnit) -> Vec<PointMatch> {
        self.entries
            .values()
            .filter_map(|entry| {
                let d = distance(center, entry.coordinate);
                within_radius(d, radius_m).then(|| entry.to_match(d, unit))
            })
            .collect()
    }

    /// Chord-bounded R-tree search followed by an exact distance filter.
    pub(crate) fn tree_radius(&self, center: Coordinate, radius_m: f64, unit: DistanceUnit) -> Vec<PointMatch> {
        let center_point = center.to_cartesian();
        let search = chord_length(radius_m) + CHORD_SLACK_M;

        self.tree
            .locate_within_distance(center_point, search * search)
            .filter_map(|entry| {
                let d = distance(center, entry.coordinate);
                within_radius(d, radius_m).then(|| entry.to_match(d, unit))
            })
            .collect()
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            points: self.entries.len(),
            total_insertions: self.total_insertions,
            total_removals: self.total_removals,
            total_queries: self.total_queries.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::QueryFilters;
    use std::collections::HashSet;

    fn coord(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat).expect("valid test coordinate")
    }

    fn names(matches: &[PointMatch]) -> HashSet<String> {
        matches.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_upsert_and_query() {
        let mut game = GamePoints::new(0);
        assert!(!game.upsert("a", coord(0.0, 0.0)));
        assert!(!game.upsert("b", coord(0.5, 0.0)));

        assert_eq!(game.len(), 2);

        let query = RadiusQuery::new(coord(0.0, 0.0), 10.0, DistanceUnit::Kilometers);
        let results = game.query(&query);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "a");

        let wider = RadiusQuery::new(coord(0.0, 0.0), 100.0, DistanceUnit::Kilometers);
        assert_eq!(names(&game.query(&wider)), HashSet::from(["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_upsert_moves_point() {
        let mut game = GamePoints::new(0);
        game.upsert("p", coord(0.0, 0.0));
        assert!(game.upsert("p", coord(20.0, 0.0)));
        assert_eq!(game.len(), 1);

        let near_old = RadiusQuery::new(coord(0.0, 0.0), 5.0, DistanceUnit::Kilometers);
        assert!(game.query(&near_old).is_empty(), "point should have moved out of range");

        let near_new = RadiusQuery::new(coord(20.0, 0.0), 5.0, DistanceUnit::Kilometers);
        let results = game.query(&near_new);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].coordinate, coord(20.0, 0.0));
    }

    #[test]
    fn test_remove_point() {
        let mut game = GamePoints::new(0);
        game.upsert("p", coord(0.0, 0.0));
        assert!(game.remove("p"));
        assert!(!game.remove("p"));
        assert!(game.is_empty());

        let query = RadiusQuery::new(coord(0.0, 0.0), 1.0, DistanceUnit::Meters);
        assert!(game.query(&query).is_empty());
    }

    #[test]
    fn test_tree_and_scan_agree_on_whole_sphere() {
        let mut game = GamePoints::new(0);
        let mut n = 0;
        for lon in (-180..=180).step_by(30) {
            for lat in (-90..=90).step_by(15) {
                game.upsert(&format!("p{n}"), coord(lon as f64, lat as f64));
                n += 1;
            }
        }

        let center = coord(10.0, 10.0);
        for radius_m in [0.0, 1_000_000.0, 5_000_000.0, 15_000_000.0, 25_000_000.0] {
            let tree = game.tree_radius(center, radius_m, DistanceUnit::Meters);
            let scan = game.scan_radius(center, radius_m, DistanceUnit::Meters);
            assert_eq!(names(&tree), names(&scan), "radius {radius_m}");
        }

        let all = game.tree_radius(center, 25_000_000.0, DistanceUnit::Meters);
        assert_eq!(all.len(), n);
    }

    #[test]
    fn test_ordering_and_limit() {
        let mut game = GamePoints::new(0);
        game.upsert("far", coord(0.3, 0.0));
        game.upsert("near", coord(0.1, 0.0));
        game.upsert("mid", coord(0.2, 0.0));

        let query = RadiusQuery::new(coord(0.0, 0.0), 100.0, DistanceUnit::Kilometers);
        let asc: Vec<_> = game.query(&query).into_iter().map(|m| m.name).collect();
        assert_eq!(asc, vec!["near", "mid", "far"]);

        let desc_query = query.clone().with_filters(QueryFilters {
            max_results: Some(2),
            order: SortOrder::Desc,
        });
        let desc: Vec<_> = game.query(&desc_query).into_iter().map(|m| m.name).collect();
        assert_eq!(desc, vec!["far", "mid"]);
    }

    #[test]
    fn test_distance_reported_in_query_unit() {
        let mut game = GamePoints::new(0);
        game.upsert("p", coord(1.0, 0.0));

        let results = game.query(&RadiusQuery::new(coord(0.0, 0.0), 200.0, DistanceUnit::Kilometers));
        let expected_km = distance(coord(0.0, 0.0), coord(1.0, 0.0)) / 1000.0;
        assert!((results[0].distance - expected_km).abs() < 1e-9);
    }

    #[test]
    fn test_stats_counters() {
        let mut game = GamePoints::new(8);
        game.upsert("a", coord(0.0, 0.0));
        game.upsert("a", coord(1.0, 0.0));
        game.remove("a");
        game.remove("missing");
        game.query(&RadiusQuery::new(coord(0.0, 0.0), 1.0, DistanceUnit::Meters));

        assert_eq!(
            game.stats(),
            GameStats {
                points: 0,
                total_insertions: 2,
                total_removals: 1,
                total_queries: 1,
            }
        );
    }
}
