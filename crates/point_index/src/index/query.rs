/// Radius query types
use crate::coord::{Coordinate, DistanceUnit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Radius query parameters
#[derive(Debug, Clone)]
pub struct RadiusQuery {
    /// Center of the query circle
    pub center: Coordinate,
    /// Query radius, expressed in `unit`
    pub radius: f64,
    /// Unit of `radius` and of reported distances
    pub unit: DistanceUnit,
    /// Optional filters for the query
    pub filters: QueryFilters,
}

impl RadiusQuery {
    pub fn new(center: Coordinate, radius: f64, unit: DistanceUnit) -> Self {
        Self {
            center,
            radius,
            unit,
            filters: QueryFilters::default(),
        }
    }

    pub fn with_filters(mut self, filters: QueryFilters) -> Self {
        self.filters = filters;
        self
    }
}

/// Filters that can be applied to radius queries
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryFilters {
    /// Maximum number of results to return, applied after ordering
    pub max_results: Option<usize>,
    /// Order of the returned matches
    pub order: SortOrder,
}

/// Distance ordering of query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// A point matched by a radius query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMatch {
    pub name: String,
    pub coordinate: Coordinate,
    /// Distance from the query center in the query's unit
    pub distance: f64,
}

/// A stored point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointRecord {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Orders matches by distance, then by name.
pub(crate) fn compare_matches(a: &PointMatch, b: &PointMatch) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then_with(|| a.name.cmp(&b.name))
}
