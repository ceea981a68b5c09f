//! Request and response bodies of the HTTP API.

use point_index::{IndexStats, PointMatch, PointRecord, SortOrder};
use serde::{Deserialize, Serialize};

/// Body of `POST /games/{game}/points`.
///
/// `x` is the longitude and `y` the latitude, both in degrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPointRequest {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "X", alias = "longitude", alias = "lon")]
    pub x: f64,
    #[serde(alias = "Y", alias = "latitude", alias = "lat")]
    pub y: f64,
}

/// Query string of `GET /games/{game}/points`.
#[derive(Debug, Clone, Deserialize)]
pub struct RadiusParams {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    /// One of `m`, `km`, `mi`, `ft`; meters when absent
    pub unit: Option<String>,
    pub count: Option<usize>,
    pub sort: Option<SortOrder>,
}

/// A stored point as returned by `GET /games/{game}/points/{point}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointBody {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<PointRecord> for PointBody {
    fn from(record: PointRecord) -> Self {
        Self {
            longitude: record.coordinate.longitude(),
            latitude: record.coordinate.latitude(),
            name: record.name,
        }
    }
}

/// One element of a radius query response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBody {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Distance from the query center, in the requested unit
    pub distance: f64,
}

impl From<PointMatch> for MatchBody {
    fn from(m: PointMatch) -> Self {
        Self {
            longitude: m.coordinate.longitude(),
            latitude: m.coordinate.latitude(),
            distance: m.distance,
            name: m.name,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub stats: IndexStats,
}
