//! HTTP route handlers.
//!
//! Each handler decodes and validates its request at the boundary, then calls
//! exactly one operation on the shared [`GeoIndex`].

use crate::{
    error::ServerError,
    types::{AddPointRequest, HealthResponse, MatchBody, PointBody, RadiusParams},
    validation::validate_name,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use point_index::{validate_coordinate, DistanceUnit, GeoIndex, QueryFilters, RadiusQuery};
use std::sync::Arc;
use tracing::debug;

/// Router state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub index: Arc<GeoIndex>,
    pub max_name_length: usize,
}

impl AppState {
    fn check_names(&self, game: &str, point: &str) -> Result<(), ServerError> {
        validate_name("game", game, self.max_name_length)?;
        validate_name("point", point, self.max_name_length)?;
        Ok(())
    }
}

/// `POST /games/{game}/points`
pub async fn add_point(
    State(state): State<AppState>,
    Path(game): Path<String>,
    payload: Result<Json<AddPointRequest>, JsonRejection>,
) -> Result<StatusCode, ServerError> {
    let Json(request) = payload?;
    state.check_names(&game, &request.name)?;
    let coordinate = validate_coordinate(request.x, request.y)?;

    state.index.add_point(&game, &request.name, coordinate)?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /games/{game}/points/{point}`
pub async fn remove_point(
    State(state): State<AppState>,
    Path((game, point)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    state.check_names(&game, &point)?;

    state.index.remove_point(&game, &point)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /games/{game}/points?x=&y=&radius=`
pub async fn query_points(
    State(state): State<AppState>,
    Path(game): Path<String>,
    params: Result<Query<RadiusParams>, QueryRejection>,
) -> Result<Json<Vec<MatchBody>>, ServerError> {
    let Query(params) = params?;
    validate_name("game", &game, state.max_name_length)?;

    let unit = match params.unit.as_deref() {
        Some(unit) => unit.parse::<DistanceUnit>()?,
        None => DistanceUnit::default(),
    };
    if params.count == Some(0) {
        return Err(ServerError::BadRequest("count must be a positive integer".to_string()));
    }
    let center = validate_coordinate(params.x, params.y)?;

    let query = RadiusQuery::new(center, params.radius, unit).with_filters(QueryFilters {
        max_results: params.count,
        order: params.sort.unwrap_or_default(),
    });
    let matches = state.index.query(&game, &query)?;

    Ok(Json(matches.into_iter().map(MatchBody::from).collect()))
}

/// `GET /games/{game}/points/{point}`
pub async fn get_point(
    State(state): State<AppState>,
    Path((game, point)): Path<(String, String)>,
) -> Result<Json<PointBody>, ServerError> {
    state.check_names(&game, &point)?;

    match state.index.get_point(&game, &point)? {
        Some(record) => Ok(Json(record.into())),
        None => {
            debug!(game, point, "Point lookup missed");
            Err(ServerError::NotFound(format!("point '{point}' in game '{game}'")))
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ServerError> {
    let stats = state.index.stats()?;
    Ok(Json(HealthResponse { status: "ok", stats }))
}
