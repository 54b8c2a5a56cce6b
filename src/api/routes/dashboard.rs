//! Dashboard Routes
//!
//! Widget payloads for the current filter. Every request re-runs the full
//! filter and aggregation over the session dataset.
//!
//! - GET /api/v1/dashboard - Everything below in one payload
//! - GET /api/v1/summary - Headline metrics
//! - GET /api/v1/map - Map markers
//! - GET /api/v1/timeline - Weekly case counts
//! - GET /api/v1/breakdown - Species and syndrome counts

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    BreakdownResponse, FilterParams, MapResponse, SummaryResponse, TimelineResponse,
};
use crate::api::error::ApiResult;
use crate::api::routes::select;
use crate::api::state::AppState;
use crate::pipeline::{map_points, ranked, summarize, timeline, Aggregates, Dashboard};
use crate::surveillance::GeoPoint;

/// Initial map view over the monitoring regions
const MAP_CENTER: GeoPoint = GeoPoint {
    latitude: -1.0,
    longitude: 37.5,
};

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Dashboard>> {
    let selection = select(&state, &params)?;
    Ok(Json(Dashboard::from_selection(
        &selection,
        state.dataset.window().end,
    )))
}

/// GET /api/v1/summary
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<SummaryResponse>> {
    let selection = select(&state, &params)?;
    let agg = Aggregates::compute(selection.iter().copied());

    Ok(Json(SummaryResponse {
        summary: summarize(&agg, &selection, state.dataset.window().end),
        dataset_size: state.dataset.len(),
    }))
}

/// GET /api/v1/map
pub async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<MapResponse>> {
    let selection = select(&state, &params)?;

    Ok(Json(MapResponse {
        center: MAP_CENTER,
        points: map_points(&selection),
    }))
}

/// GET /api/v1/timeline
pub async fn get_timeline(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<TimelineResponse>> {
    let selection = select(&state, &params)?;
    let agg = Aggregates::compute(selection.iter().copied());

    Ok(Json(TimelineResponse {
        weeks: timeline(&agg),
    }))
}

/// GET /api/v1/breakdown
pub async fn get_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<BreakdownResponse>> {
    let selection = select(&state, &params)?;
    let agg = Aggregates::compute(selection.iter().copied());

    Ok(Json(BreakdownResponse {
        species: ranked(&agg.by_species),
        syndromes: ranked(&agg.by_syndrome),
    }))
}
