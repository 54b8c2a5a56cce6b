//! Catalog Routes
//!
//! Options for the dashboard's filter controls.
//!
//! - GET /api/v1/catalog - Regions, species, syndromes, severities, statuses and window

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CatalogResponse, RegionOption};
use crate::api::state::AppState;
use crate::surveillance::{CaseStatus, Region, Severity, Species, Syndrome};

/// GET /api/v1/catalog
pub async fn get_catalog(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let window = state.dataset.window();

    Json(CatalogResponse {
        regions: Region::ALL
            .iter()
            .map(|r| RegionOption {
                name: *r,
                anchor: r.anchor(),
            })
            .collect(),
        species: Species::ALL.to_vec(),
        syndromes: Syndrome::ALL.to_vec(),
        severities: Severity::ALL.to_vec(),
        statuses: CaseStatus::ALL.to_vec(),
        window_start: window.start,
        window_end: window.end,
    })
}
