//! Export Routes
//!
//! Download of the filtered records.
//!
//! - GET /api/v1/export - Export filtered records as csv, json or ndjson

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{ExportParams, FilterParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::routes::select;
use crate::api::state::AppState;
use crate::surveillance::SurveillanceRecord;

/// Supported export encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Ndjson,
}

impl ExportFormat {
    pub fn parse(s: &str) -> ApiResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "ndjson" => Ok(ExportFormat::Ndjson),
            other => Err(ApiError::Validation(format!(
                "Unsupported export format: {} (use csv, json or ndjson)",
                other
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
            ExportFormat::Ndjson => "application/x-ndjson",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Ndjson => "ndjson",
        }
    }
}

/// GET /api/v1/export
///
/// Export the filtered records as an attachment.
pub async fn export_records(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
    Query(export): Query<ExportParams>,
) -> ApiResult<Response> {
    if !state.config.enable_export {
        return Err(ApiError::Validation(
            "Export feature is disabled".to_string(),
        ));
    }

    let format = ExportFormat::parse(&export.format)?;
    let selection = select(&state, &params)?;

    let body = encode_records(&selection, format)?;

    tracing::info!(
        records = selection.len(),
        format = format.extension(),
        "Exported surveillance records"
    );

    let filename = format!(
        "wildwatch_export_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// Encode records in the given format
pub fn encode_records(records: &[&SurveillanceRecord], format: ExportFormat) -> ApiResult<Vec<u8>> {
    match format {
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records {
                writer
                    .serialize(record)
                    .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;
            }
            writer
                .into_inner()
                .map_err(|e| ApiError::Internal(format!("CSV flush failed: {}", e)))
        }
        ExportFormat::Json => serde_json::to_vec_pretty(records)
            .map_err(|e| ApiError::Internal(format!("JSON encoding failed: {}", e))),
        ExportFormat::Ndjson => {
            let mut out = Vec::new();
            for record in records {
                serde_json::to_writer(&mut out, record)
                    .map_err(|e| ApiError::Internal(format!("JSON encoding failed: {}", e)))?;
                out.push(b'\n');
            }
            Ok(out)
        }
    }
}
