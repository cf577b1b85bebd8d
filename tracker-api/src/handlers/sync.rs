//! Vendor-sync handlers.
//!
//! Per-vendor failures travel as data: a failure `SyncResult` ships with
//! a 200 because a vendor outage is routine, and the caller needs to see
//! which vendors failed. Only an unknown vendor name (404) or a fault
//! escaping the orchestrator (500) becomes a transport-level error.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_sync::ConnectionTest;
use core_vendors::SyncResult;
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// `POST /api/vendor-sync/sync-all`
pub async fn sync_all(State(state): State<AppState>) -> Json<Vec<SyncResult>> {
    let results = state.orchestrator.sync_all().await;
    info!(
        vendors = results.len(),
        failures = results.iter().filter(|r| !r.success).count(),
        "Completed sync for all vendors"
    );
    Json(results)
}

/// `POST /api/vendor-sync/sync/{vendor}`
///
/// The spawn is the last line of defense: if a single-vendor sync faults in
/// a way the lower layers did not absorb, the caller still gets a failure
/// `SyncResult`, just with a 500.
pub async fn sync_vendor(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
) -> Response {
    let orchestrator = state.orchestrator.clone();
    let name = vendor.clone();

    match tokio::spawn(async move { orchestrator.sync_one(&name).await }).await {
        Ok(Ok(result)) => {
            info!(vendor = %result.vendor_name, success = result.success, "Vendor sync finished");
            (StatusCode::OK, Json(result)).into_response()
        }
        Ok(Err(err)) => ApiError::from(err).into_response(),
        Err(e) => {
            error!(vendor = %vendor, error = %e, "Vendor sync fault escaped the orchestrator");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SyncResult::failure(vendor, format!("Unexpected fault: {}", e))),
            )
                .into_response()
        }
    }
}

/// `GET /api/vendor-sync/test-all`
pub async fn test_all(State(state): State<AppState>) -> Json<Value> {
    let statuses = state.orchestrator.test_all().await;
    let map: Map<String, Value> = statuses
        .into_iter()
        .map(|(vendor, connected)| (vendor, Value::Bool(connected)))
        .collect();
    Json(Value::Object(map))
}

/// `GET /api/vendor-sync/test/{vendor}`
pub async fn test_vendor(
    State(state): State<AppState>,
    Path(vendor): Path<String>,
) -> Result<Json<ConnectionTest>> {
    let test = state.orchestrator.test_one(&vendor).await?;
    Ok(Json(test))
}

/// `GET /api/vendor-sync/vendors`
pub async fn list_vendors(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.orchestrator.vendors())
}
