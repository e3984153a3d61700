use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use model::ForecastPlan;
use tracing::{error, info, instrument, trace, warn};
use validator::Validate;

use crate::schemas::{
    ApiResponse, AppState, ErrorResponse, SaveReceiptResponse, SessionStatusResponse,
};
use crate::storage::{SnapshotStore, StorageError, SNAPSHOT_FILE_NAME};

fn storage_error_response(e: &StorageError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match e {
        StorageError::NotAuthenticated => (StatusCode::UNAUTHORIZED, "NOT_AUTHENTICATED"),
        StorageError::NotFound(_) => (StatusCode::NOT_FOUND, "SNAPSHOT_NOT_FOUND"),
        StorageError::InvalidSnapshot(_) => (StatusCode::BAD_GATEWAY, "INVALID_SNAPSHOT"),
        StorageError::Http(_) => (StatusCode::BAD_GATEWAY, "STORE_UNAVAILABLE"),
        StorageError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_IO_ERROR"),
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Get the session status
#[utoipa::path(
    get,
    path = "/api/v1/session",
    tag = "session",
    responses(
        (status = 200, description = "Session status retrieved", body = ApiResponse<SessionStatusResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn session_status(
    State(state): State<AppState>,
) -> Json<ApiResponse<SessionStatusResponse>> {
    trace!("Entering session_status function");

    Json(ApiResponse {
        data: SessionStatusResponse {
            authenticated: state.store.authenticated(),
            store: state.store.kind().to_string(),
            snapshot_file: SNAPSHOT_FILE_NAME.to_string(),
        },
        message: "Session status retrieved".to_string(),
        success: true,
    })
}

/// Save the current plan to the snapshot store
///
/// When the cloud save fails, a local backup is written and its path is
/// reported in the error message.
#[utoipa::path(
    post,
    path = "/api/v1/session/save",
    tag = "session",
    responses(
        (status = 200, description = "Snapshot saved", body = ApiResponse<SaveReceiptResponse>),
        (status = 401, description = "No bearer credential configured", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn save_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SaveReceiptResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering save_session function");

    let plan = state.plan.read().await.clone();
    match state.store.save(&plan).await {
        Ok(receipt) => {
            info!("Snapshot saved to {} store", state.store.kind());
            let message = if receipt.created {
                "New snapshot file created in store".to_string()
            } else {
                "Snapshot saved to store".to_string()
            };
            Ok(Json(ApiResponse {
                data: SaveReceiptResponse::from(receipt),
                message,
                success: true,
            }))
        }
        Err(e @ StorageError::NotAuthenticated) => {
            warn!("Snapshot save attempted without a credential");
            Err(storage_error_response(&e))
        }
        Err(e) => {
            error!("Failed to save snapshot to {} store: {}", state.store.kind(), e);
            // Offer the same way out the browser did: a local copy.
            let detail = match state.backup.save(&plan).await {
                Ok(receipt) => {
                    warn!("Local backup written to {}", receipt.location);
                    format!("{}; local backup written to {}", e, receipt.location)
                }
                Err(backup_err) => {
                    error!("Local backup also failed: {}", backup_err);
                    format!("{}; local backup also failed: {}", e, backup_err)
                }
            };
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: format!("Failed to save snapshot: {}", detail),
                    code: "STORE_SAVE_FAILED".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Load the stored snapshot, replacing the current plan
#[utoipa::path(
    post,
    path = "/api/v1/session/load",
    tag = "session",
    responses(
        (status = 200, description = "Snapshot loaded", body = ApiResponse<ForecastPlan>),
        (status = 401, description = "No bearer credential configured", body = ErrorResponse),
        (status = 404, description = "No snapshot in the store", body = ErrorResponse),
        (status = 502, description = "Store unavailable", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn load_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastPlan>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering load_session function");

    match state.store.load().await {
        Ok(loaded) => {
            *state.plan.write().await = loaded.clone();
            info!("Snapshot loaded from {} store", state.store.kind());
            Ok(Json(ApiResponse {
                data: loaded,
                message: "Snapshot loaded from store".to_string(),
                success: true,
            }))
        }
        Err(e) => {
            warn!("Failed to load snapshot from {} store: {}", state.store.kind(), e);
            Err(storage_error_response(&e))
        }
    }
}

/// Export the current plan as a raw snapshot file
#[utoipa::path(
    get,
    path = "/api/v1/session/export",
    tag = "session",
    responses(
        (status = 200, description = "Raw snapshot JSON", body = ForecastPlan),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn export_snapshot(State(state): State<AppState>) -> Json<ForecastPlan> {
    trace!("Entering export_snapshot function");
    Json(state.plan.read().await.clone())
}

/// Import a raw snapshot file, replacing the current plan
///
/// Malformed JSON is rejected wholesale; the stored plan is untouched unless
/// the whole snapshot parses and validates.
#[utoipa::path(
    post,
    path = "/api/v1/session/import",
    tag = "session",
    request_body = ForecastPlan,
    responses(
        (status = 200, description = "Snapshot imported", body = ApiResponse<ForecastPlan>),
        (status = 400, description = "Invalid snapshot file", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(body))]
pub async fn import_snapshot(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<ForecastPlan>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering import_snapshot function");

    let plan: ForecastPlan = match serde_json::from_slice(&body) {
        Ok(plan) => plan,
        Err(e) => {
            warn!("Rejected snapshot import: {}", e);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid snapshot file".to_string(),
                    code: "INVALID_SNAPSHOT".to_string(),
                    success: false,
                }),
            ));
        }
    };

    if let Err(e) = plan.validate() {
        warn!("Rejected snapshot import with invalid values: {}", e);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid plan values: {}", e),
                code: "INVALID_PLAN".to_string(),
                success: false,
            }),
        ));
    }

    *state.plan.write().await = plan.clone();
    info!("Snapshot imported successfully");
    Ok(Json(ApiResponse {
        data: plan,
        message: "Snapshot imported successfully".to_string(),
        success: true,
    }))
}
