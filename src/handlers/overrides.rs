use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::RepairEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for recording a monthly repair
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RepairOverrideRequest {
    /// Repair amount; zero clears the entry
    pub amount: Decimal,
    /// Short description of the work
    #[serde(default)]
    pub note: String,
}

/// Request body for utility and mortgage overrides
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AmountOverrideRequest {
    /// Override amount for the month
    pub amount: Decimal,
}

fn negative_amount_response() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Override amounts cannot be negative".to_string(),
            code: "NEGATIVE_AMOUNT".to_string(),
            success: false,
        }),
    )
}

fn override_not_found(kind: &str, month: u32) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("No {} override recorded for month {}", kind, month),
            code: "OVERRIDE_NOT_FOUND".to_string(),
            success: false,
        }),
    )
}

/// Record a repair for a month
#[utoipa::path(
    put,
    path = "/api/v1/plan/overrides/repairs/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    request_body = RepairOverrideRequest,
    responses(
        (status = 200, description = "Repair override recorded", body = ApiResponse<RepairEntry>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn set_repair_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
    Json(request): Json<RepairOverrideRequest>,
) -> Result<Json<ApiResponse<RepairEntry>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering set_repair_override function for month: {}", month);

    if request.amount.is_sign_negative() {
        warn!("Rejected negative repair amount for month {}", month);
        return Err(negative_amount_response());
    }

    let cleared = request.amount.is_zero();
    let mut plan = state.plan.write().await;
    plan.set_repair(month, request.amount, request.note.clone());

    let message = if cleared {
        info!("Repair override cleared for month {}", month);
        "Repair override cleared".to_string()
    } else {
        info!("Repair override recorded for month {}", month);
        "Repair override recorded".to_string()
    };

    Ok(Json(ApiResponse {
        data: RepairEntry {
            amount: request.amount,
            note: request.note,
        },
        message,
        success: true,
    }))
}

/// Clear the repair recorded for a month
#[utoipa::path(
    delete,
    path = "/api/v1/plan/overrides/repairs/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    responses(
        (status = 200, description = "Repair override cleared", body = ApiResponse<String>),
        (status = 404, description = "No override for that month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn clear_repair_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering clear_repair_override function for month: {}", month);

    let mut plan = state.plan.write().await;
    if !plan.clear_repair(month) {
        return Err(override_not_found("repair", month));
    }

    info!("Repair override cleared for month {}", month);
    Ok(Json(ApiResponse {
        data: format!("Repair override for month {} cleared", month),
        message: "Repair override cleared".to_string(),
        success: true,
    }))
}

/// Override the utility charge for a month
#[utoipa::path(
    put,
    path = "/api/v1/plan/overrides/utilities/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    request_body = AmountOverrideRequest,
    responses(
        (status = 200, description = "Utility override recorded", body = ApiResponse<AmountOverrideRequest>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn set_utility_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
    Json(request): Json<AmountOverrideRequest>,
) -> Result<Json<ApiResponse<AmountOverrideRequest>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering set_utility_override function for month: {}", month);

    if request.amount.is_sign_negative() {
        warn!("Rejected negative utility override for month {}", month);
        return Err(negative_amount_response());
    }

    let mut plan = state.plan.write().await;
    plan.set_utility_override(month, request.amount);

    info!("Utility override recorded for month {}", month);
    Ok(Json(ApiResponse {
        data: request,
        message: "Utility override recorded".to_string(),
        success: true,
    }))
}

/// Clear the utility override for a month
#[utoipa::path(
    delete,
    path = "/api/v1/plan/overrides/utilities/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    responses(
        (status = 200, description = "Utility override cleared", body = ApiResponse<String>),
        (status = 404, description = "No override for that month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn clear_utility_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering clear_utility_override function for month: {}", month);

    let mut plan = state.plan.write().await;
    if !plan.clear_utility_override(month) {
        return Err(override_not_found("utility", month));
    }

    info!("Utility override cleared for month {}", month);
    Ok(Json(ApiResponse {
        data: format!("Utility override for month {} cleared", month),
        message: "Utility override cleared".to_string(),
        success: true,
    }))
}

/// Update the base mortgage from a month onward
///
/// The new amount is sticky: it stays in effect until the next override.
#[utoipa::path(
    put,
    path = "/api/v1/plan/overrides/mortgage/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    request_body = AmountOverrideRequest,
    responses(
        (status = 200, description = "Mortgage update recorded", body = ApiResponse<AmountOverrideRequest>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn set_mortgage_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
    Json(request): Json<AmountOverrideRequest>,
) -> Result<Json<ApiResponse<AmountOverrideRequest>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering set_mortgage_override function for month: {}", month);

    if request.amount.is_sign_negative() {
        warn!("Rejected negative mortgage update for month {}", month);
        return Err(negative_amount_response());
    }

    let mut plan = state.plan.write().await;
    plan.set_mortgage_update(month, request.amount);

    info!("Mortgage update recorded for month {}", month);
    Ok(Json(ApiResponse {
        data: request,
        message: "Mortgage update recorded".to_string(),
        success: true,
    }))
}

/// Clear the mortgage update for a month
#[utoipa::path(
    delete,
    path = "/api/v1/plan/overrides/mortgage/{month}",
    tag = "plan",
    params(
        ("month" = u32, Path, description = "Zero-based month index within the window"),
    ),
    responses(
        (status = 200, description = "Mortgage update cleared", body = ApiResponse<String>),
        (status = 404, description = "No override for that month", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn clear_mortgage_override(
    Path(month): Path<u32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering clear_mortgage_override function for month: {}", month);

    let mut plan = state.plan.write().await;
    if !plan.clear_mortgage_update(month) {
        return Err(override_not_found("mortgage", month));
    }

    info!("Mortgage update cleared for month {}", month);
    Ok(Json(ApiResponse {
        data: format!("Mortgage update for month {} cleared", month),
        message: "Mortgage update cleared".to_string(),
        success: true,
    }))
}
