use axum::{extract::State, http::StatusCode, response::Json};
use axum_valid::Valid;
use common::CashFlowTable;
use model::ForecastPlan;
use tracing::{debug, instrument, trace, warn};

use crate::helpers::converters::projection_to_table;
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

fn compute_table(plan: &ForecastPlan) -> Result<CashFlowTable, (StatusCode, Json<ErrorResponse>)> {
    match compute::project(plan) {
        Ok(projection) => Ok(projection_to_table(&projection)),
        Err(e) => {
            warn!("Projection failed: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: "INVALID_PLAN".to_string(),
                    success: false,
                }),
            ))
        }
    }
}

/// Get the cash-flow projection of the current plan
///
/// The projection is recomputed in full on every call; nothing is cached.
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<CashFlowTable>),
        (status = 422, description = "The stored plan cannot be projected", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_forecast(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CashFlowTable>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_forecast function");

    let plan = state.plan.read().await.clone();
    let table = compute_table(&plan)?;
    debug!(months = table.month_count(), "forecast computed");

    Ok(Json(ApiResponse {
        data: table,
        message: "Forecast computed successfully".to_string(),
        success: true,
    }))
}

/// Compute a projection for a posted snapshot without touching the stored plan
#[utoipa::path(
    post,
    path = "/api/v1/forecast",
    tag = "forecast",
    request_body = ForecastPlan,
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<CashFlowTable>),
        (status = 400, description = "Invalid plan values", body = ErrorResponse),
        (status = 422, description = "The posted plan cannot be projected", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn preview_forecast(
    Valid(Json(plan)): Valid<Json<ForecastPlan>>,
) -> Result<Json<ApiResponse<CashFlowTable>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering preview_forecast function");

    let table = compute_table(&plan)?;
    Ok(Json(ApiResponse {
        data: table,
        message: "Forecast computed successfully".to_string(),
        success: true,
    }))
}
