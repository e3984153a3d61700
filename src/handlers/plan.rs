use axum::{extract::State, response::Json};
use axum_valid::Valid;
use model::ForecastPlan;
use tracing::{debug, info, instrument, trace};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Get the current forecasting plan
#[utoipa::path(
    get,
    path = "/api/v1/plan",
    tag = "plan",
    responses(
        (status = 200, description = "Plan retrieved successfully", body = ApiResponse<ForecastPlan>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_plan(State(state): State<AppState>) -> Json<ApiResponse<ForecastPlan>> {
    trace!("Entering get_plan function");
    let plan = state.plan.read().await.clone();

    Json(ApiResponse {
        data: plan,
        message: "Plan retrieved successfully".to_string(),
        success: true,
    })
}

/// Replace the current plan with the provided snapshot
#[utoipa::path(
    put,
    path = "/api/v1/plan",
    tag = "plan",
    request_body = ForecastPlan,
    responses(
        (status = 200, description = "Plan replaced successfully", body = ApiResponse<ForecastPlan>),
        (status = 400, description = "Invalid plan values", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_plan(
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<ForecastPlan>>,
) -> Json<ApiResponse<ForecastPlan>> {
    trace!("Entering update_plan function");
    debug!(
        forecast_years = request.forecast_years,
        segments = request.lease_segments.len(),
        "replacing plan"
    );

    let mut plan = state.plan.write().await;
    *plan = request;

    info!("Plan replaced successfully");
    Json(ApiResponse {
        data: plan.clone(),
        message: "Plan replaced successfully".to_string(),
        success: true,
    })
}
