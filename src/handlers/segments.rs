use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use model::{ForecastPlan, LeaseSegment, MoveOutDetails, SegmentKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for updating a lease segment. Only provided fields change.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSegmentRequest {
    /// Segment kind ("new" or "renewal")
    #[serde(rename = "type")]
    pub kind: Option<SegmentKind>,
    /// 1-based start month relative to the analysis window
    #[validate(range(min = 1))]
    pub start_month: Option<u32>,
    /// Lease length in months
    #[validate(range(min = 1))]
    pub duration: Option<u32>,
    /// Whether the one-time marketing/photo fee applies
    pub marketing_fee: Option<bool>,
    /// Monthly rent
    pub rent: Option<Decimal>,
    /// Itemized turnover estimate; the segment's move-out total is recomputed
    /// from it
    pub move_out_details: Option<MoveOutDetails>,
}

/// Append a renewal segment continuing the last lease
#[utoipa::path(
    post,
    path = "/api/v1/plan/segments/renewal",
    tag = "plan",
    responses(
        (status = 201, description = "Renewal segment added", body = ApiResponse<ForecastPlan>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn add_renewal(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ForecastPlan>>) {
    trace!("Entering add_renewal function");

    let mut plan = state.plan.write().await;
    let id = plan.add_renewal();
    info!("Renewal segment {} added", id);

    (
        StatusCode::CREATED,
        Json(ApiResponse {
            data: plan.clone(),
            message: "Renewal segment added".to_string(),
            success: true,
        }),
    )
}

/// Append a new-tenant segment one month after the last lease ends
#[utoipa::path(
    post,
    path = "/api/v1/plan/segments/tenant",
    tag = "plan",
    responses(
        (status = 201, description = "New-tenant segment added", body = ApiResponse<ForecastPlan>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn add_new_tenant(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ForecastPlan>>) {
    trace!("Entering add_new_tenant function");

    let mut plan = state.plan.write().await;
    let id = plan.add_new_tenant();
    info!("New-tenant segment {} added", id);

    (
        StatusCode::CREATED,
        Json(ApiResponse {
            data: plan.clone(),
            message: "New-tenant segment added".to_string(),
            success: true,
        }),
    )
}

/// Update a lease segment
#[utoipa::path(
    put,
    path = "/api/v1/plan/segments/{segment_id}",
    tag = "plan",
    params(
        ("segment_id" = u64, Path, description = "Segment ID"),
    ),
    request_body = UpdateSegmentRequest,
    responses(
        (status = 200, description = "Segment updated successfully", body = ApiResponse<LeaseSegment>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Segment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_segment(
    Path(segment_id): Path<u64>,
    State(state): State<AppState>,
    Valid(Json(request)): Valid<Json<UpdateSegmentRequest>>,
) -> Result<Json<ApiResponse<LeaseSegment>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_segment function for segment_id: {}", segment_id);

    if request.rent.is_some_and(|r| r.is_sign_negative()) {
        warn!("Rejected negative rent for segment {}", segment_id);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Rent cannot be negative".to_string(),
                code: "NEGATIVE_AMOUNT".to_string(),
                success: false,
            }),
        ));
    }

    let mut plan = state.plan.write().await;
    let Some(segment) = plan.segment_mut(segment_id) else {
        warn!("Segment with ID {} not found for update", segment_id);
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Segment {} not found", segment_id),
                code: "SEGMENT_NOT_FOUND".to_string(),
                success: false,
            }),
        ));
    };

    let mut updated_fields = Vec::new();
    if let Some(kind) = request.kind {
        segment.kind = kind;
        updated_fields.push("type");
    }
    if let Some(start_month) = request.start_month {
        segment.start_month = start_month;
        updated_fields.push("startMonth");
    }
    if let Some(duration) = request.duration {
        segment.duration = duration;
        updated_fields.push("duration");
    }
    if let Some(marketing_fee) = request.marketing_fee {
        segment.marketing_fee = marketing_fee;
        updated_fields.push("marketingFee");
    }
    if let Some(rent) = request.rent {
        segment.rent = rent;
        updated_fields.push("rent");
    }
    if let Some(details) = request.move_out_details {
        segment.move_out_costs = details.total();
        segment.move_out_details = details;
        updated_fields.push("moveOutDetails");
    }

    debug!(
        "Updated segment {} fields: {}",
        segment_id,
        if updated_fields.is_empty() {
            "none".to_string()
        } else {
            updated_fields.join(", ")
        }
    );

    let updated = segment.clone();
    info!("Segment {} updated successfully", segment_id);
    Ok(Json(ApiResponse {
        data: updated,
        message: "Segment updated successfully".to_string(),
        success: true,
    }))
}

/// Remove a lease segment
#[utoipa::path(
    delete,
    path = "/api/v1/plan/segments/{segment_id}",
    tag = "plan",
    params(
        ("segment_id" = u64, Path, description = "Segment ID"),
    ),
    responses(
        (status = 200, description = "Segment removed successfully", body = ApiResponse<String>),
        (status = 404, description = "Segment not found", body = ErrorResponse),
        (status = 409, description = "The last segment cannot be removed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_segment(
    Path(segment_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_segment function for segment_id: {}", segment_id);

    let mut plan = state.plan.write().await;
    if plan.segment(segment_id).is_none() {
        warn!("Segment with ID {} not found for deletion", segment_id);
        return Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Segment {} not found", segment_id),
                code: "SEGMENT_NOT_FOUND".to_string(),
                success: false,
            }),
        ));
    }

    if !plan.remove_segment(segment_id) {
        warn!("Refused to remove the last remaining segment");
        return Err((
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "Cannot remove the last remaining lease segment".to_string(),
                code: "LAST_SEGMENT".to_string(),
                success: false,
            }),
        ));
    }

    info!("Segment {} removed successfully", segment_id);
    Ok(Json(ApiResponse {
        data: format!("Segment {} removed", segment_id),
        message: "Segment removed successfully".to_string(),
        success: true,
    }))
}
