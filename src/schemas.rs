use std::sync::Arc;

use common::{CashFlowTable, ExpenseLines, MonthlyCashFlow, OccupancyStatus, ProjectionTotals};
use model::{ForecastPlan, LeaseSegment, MoveOutDetails, RepairEntry, SegmentKind};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::{OpenApi, ToSchema};

use crate::storage::{SnapshotStore, StoreReceipt};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The live plan all mutations apply to
    pub plan: Arc<RwLock<ForecastPlan>>,
    /// Snapshot store backing the session save/load operations
    pub store: Arc<dyn SnapshotStore>,
    /// Local fallback written when a cloud save fails
    pub backup: Arc<crate::storage::LocalStore>,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Snapshot store backend and credential state
    pub store: String,
}

/// Session status response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SessionStatusResponse {
    /// Whether a bearer credential is configured for the store
    pub authenticated: bool,
    /// Store backend label ("drive", "local")
    pub store: String,
    /// The well-known snapshot filename
    pub snapshot_file: String,
}

/// Result of a snapshot save
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SaveReceiptResponse {
    /// File id (cloud) or path (local) the snapshot was written to
    pub location: String,
    /// Whether a new file was created rather than an existing one updated
    pub created: bool,
}

impl From<StoreReceipt> for SaveReceiptResponse {
    fn from(receipt: StoreReceipt) -> Self {
        Self {
            location: receipt.location,
            created: receipt.created,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::plan::get_plan,
        crate::handlers::plan::update_plan,
        crate::handlers::segments::add_renewal,
        crate::handlers::segments::add_new_tenant,
        crate::handlers::segments::update_segment,
        crate::handlers::segments::delete_segment,
        crate::handlers::overrides::set_repair_override,
        crate::handlers::overrides::clear_repair_override,
        crate::handlers::overrides::set_utility_override,
        crate::handlers::overrides::clear_utility_override,
        crate::handlers::overrides::set_mortgage_override,
        crate::handlers::overrides::clear_mortgage_override,
        crate::handlers::forecast::get_forecast,
        crate::handlers::forecast::preview_forecast,
        crate::handlers::session::session_status,
        crate::handlers::session::save_session,
        crate::handlers::session::load_session,
        crate::handlers::session::export_snapshot,
        crate::handlers::session::import_snapshot,
    ),
    components(
        schemas(
            ApiResponse<ForecastPlan>,
            ApiResponse<LeaseSegment>,
            ApiResponse<CashFlowTable>,
            ApiResponse<SessionStatusResponse>,
            ApiResponse<SaveReceiptResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            SessionStatusResponse,
            SaveReceiptResponse,
            ForecastPlan,
            LeaseSegment,
            SegmentKind,
            MoveOutDetails,
            RepairEntry,
            CashFlowTable,
            MonthlyCashFlow,
            ExpenseLines,
            OccupancyStatus,
            ProjectionTotals,
            crate::handlers::segments::UpdateSegmentRequest,
            crate::handlers::overrides::RepairOverrideRequest,
            crate::handlers::overrides::AmountOverrideRequest,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "plan", description = "Forecasting plan state and mutations"),
        (name = "forecast", description = "Cash-flow projection endpoints"),
        (name = "session", description = "Snapshot persistence endpoints"),
    ),
    info(
        title = "Rentcast API",
        description = "Rental Expense Forecaster API - month-by-month cash-flow projections for a rental property",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
