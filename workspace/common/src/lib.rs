//! Common transport-layer types shared between the backend and API clients.
//! These structs mirror the backend handlers' response payloads so consumers
//! can deserialize API responses without duplicating shapes.

mod projection;

pub use projection::{
    CashFlowTable, ExpenseLines, MonthlyCashFlow, OccupancyStatus, ProjectionTotals,
};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
/// Note: The backend has its own definition in rentcast/src/schemas.rs with
/// the same field names. We mirror it here for clients to reuse.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
