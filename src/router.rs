use crate::handlers::{
    forecast::{get_forecast, preview_forecast},
    health::health_check,
    overrides::{
        clear_mortgage_override, clear_repair_override, clear_utility_override,
        set_mortgage_override, set_repair_override, set_utility_override,
    },
    plan::{get_plan, update_plan},
    segments::{add_new_tenant, add_renewal, delete_segment, update_segment},
    session::{
        export_snapshot, import_snapshot, load_session, save_session, session_status,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Plan state
        .route("/api/v1/plan", get(get_plan))
        .route("/api/v1/plan", put(update_plan))
        // Lease segment mutations
        .route("/api/v1/plan/segments/renewal", post(add_renewal))
        .route("/api/v1/plan/segments/tenant", post(add_new_tenant))
        .route("/api/v1/plan/segments/:segment_id", put(update_segment))
        .route("/api/v1/plan/segments/:segment_id", delete(delete_segment))
        // Monthly overrides
        .route("/api/v1/plan/overrides/repairs/:month", put(set_repair_override))
        .route("/api/v1/plan/overrides/repairs/:month", delete(clear_repair_override))
        .route("/api/v1/plan/overrides/utilities/:month", put(set_utility_override))
        .route("/api/v1/plan/overrides/utilities/:month", delete(clear_utility_override))
        .route("/api/v1/plan/overrides/mortgage/:month", put(set_mortgage_override))
        .route("/api/v1/plan/overrides/mortgage/:month", delete(clear_mortgage_override))
        // Projection
        .route("/api/v1/forecast", get(get_forecast))
        .route("/api/v1/forecast", post(preview_forecast))
        // Session persistence
        .route("/api/v1/session", get(session_status))
        .route("/api/v1/session/save", post(save_session))
        .route("/api/v1/session/load", post(load_session))
        .route("/api/v1/session/export", get(export_snapshot))
        .route("/api/v1/session/import", post(import_snapshot))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
