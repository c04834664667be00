// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    about, api_dashboard, api_list_dashboards, contact, dashboard_detail,
    dashboard_detail_missing, health_check, home, legacy_dashboard, list_dashboards,
    redirect_home, services,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/services", get(services))
        .route("/contact", get(contact))
        .route("/dashboards", get(list_dashboards))
        .route("/dashboards/", get(dashboard_detail_missing))
        .route("/dashboards/:id", get(dashboard_detail))
        .route("/dashboard/:id", get(legacy_dashboard))
        .route("/api/dashboards", get(api_list_dashboards))
        .route("/api/dashboards/:id", get(api_dashboard))
        .route("/healthz", get(health_check))
        .fallback(redirect_home)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
