// HTTP request handlers
use crate::application::route_resolver::Resolution;
use crate::domain::dashboard::DashboardEntry;
use crate::presentation::app_state::AppState;
use crate::presentation::error::SiteError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

const FEATURED_COUNT: usize = 3;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, SiteError> {
    let featured: Vec<&DashboardEntry> = state
        .registry
        .get_all()
        .iter()
        .filter(|e| e.preview_url().is_some())
        .take(FEATURED_COUNT)
        .collect();

    let site = &state.site;
    state.render(
        "home.html",
        "/",
        json!({
            "hero": &site.hero,
            "stats": &site.stats,
            "tools": &site.tools,
            "services": &site.services,
            "career_steps": &site.career_steps,
            "testimonials": &site.testimonials,
            "purchase_materials": &site.purchase_materials,
            "featured": featured,
        }),
    )
}

pub async fn about(State(state): State<Arc<AppState>>) -> Result<Html<String>, SiteError> {
    state.render("about.html", "/about", json!({ "about": &state.site.about }))
}

pub async fn services(State(state): State<Arc<AppState>>) -> Result<Html<String>, SiteError> {
    state.render(
        "services.html",
        "/services",
        json!({ "offerings": &state.site.offerings }),
    )
}

pub async fn contact(State(state): State<Arc<AppState>>) -> Result<Html<String>, SiteError> {
    state.render("contact.html", "/contact", json!({}))
}

pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, SiteError> {
    let groups = state.registry.by_category();
    state.render("dashboards.html", "/dashboards", json!({ "groups": groups }))
}

/// Dashboard detail with a live preview; unknown ids go back to the listing
pub async fn dashboard_detail(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, SiteError> {
    let entry = match state.resolver.resolve(Some(&id)) {
        Resolution::Found(entry) => entry.clone(),
        Resolution::NotFound => {
            tracing::info!(id = %id, "Unknown dashboard, redirecting to listing");
            return Ok(Redirect::to("/dashboards").into_response());
        }
    };

    // Dropped with this future, which also cancels its timers
    let controller = state.embed_controller();
    controller.mount(entry.clone());
    let status = controller.settled().await;
    let host = controller.host().node();

    let path = format!("/dashboards/{}", entry.id);
    let page = state.render(
        "dashboard_detail.html",
        &path,
        json!({
            "entry": &entry,
            "status": status.label(),
            "host": host,
            "sdk_script_url": state.sdk.script_url(),
            "last_updated": entry.last_updated_display(),
            "tutorial": entry.tutorial_video(),
        }),
    )?;
    Ok(page.into_response())
}

pub async fn dashboard_detail_missing() -> Redirect {
    Redirect::to("/dashboards")
}

/// Singular path used by earlier revisions of the site
pub async fn legacy_dashboard(Path(id): Path<String>) -> Redirect {
    Redirect::permanent(&format!("/dashboards/{}", urlencoding::encode(&id)))
}

pub async fn api_list_dashboards(State(state): State<Arc<AppState>>) -> Json<Vec<DashboardEntry>> {
    Json(state.registry.get_all().to_vec())
}

pub async fn api_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.resolver.resolve(Some(&id)) {
        Resolution::Found(entry) => Json(entry.clone()).into_response(),
        Resolution::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "dashboard not found" })),
        )
            .into_response(),
    }
}

pub async fn redirect_home() -> Redirect {
    Redirect::to("/")
}
