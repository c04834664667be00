// Application state for HTTP handlers
use crate::application::content_registry::ContentRegistry;
use crate::application::embed_controller::{EmbedController, EmbedTimings};
use crate::application::route_resolver::RouteResolver;
use crate::application::script_loader::SdkScriptService;
use crate::application::viz_element::VizElementFactory;
use crate::domain::site::SiteContent;
use crate::presentation::error::SiteError;
use axum::response::Html;
use chrono::Datelike;
use minijinja::Environment;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAV_LINKS: &[NavLink] = &[
    NavLink { name: "Home", href: "/" },
    NavLink { name: "About", href: "/about" },
    NavLink { name: "Services", href: "/services" },
    NavLink { name: "Dashboards", href: "/dashboards" },
    NavLink { name: "Contact", href: "/contact" },
];

pub struct AppState {
    pub registry: ContentRegistry,
    pub resolver: RouteResolver,
    pub site: SiteContent,
    pub templates: Environment<'static>,
    pub sdk: Arc<SdkScriptService>,
    pub viz_factory: Arc<dyn VizElementFactory>,
    pub timings: EmbedTimings,
}

impl AppState {
    pub fn new(
        registry: ContentRegistry,
        site: SiteContent,
        templates: Environment<'static>,
        sdk: Arc<SdkScriptService>,
        viz_factory: Arc<dyn VizElementFactory>,
        timings: EmbedTimings,
    ) -> Self {
        Self {
            resolver: RouteResolver::new(registry.clone()),
            registry,
            site,
            templates,
            sdk,
            viz_factory,
            timings,
        }
    }

    /// One controller per page view
    pub fn embed_controller(&self) -> EmbedController {
        EmbedController::new(self.sdk.clone(), self.viz_factory.clone(), self.timings)
    }

    /// Render a page with the shared layout context merged in
    pub fn render(&self, name: &str, path: &str, page: Value) -> Result<Html<String>, SiteError> {
        let mut context = serde_json::json!({
            "meta": &self.site.meta,
            "nav": NAV_LINKS,
            "contact": &self.site.contact,
            "path": path,
            "year": chrono::Utc::now().year(),
        });
        if let (Some(base), Value::Object(page)) = (context.as_object_mut(), page) {
            base.extend(page);
        }

        let html = self.templates.get_template(name)?.render(context)?;
        Ok(Html(html))
    }
}
