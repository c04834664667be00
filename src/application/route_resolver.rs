// Route resolver - Maps a detail route parameter to a catalog entry
use crate::application::content_registry::ContentRegistry;
use crate::domain::dashboard::DashboardEntry;

#[derive(Debug, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a DashboardEntry),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RouteResolver {
    registry: ContentRegistry,
}

impl RouteResolver {
    pub fn new(registry: ContentRegistry) -> Self {
        Self { registry }
    }

    /// A missing or empty parameter resolves like an unknown id
    pub fn resolve(&self, id_param: Option<&str>) -> Resolution<'_> {
        let Some(param) = id_param.filter(|p| !p.is_empty()) else {
            return Resolution::NotFound;
        };

        match self.registry.find(|entry| entry.id.matches_param(param)) {
            Some(entry) => Resolution::Found(entry),
            None => {
                tracing::debug!(id = param, "No dashboard for route parameter");
                Resolution::NotFound
            }
        }
    }
}
