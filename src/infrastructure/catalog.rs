// Bundled content - Dashboard catalog and marketing copy compiled into the binary
use crate::application::content_registry::ContentRegistry;
use crate::domain::dashboard::DashboardEntry;
use crate::domain::site::SiteContent;
use anyhow::{Context, Result};
use serde::Deserialize;

const DASHBOARDS_TOML: &str = include_str!("../../content/dashboards.toml");
const SITE_TOML: &str = include_str!("../../content/site.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    power_bi: Vec<DashboardEntry>,
    #[serde(default)]
    tableau: Vec<DashboardEntry>,
    #[serde(default)]
    practice: Vec<DashboardEntry>,
}

/// Power BI entries come first, then Tableau, then the practice tracks
pub fn parse_catalog(source: &str) -> Result<ContentRegistry> {
    let catalog: CatalogFile = toml::from_str(source).context("Failed to parse dashboard catalog")?;
    Ok(ContentRegistry::from_collections(vec![
        catalog.power_bi,
        catalog.tableau,
        catalog.practice,
    ]))
}

pub fn load_bundled_catalog() -> Result<ContentRegistry> {
    parse_catalog(DASHBOARDS_TOML)
}

pub fn load_site_content() -> Result<SiteContent> {
    toml::from_str(SITE_TOML).context("Failed to parse site content")
}
