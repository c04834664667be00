// Dashboard domain model
use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog key. The bundled catalog uses integers, but string ids are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DashboardId {
    Numeric(i64),
    Text(String),
}

impl DashboardId {
    /// Loose equivalence against a route parameter: either the stringified id
    /// equals the parameter, or the parameter parses to the numeric id.
    pub fn matches_param(&self, param: &str) -> bool {
        if self.to_string() == param {
            return true;
        }
        match self {
            DashboardId::Numeric(n) => param
                .parse::<f64>()
                .map(|parsed| parsed == *n as f64)
                .unwrap_or(false),
            DashboardId::Text(_) => false,
        }
    }
}

impl fmt::Display for DashboardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardId::Numeric(n) => write!(f, "{}", n),
            DashboardId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    PowerBi,
    Tableau,
    Excel,
    Sql,
    Python,
    Capstone,
    Other(String),
}

impl Category {
    /// Listing order for category sections
    pub const DISPLAY_ORDER: [Category; 6] = [
        Category::PowerBi,
        Category::Tableau,
        Category::Excel,
        Category::Sql,
        Category::Python,
        Category::Capstone,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::PowerBi => "Power BI",
            Category::Tableau => "Tableau",
            Category::Excel => "Excel",
            Category::Sql => "SQL",
            Category::Python => "Python",
            Category::Capstone => "Capstone",
            Category::Other(label) => label,
        }
    }

    /// Short badge shown on listing cards
    pub fn badge(&self) -> &str {
        match self {
            Category::PowerBi => "PBI",
            Category::Tableau => "TBL",
            Category::Excel => "XLS",
            Category::Sql => "SQL",
            Category::Python => "PY",
            Category::Capstone => "CP",
            Category::Other(_) => "",
        }
    }

    pub fn display_rank(&self) -> Option<usize> {
        Self::DISPLAY_ORDER.iter().position(|c| c == self)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Power BI" => Category::PowerBi,
            "Tableau" => Category::Tableau,
            "Excel" => Category::Excel,
            "SQL" => Category::Sql,
            "Python" => Category::Python,
            "Capstone" => Category::Capstone,
            _ => Category::Other(label),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.label().to_string()
    }
}

/// One externally hosted visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardEntry {
    pub id: DashboardId,
    pub title: String,
    pub category: Category,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
    #[serde(default)]
    pub is_tableau: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_video_id: Option<String>,
}

/// Watch and embed links for a dashboard's walkthrough video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialVideo {
    pub watch_url: String,
    pub embed_url: String,
}

impl DashboardEntry {
    /// Embed URL, treating an empty string as absent
    pub fn preview_url(&self) -> Option<&str> {
        self.embed_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Human readable `last_updated`, e.g. "November 10, 2023".
    /// Falls back to the raw value when it is not an ISO date.
    pub fn last_updated_display(&self) -> Option<String> {
        self.last_updated.as_ref().map(|raw| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|date| date.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|_| raw.clone())
        })
    }

    pub fn tutorial_video(&self) -> Option<TutorialVideo> {
        let id = self
            .youtube_video_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())?;
        let id = urlencoding::encode(id);
        Some(TutorialVideo {
            watch_url: format!("https://www.youtube.com/watch?v={}", id),
            embed_url: format!("https://www.youtube.com/embed/{}", id),
        })
    }
}

#[cfg(test)]
impl DashboardEntry {
    pub fn new(id: DashboardId, title: impl Into<String>, category: Category) -> Self {
        Self {
            id,
            title: title.into(),
            category,
            description: String::new(),
            detailed_description: None,
            tools: Vec::new(),
            image: None,
            embed_url: None,
            is_tableau: false,
            features: Vec::new(),
            data_source: None,
            last_updated: None,
            views: None,
            favorites: None,
            youtube_video_id: None,
        }
    }

    pub fn with_embed_url(mut self, url: impl Into<String>) -> Self {
        self.embed_url = Some(url.into());
        self
    }

    pub fn tableau(mut self) -> Self {
        self.is_tableau = true;
        self
    }

    pub fn with_youtube_video_id(mut self, id: impl Into<String>) -> Self {
        self.youtube_video_id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_matches_param() {
        let id = DashboardId::Numeric(24);
        assert!(id.matches_param("24"));
        assert!(id.matches_param("24.0"));
        assert!(!id.matches_param("24abc"));
        assert!(!id.matches_param("25"));
        assert!(!id.matches_param(""));
    }

    #[test]
    fn test_text_id_matches_param() {
        let id = DashboardId::Text("hr-analytics".to_string());
        assert!(id.matches_param("hr-analytics"));
        assert!(!id.matches_param("hr"));
    }

    #[test]
    fn test_category_round_trips_label() {
        assert_eq!(Category::from("Power BI".to_string()), Category::PowerBi);
        assert_eq!(String::from(Category::Tableau), "Tableau");
        assert_eq!(
            Category::from("Looker".to_string()),
            Category::Other("Looker".to_string())
        );
        assert_eq!(Category::Other("Looker".to_string()).display_rank(), None);
    }

    #[test]
    fn test_preview_url_ignores_blank() {
        let entry = DashboardEntry::new(DashboardId::Numeric(1), "x", Category::PowerBi)
            .with_embed_url("  ");
        assert_eq!(entry.preview_url(), None);
    }

    #[test]
    fn test_last_updated_display() {
        let mut entry = DashboardEntry::new(DashboardId::Numeric(1), "x", Category::Tableau);
        entry.last_updated = Some("2023-11-10".to_string());
        assert_eq!(entry.last_updated_display().as_deref(), Some("November 10, 2023"));

        entry.last_updated = Some("last week".to_string());
        assert_eq!(entry.last_updated_display().as_deref(), Some("last week"));
    }

    #[test]
    fn test_tutorial_video_links() {
        let entry = DashboardEntry::new(DashboardId::Numeric(24), "META", Category::PowerBi)
            .with_youtube_video_id("dQw4w9WgXcQ");
        assert_eq!(
            entry.tutorial_video(),
            Some(TutorialVideo {
                watch_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                embed_url: "https://www.youtube.com/embed/dQw4w9WgXcQ".to_string(),
            })
        );

        let blank = entry.clone().with_youtube_video_id(" ");
        assert_eq!(blank.tutorial_video(), None);
    }
}
