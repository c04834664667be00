// Embed domain model - strategies, statuses and failures of a preview
use super::dashboard::{Category, DashboardEntry};
use serde::Serialize;
use thiserror::Error;

/// Where the SDK element draws its toolbar; the site only uses the bottom bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarPosition {
    Bottom,
}

/// Options handed to the SDK when constructing a visualization element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VizOptions {
    pub src: String,
    pub hide_tabs: bool,
    pub toolbar: ToolbarPosition,
}

impl VizOptions {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            hide_tabs: true,
            toolbar: ToolbarPosition::Bottom,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedStrategy {
    /// Pass the URL through unmodified as an iframe `src`
    Iframe { src: String },
    /// Load the provider SDK, then build its custom element
    SdkElement { options: VizOptions },
    NoPreview,
}

impl EmbedStrategy {
    pub fn for_entry(entry: &DashboardEntry) -> Self {
        match entry.preview_url() {
            None => EmbedStrategy::NoPreview,
            Some(url) if entry.is_tableau || entry.category == Category::Tableau => {
                EmbedStrategy::SdkElement {
                    options: VizOptions::new(url),
                }
            }
            Some(url) => EmbedStrategy::Iframe {
                src: url.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmbedErrorKind {
    ScriptLoad,
    Construction,
    Timeout,
}

/// A failed preview: every kind renders the same fallback panel
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct EmbedError {
    pub kind: EmbedErrorKind,
    pub message: String,
    pub fallback_url: Option<String>,
}

impl EmbedError {
    pub fn script_load(detail: impl std::fmt::Display, fallback_url: Option<String>) -> Self {
        Self {
            kind: EmbedErrorKind::ScriptLoad,
            message: format!("The visualization library could not be loaded ({}).", detail),
            fallback_url,
        }
    }

    pub fn construction(detail: impl std::fmt::Display, fallback_url: Option<String>) -> Self {
        Self {
            kind: EmbedErrorKind::Construction,
            message: format!("The visualization could not be displayed ({}).", detail),
            fallback_url,
        }
    }

    pub fn timeout(fallback_url: Option<String>) -> Self {
        Self {
            kind: EmbedErrorKind::Timeout,
            message: "The visualization is taking too long to load.".to_string(),
            fallback_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedStatus {
    Initial,
    Loading,
    Ready,
    Failed(EmbedError),
    /// Entry has no embed URL; not an error
    Unavailable,
}

impl EmbedStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EmbedStatus::Ready | EmbedStatus::Failed(_) | EmbedStatus::Unavailable
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmbedStatus::Initial => "initial",
            EmbedStatus::Loading => "loading",
            EmbedStatus::Ready => "ready",
            EmbedStatus::Failed(_) => "failed",
            EmbedStatus::Unavailable => "unavailable",
        }
    }
}

/// What the host container currently displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostNode {
    Iframe { src: String },
    VizElement { options: VizOptions },
    Fallback { message: String, link: Option<String> },
    Placeholder,
}
