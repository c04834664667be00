// Marketing copy shown on the static pages
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteContent {
    pub meta: SiteMeta,
    pub hero: Hero,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub tools: Vec<Tool>,
    #[serde(default)]
    pub services: Vec<ServiceCard>,
    #[serde(default)]
    pub career_steps: Vec<CareerStep>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    pub about: About,
    #[serde(default)]
    pub offerings: Vec<ServiceCard>,
    #[serde(default)]
    pub contact: Vec<ContactDetail>,
    #[serde(default)]
    pub purchase_materials: Vec<PurchaseMaterial>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteMeta {
    pub name: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Hero {
    pub badge: String,
    pub headline: String,
    pub highlight: String,
    pub tagline: String,
    pub cta_label: String,
    pub cta_href: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CareerStep {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct About {
    pub heading: String,
    pub bio: String,
    pub quote: String,
    #[serde(default)]
    pub stats: Vec<Stat>,
    pub mission: String,
    #[serde(default)]
    pub approach: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactDetail {
    pub label: String,
    pub value: String,
}

/// Paid material package sold through the external store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PurchaseMaterial {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub price: Option<String>,
    pub image: String,
    pub link: String,
}
