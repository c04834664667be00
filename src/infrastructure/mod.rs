// Infrastructure layer - External dependencies and adapters
pub mod catalog;
pub mod config;
pub mod provider_http;
pub mod templates;
