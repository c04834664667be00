// Application layer - Use cases and provider seams
pub mod content_registry;
pub mod embed_controller;
pub mod readiness_observer;
pub mod route_resolver;
pub mod script_loader;
pub mod viz_element;
