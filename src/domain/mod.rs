// Domain layer - Plain data with no I/O
pub mod dashboard;
pub mod embed;
pub mod site;
