//! HTTP routes for Lintel

pub mod health;
pub mod passthrough;
pub mod preview;

pub use health::{health_check, readiness_check, version_info};
pub use passthrough::forward_to_upstream;
pub use preview::handle_preview_request;
