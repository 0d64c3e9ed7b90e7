//! Lintel - link-preview edge gateway for Praxis
//!
//! Lintel sits in front of the Praxis single-page app. It intercepts
//! user-profile and concept page requests, rewrites the Open Graph /
//! Twitter meta tags in the app's static HTML shell so social link
//! previews show per-page titles, descriptions, and images, and forwards
//! every other request to the upstream app untouched.
//!
//! ## Services
//!
//! - **Preview**: per-request meta-tag rewriting for `/users/*` and `/concepts/*`
//! - **Pass-through**: transparent forwarding to the upstream app
//! - **Data layer**: downvote record schema and MongoDB collection wrapper

pub mod config;
pub mod db;
pub mod preview;
pub mod routes;
pub mod server;
pub mod services;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{LintelError, Result};
