//! Configuration for Lintel
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use uuid::Uuid;

/// Lintel - link-preview edge gateway
#[derive(Parser, Debug, Clone)]
#[command(name = "lintel")]
#[command(about = "Edge gateway that rewrites social link-preview metadata")]
pub struct Args {
    /// Unique node identifier for this gateway instance
    #[arg(long, env = "NODE_ID", default_value_t = Uuid::new_v4())]
    pub node_id: Uuid,

    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:8080")]
    pub listen: SocketAddr,

    /// Origin of the upstream app
    /// Every request lintel does not handle is forwarded here unchanged
    #[arg(long, env = "UPSTREAM_URL", default_value = "http://localhost:8081")]
    pub upstream_url: String,

    /// Base URL of the backend API serving concept metadata
    /// Lintel fetches {API_URL}/concept_data?id_or_slug={slug}
    #[arg(long, env = "API_URL", default_value = "http://localhost:8090/api")]
    pub api_url: String,

    /// Base URL of the OG-image rendering service
    /// Preview image URLs embed the username or slug under this base
    #[arg(long, env = "OG_IMAGE_URL", default_value = "http://localhost:8092/og")]
    pub og_image_url: String,

    /// Path to the pre-built HTML shell whose meta tags get rewritten
    #[arg(long, env = "SHELL_PATH", default_value = "assets/app_shell.html")]
    pub shell_path: PathBuf,

    /// MongoDB connection URI
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost:27017")]
    pub mongodb_uri: String,

    /// MongoDB database name
    #[arg(long, env = "MONGODB_DB", default_value = "praxis")]
    pub mongodb_db: String,

    /// Enable development mode (MongoDB connection becomes optional)
    #[arg(long, env = "DEV_MODE", default_value = "false", action = clap::ArgAction::Set)]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("UPSTREAM_URL", &self.upstream_url),
            ("API_URL", &self.api_url),
            ("OG_IMAGE_URL", &self.og_image_url),
        ] {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(format!("{} must be an http(s) URL, got '{}'", name, value));
            }
        }

        if self.shell_path.as_os_str().is_empty() {
            return Err("SHELL_PATH must not be empty".to_string());
        }

        Ok(())
    }
}
