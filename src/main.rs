//! Lintel - link-preview edge gateway for Praxis

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lintel::{
    config::Args,
    db::{
        schemas::{DownvoteDoc, DOWNVOTE_COLLECTION},
        MongoClient,
    },
    server,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("lintel={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Validate configuration
    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // Print startup banner
    info!("======================================");
    info!("  Lintel - link-preview edge gateway");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!("Mode: {}", if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" });
    info!("Upstream app: {}", args.upstream_url);
    info!("Concept API: {}", args.api_url);
    info!("OG images: {}", args.og_image_url);
    info!("HTML shell: {}", args.shell_path.display());
    info!("MongoDB: {}", args.mongodb_uri);
    info!("======================================");

    // Connect to MongoDB (optional in dev mode)
    let mongo = match MongoClient::new(&args.mongodb_uri, &args.mongodb_db).await {
        Ok(client) => {
            info!("MongoDB connected successfully");
            Some(client)
        }
        Err(e) => {
            if args.dev_mode {
                warn!("MongoDB connection failed (dev mode, continuing without): {}", e);
                None
            } else {
                error!("MongoDB connection failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Ensure the downvote collection indexes exist.
    // Writes to the collection are owned by the app data layer, not lintel.
    if let Some(ref mongo) = mongo {
        match mongo.collection::<DownvoteDoc>(DOWNVOTE_COLLECTION).await {
            Ok(_) => info!("Downvote collection initialized"),
            Err(e) => warn!("Downvote index initialization failed: {}", e),
        }
    }

    // Create application state
    let state = if let Some(mongo) = mongo {
        server::AppState::with_database(args, mongo)
    } else {
        server::AppState::new(args)
    };

    // Run the server
    if let Err(e) = server::run(Arc::new(state)).await {
        error!("Server error: {:?}", e);
        std::process::exit(1);
    }

    Ok(())
}
