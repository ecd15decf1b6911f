mod config;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::matching::catalog::InMemoryJobCatalog;
use crate::matching::engine::{MatchingEngine, ALGORITHM_VERSION};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on unparseable env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Matcher API v{} (algorithm {})",
        env!("CARGO_PKG_VERSION"),
        ALGORITHM_VERSION
    );

    // Skill taxonomy: file override or built-in table
    let taxonomy = match &config.taxonomy_file {
        Some(path) => SkillTaxonomy::from_json_file(path)
            .with_context(|| format!("Failed to load skill taxonomy from {}", path.display()))?,
        None => SkillTaxonomy::builtin().context("Built-in skill taxonomy is invalid")?,
    };
    info!("Skill taxonomy loaded ({} categories)", taxonomy.category_count());

    // Matching engine rejects bad weights and thresholds here, before serving
    let engine = MatchingEngine::new(config.matching.clone(), Arc::new(taxonomy))
        .context("Invalid matching configuration")?;
    let weights = &engine.config().weights;
    info!(
        "Scoring weights: skill={} experience={} education={} location={}",
        weights.skill, weights.experience, weights.education, weights.location
    );

    // Job catalog: seeded from JOBS_FILE, otherwise empty (inline jobs still work)
    let catalog = match &config.jobs_file {
        Some(path) => InMemoryJobCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load job catalog from {}", path.display()))?,
        None => {
            info!("JOBS_FILE not set, starting with an empty job catalog");
            InMemoryJobCatalog::new(vec![])
        }
    };

    // Build app state
    let state = AppState {
        config: config.clone(),
        engine: Arc::new(engine),
        jobs: Arc::new(catalog),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
