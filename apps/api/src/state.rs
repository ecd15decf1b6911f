use std::sync::Arc;

use crate::config::Config;
use crate::matching::catalog::JobSource;
use crate::matching::engine::MatchingEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Validated engine with the process-wide taxonomy. Read-only after startup.
    pub engine: Arc<MatchingEngine>,
    /// Pluggable job source. Default: InMemoryJobCatalog seeded from JOBS_FILE.
    pub jobs: Arc<dyn JobSource>,
}

#[cfg(test)]
pub fn test_state(jobs: Vec<crate::models::job::JobRecord>) -> AppState {
    use crate::matching::catalog::InMemoryJobCatalog;
    use crate::matching::config::MatchingConfig;
    use crate::matching::taxonomy::SkillTaxonomy;

    let taxonomy = Arc::new(SkillTaxonomy::builtin().unwrap());
    AppState {
        config: Config::default(),
        engine: Arc::new(MatchingEngine::new(MatchingConfig::default(), taxonomy).unwrap()),
        jobs: Arc::new(InMemoryJobCatalog::new(jobs)),
    }
}
