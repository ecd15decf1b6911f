//! Axum route handlers for the Matching API.

use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::catalog::JobQuery;
use crate::matching::classifier::classify_job;
use crate::matching::engine::ALGORITHM_VERSION;
use crate::matching::taxonomy::TaxonomyEntry;
use crate::models::job::{JobRecord, RawJobPosting};
use crate::models::match_result::MatchResult;
use crate::models::profile::CandidateProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub profile: CandidateProfile,
    /// Inline jobs. When present, the catalog is not consulted.
    #[serde(default)]
    pub jobs: Option<Vec<JobRecord>>,
    #[serde(default)]
    pub job_ids: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub algorithm_version: String,
    pub jobs_considered: usize,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct ListJobsResponse {
    pub jobs: Vec<JobRecord>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: Vec<TaxonomyEntry>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Scores a candidate profile against inline jobs or a filtered slice of the
/// catalog and returns the ranked matches.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let limit = request.limit.unwrap_or(state.config.default_limit);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let jobs = match request.jobs {
        Some(jobs) => {
            ensure_unique_ids(&jobs)?;
            jobs
        }
        None => {
            let query = JobQuery {
                job_ids: request.job_ids,
                category: request.category,
                ..Default::default()
            };
            state.jobs.list_jobs(&query).await?
        }
    };

    let jobs_considered = jobs.len();
    let profile = request.profile;
    let engine = state.engine.clone();

    // Scoring is CPU-bound; keep it off the async workers
    let matches =
        tokio::task::spawn_blocking(move || engine.match_jobs(&profile, &jobs, Some(limit)))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Matching task failed: {e}")))?;

    info!(
        "Matched candidate against {} jobs, {} above threshold",
        jobs_considered,
        matches.len()
    );

    Ok(Json(MatchResponse {
        run_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        algorithm_version: ALGORITHM_VERSION.to_string(),
        jobs_considered,
        matches,
    }))
}

/// GET /api/v1/jobs
///
/// Pages through the catalog. `limit` defaults to the configured match limit.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<ListJobsQuery>,
) -> Result<Json<ListJobsResponse>, AppError> {
    let limit = params.limit.unwrap_or(state.config.default_limit);
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let query = JobQuery {
        job_ids: vec![],
        category: params.category,
        offset: params.offset,
        limit: Some(limit),
    };
    let jobs = state.jobs.list_jobs(&query).await?;
    let total_count = state.jobs.job_count().await;
    Ok(Json(ListJobsResponse {
        jobs,
        total_count,
        limit,
        offset: params.offset,
    }))
}

/// POST /api/v1/jobs/classify
///
/// Classifies a raw posting without storing it. Useful for previewing what the
/// engine will see.
pub async fn handle_classify_job(
    Json(posting): Json<RawJobPosting>,
) -> Result<Json<JobRecord>, AppError> {
    if posting.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    Ok(Json(classify_job(posting, 1)))
}

/// GET /api/v1/taxonomy
pub async fn handle_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        categories: state.engine.taxonomy().entries().to_vec(),
    })
}

fn ensure_unique_ids(jobs: &[JobRecord]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for job in jobs {
        if job.id.trim().is_empty() {
            return Err(AppError::Validation("job id cannot be empty".to_string()));
        }
        if !seen.insert(job.id.as_str()) {
            return Err(AppError::Validation(format!("duplicate job id '{}'", job.id)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unique_ids_accepted() {
        assert!(ensure_unique_ids(&[job("a"), job("b")]).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ensure_unique_ids(&[job("a"), job("a")]);
        assert!(matches!(result, Err(AppError::Validation(msg)) if msg.contains("'a'")));
    }

    #[test]
    fn test_blank_id_rejected() {
        assert!(ensure_unique_ids(&[job(" ")]).is_err());
    }

    #[test]
    fn test_match_request_minimal_body() {
        let request: MatchRequest = serde_json::from_str(r#"{"profile": {}}"#).unwrap();
        assert!(request.jobs.is_none());
        assert!(request.job_ids.is_empty());
        assert!(request.limit.is_none());
    }
}
