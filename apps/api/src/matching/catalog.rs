//! Job Catalog: read-only job pool the HTTP layer matches against.
//!
//! `JobSource` is the seam to the job-storage collaborator. The default backend is
//! `InMemoryJobCatalog`, seeded once at startup from a JSON file of raw postings.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::errors::{AppError, ConfigError};
use crate::matching::classifier::classify_jobs;
use crate::models::job::{JobRecord, RawJobPosting};

/// Filter for a catalog lookup.
#[derive(Debug, Clone, Default)]
pub struct JobQuery {
    /// When non-empty, exactly these jobs (all must exist), in catalog order.
    pub job_ids: Vec<String>,
    /// Case-insensitive substring of the job category.
    pub category: Option<String>,
    /// Matching jobs skipped before `limit` applies.
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Source of classified job records.
///
/// Carried in `AppState` as `Arc<dyn JobSource>`.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobRecord>, AppError>;

    async fn job_count(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct InMemoryJobCatalog {
    jobs: Vec<JobRecord>,
}

impl InMemoryJobCatalog {
    pub fn new(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// Loads and classifies a JSON array of raw postings.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let source_path = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: source_path.clone(),
            source,
        })?;
        let postings: Vec<RawJobPosting> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: source_path.clone(),
                source,
            })?;

        let jobs = classify_jobs(postings);
        info!("Loaded {} jobs from {}", jobs.len(), source_path);
        Ok(Self::new(jobs))
    }

    fn filter(&self, query: &JobQuery) -> Result<Vec<JobRecord>, AppError> {
        let selected: Vec<JobRecord> = if query.job_ids.is_empty() {
            let category = query
                .category
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty());

            self.jobs
                .iter()
                .filter(|job| match &category {
                    Some(wanted) => job
                        .category
                        .as_deref()
                        .is_some_and(|c| c.to_lowercase().contains(wanted.as_str())),
                    None => true,
                })
                .cloned()
                .collect()
        } else {
            if let Some(unknown) = query
                .job_ids
                .iter()
                .find(|id| !self.jobs.iter().any(|job| &job.id == *id))
            {
                return Err(AppError::NotFound(format!("Job {unknown} not found")));
            }
            self.jobs
                .iter()
                .filter(|job| query.job_ids.contains(&job.id))
                .cloned()
                .collect()
        };

        let page = selected
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();
        Ok(page)
    }
}

#[async_trait]
impl JobSource for InMemoryJobCatalog {
    async fn list_jobs(&self, query: &JobQuery) -> Result<Vec<JobRecord>, AppError> {
        self.filter(query)
    }

    async fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
