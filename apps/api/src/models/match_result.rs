use serde::{Deserialize, Serialize};

/// Downstream label for an overall score. Never feeds back into the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    High,
    Medium,
    Low,
}

/// Scored, explained match of one candidate against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub job_id: String,
    pub overall_score: f64,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub location_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Mandatory requirements the candidate does not satisfy.
    pub skill_gaps: Vec<String>,
    pub experience_match: bool,
    pub education_match: bool,
    pub recommendations: Vec<String>,
    pub confidence_score: f64,
    pub algorithm_version: String,
    pub band: MatchBand,
}
