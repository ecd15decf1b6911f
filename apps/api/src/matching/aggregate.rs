//! Score Aggregator: weighted overall score, evidence-based confidence, banding.

use crate::matching::config::{ScoreThresholds, ScoringWeights};
use crate::models::match_result::MatchBand;

/// Per-factor scores of one (candidate, job) pair, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
}

/// Which inputs were available to back a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evidence {
    pub candidate_skills: bool,
    pub candidate_years: bool,
    pub candidate_education: bool,
    /// Location was either irrelevant (remote job) or known on both sides.
    pub location: bool,
    pub job_requirements: bool,
}

impl Evidence {
    pub fn missing_count(&self) -> usize {
        [
            self.candidate_skills,
            self.candidate_years,
            self.candidate_education,
            self.location,
            self.job_requirements,
        ]
        .iter()
        .filter(|present| !**present)
        .count()
    }
}

/// Weighted sum of the factor scores, clamped to [0, 1].
pub fn compute_overall_score(factors: &FactorScores, weights: &ScoringWeights) -> f64 {
    (weights.skill * factors.skill
        + weights.experience * factors.experience
        + weights.education * factors.education
        + weights.location * factors.location)
        .clamp(0.0, 1.0)
}

/// 1.0 minus `penalty` per missing piece of evidence, floored at 0.
pub fn compute_confidence(evidence: &Evidence, penalty: f64) -> f64 {
    (1.0 - penalty * evidence.missing_count() as f64).clamp(0.0, 1.0)
}

/// Band for a score, or `None` when it falls under the minimum and must be dropped.
pub fn classify(score: f64, thresholds: &ScoreThresholds) -> Option<MatchBand> {
    if score < thresholds.min_match_score {
        None
    } else if score >= thresholds.high_match_threshold {
        Some(MatchBand::High)
    } else if score >= thresholds.medium_match_threshold {
        Some(MatchBand::Medium)
    } else {
        Some(MatchBand::Low)
    }
}
