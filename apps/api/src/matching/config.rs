use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::models::job::ExperienceLevel;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Factor weights. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.4,
            experience: 0.3,
            education: 0.2,
            location: 0.1,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.education + self.location
    }
}

/// Score bands. Results under `min_match_score` are dropped from output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub min_match_score: f64,
    pub medium_match_threshold: f64,
    pub high_match_threshold: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            min_match_score: 0.3,
            medium_match_threshold: 0.6,
            high_match_threshold: 0.8,
        }
    }
}

/// Minimum years of experience implied by each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceThresholds {
    pub junior: u32,
    pub mid: u32,
    pub senior: u32,
}

impl Default for ExperienceThresholds {
    fn default() -> Self {
        Self {
            junior: 0,
            mid: 3,
            senior: 6,
        }
    }
}

impl ExperienceThresholds {
    pub fn min_years(&self, level: ExperienceLevel) -> u32 {
        match level {
            ExperienceLevel::Junior => self.junior,
            ExperienceLevel::Mid => self.mid,
            ExperienceLevel::Senior => self.senior,
        }
    }
}

/// Every tunable of the matching engine. Passed explicitly to the engine; never
/// read from ambient state during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: ScoringWeights,
    pub thresholds: ScoreThresholds,
    pub experience: ExperienceThresholds,
    /// Subtracted from the education score per ordinal step below the requirement.
    pub education_step_penalty: f64,
    /// Subtracted from confidence per missing piece of evidence.
    pub confidence_penalty: f64,
    /// How many skills a single recommendation lists.
    pub max_skill_recommendations: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: ScoreThresholds::default(),
            experience: ExperienceThresholds::default(),
            education_step_penalty: 0.3,
            confidence_penalty: 0.2,
            max_skill_recommendations: 3,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        for (name, value) in [
            ("weights.skill", w.skill),
            ("weights.experience", w.experience),
            ("weights.education", w.education),
            ("weights.location", w.location),
        ] {
            check_unit(name, value)?;
        }
        let sum = w.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum { sum });
        }

        let t = &self.thresholds;
        check_unit("thresholds.min_match_score", t.min_match_score)?;
        check_unit("thresholds.medium_match_threshold", t.medium_match_threshold)?;
        check_unit("thresholds.high_match_threshold", t.high_match_threshold)?;
        if !(t.min_match_score <= t.medium_match_threshold
            && t.medium_match_threshold <= t.high_match_threshold)
        {
            return Err(ConfigError::ThresholdOrder {
                min: t.min_match_score,
                medium: t.medium_match_threshold,
                high: t.high_match_threshold,
            });
        }

        let e = &self.experience;
        if !(e.junior <= e.mid && e.mid <= e.senior) {
            return Err(ConfigError::ExperienceOrder);
        }

        check_unit("education_step_penalty", self.education_step_penalty)?;
        check_unit("confidence_penalty", self.confidence_penalty)?;

        if self.max_skill_recommendations == 0 {
            return Err(ConfigError::NoSkillRecommendations);
        }
        Ok(())
    }
}

fn check_unit(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::OutOfRange { name, value });
    }
    Ok(())
}
