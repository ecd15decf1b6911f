use crate::matching::config::ExperienceThresholds;
use crate::models::job::ExperienceLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceScore {
    pub score: f64,
    pub matched: bool,
    pub required_years: u32,
    /// Years still missing to reach the threshold; 0 when met.
    pub shortfall: u32,
}

/// Linear falloff below the level's minimum years, capped at 1.0 above it.
pub fn score_experience(
    years: u32,
    level: ExperienceLevel,
    thresholds: &ExperienceThresholds,
) -> ExperienceScore {
    let required_years = thresholds.min_years(level);
    let matched = years >= required_years;

    let score = if required_years == 0 || matched {
        1.0
    } else {
        years as f64 / required_years as f64
    };

    ExperienceScore {
        score,
        matched,
        required_years,
        shortfall: required_years.saturating_sub(years),
    }
}
