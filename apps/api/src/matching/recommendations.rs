//! Recommendation Generator: fixed rules over gaps the factor scorers found.

use crate::matching::education::EducationScore;
use crate::matching::experience::ExperienceScore;
use crate::matching::location::LocationScore;
use crate::matching::skills::SkillScore;
use crate::models::job::JobRecord;

/// Inputs for one job's recommendations.
pub struct RecommendationInput<'a> {
    pub job: &'a JobRecord,
    pub skills: &'a SkillScore,
    pub experience: &'a ExperienceScore,
    pub education: &'a EducationScore,
    pub location: &'a LocationScore,
    pub max_skills: usize,
}

/// Builds the ordered recommendation list. A dimension that scored 1.0 never
/// produces a recommendation.
pub fn build_recommendations(input: &RecommendationInput<'_>) -> Vec<String> {
    let mut recommendations = Vec::new();

    if input.skills.score < 1.0 {
        if !input.skills.gaps.is_empty() {
            let top = top_n(&input.skills.gaps, input.max_skills);
            recommendations.push(format!(
                "Acquire or highlight these required skills: {top}."
            ));
        } else if !input.skills.missing_nice_to_have.is_empty() {
            let top = top_n(&input.skills.missing_nice_to_have, input.max_skills);
            recommendations.push(format!(
                "Optional skills that would strengthen your application: {top}."
            ));
        }
    }

    let experience = input.experience;
    if !experience.matched && experience.shortfall > 0 {
        let unit = if experience.shortfall == 1 {
            "year"
        } else {
            "years"
        };
        recommendations.push(format!(
            "Gain {} more {unit} of experience to meet the {} level requirement ({}+ years).",
            experience.shortfall,
            input.job.experience_level.as_str(),
            experience.required_years
        ));
    }

    if !input.education.matched {
        recommendations.push(format!(
            "This role asks for at least a {}; consider that credential or highlight equivalent experience.",
            input.education.required.credential()
        ));
    }

    if input.location.known && input.location.score == 0.0 {
        let place = input.job.location().unwrap_or("the job location");
        recommendations.push(format!(
            "Highlight your willingness to relocate to {place} or your availability for remote work."
        ));
    }

    recommendations
}

fn top_n(skills: &[String], n: usize) -> String {
    skills
        .iter()
        .take(n)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
