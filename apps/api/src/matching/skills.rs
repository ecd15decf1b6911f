//! Skill Scorer: weighted requirement coverage with taxonomy expansion.
//!
//! Algorithm:
//! 1. Normalize every candidate skill once (raw + canonical identity).
//! 2. Walk mandatory requirements, then nice-to-have ones; each is satisfied when
//!    any candidate skill matches it under `NormalizedSkill::matches`.
//! 3. score = Σ matched weight / Σ total weight, mandatory = 1.0, nice-to-have = 0.5.
//!
//! A job without requirements scores 1.0: an unconstrained job cannot penalize.

use std::collections::HashSet;

use crate::matching::taxonomy::{NormalizedSkill, SkillTaxonomy};

pub const MANDATORY_WEIGHT: f64 = 1.0;
pub const NICE_TO_HAVE_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct SkillScore {
    pub score: f64,
    /// Satisfied requirement strings, in requirement-list order, deduplicated.
    pub matched: Vec<String>,
    /// All unsatisfied requirements, mandatory first.
    pub missing: Vec<String>,
    /// Unsatisfied mandatory requirements.
    pub gaps: Vec<String>,
    /// Unsatisfied nice-to-have requirements.
    pub missing_nice_to_have: Vec<String>,
}

pub fn score_skills(
    taxonomy: &SkillTaxonomy,
    candidate_skills: &[String],
    requirements: &[String],
    nice_to_have: &[String],
) -> SkillScore {
    let candidate: Vec<NormalizedSkill> = candidate_skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| taxonomy.normalize_skill(s))
        .collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut total_weight = 0.0_f64;
    let mut matched_weight = 0.0_f64;

    let mut matched = Vec::new();
    let mut gaps = Vec::new();
    let mut missing_nice_to_have = Vec::new();

    let tagged = requirements
        .iter()
        .map(|r| (r, true))
        .chain(nice_to_have.iter().map(|r| (r, false)));

    for (requirement, mandatory) in tagged {
        let trimmed = requirement.trim();
        if trimmed.is_empty() {
            continue;
        }
        // A skill listed twice (or in both lists) counts once, at its first position
        if !seen.insert(trimmed.to_lowercase()) {
            continue;
        }

        let weight = if mandatory {
            MANDATORY_WEIGHT
        } else {
            NICE_TO_HAVE_WEIGHT
        };
        total_weight += weight;

        let required = taxonomy.normalize_skill(trimmed);
        if candidate.iter().any(|c| c.matches(&required)) {
            matched_weight += weight;
            matched.push(trimmed.to_string());
        } else if mandatory {
            gaps.push(trimmed.to_string());
        } else {
            missing_nice_to_have.push(trimmed.to_string());
        }
    }

    if total_weight == 0.0 {
        return SkillScore {
            score: 1.0,
            matched: vec![],
            missing: vec![],
            gaps: vec![],
            missing_nice_to_have: vec![],
        };
    }

    let missing = gaps
        .iter()
        .chain(missing_nice_to_have.iter())
        .cloned()
        .collect();

    SkillScore {
        score: (matched_weight / total_weight).clamp(0.0, 1.0),
        matched,
        missing,
        gaps,
        missing_nice_to_have,
    }
}
