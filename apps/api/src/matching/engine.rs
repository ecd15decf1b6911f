//! Matching Engine: scores one candidate against many jobs and ranks the results.
//!
//! Pure computation: no I/O, no clocks, no randomness. Jobs are scored in parallel
//! with rayon; the final sort alone decides the output order, so the result is the
//! same regardless of how the work was scheduled.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use crate::errors::ConfigError;
use crate::matching::aggregate::{
    classify, compute_confidence, compute_overall_score, Evidence, FactorScores,
};
use crate::matching::config::MatchingConfig;
use crate::matching::education::score_education;
use crate::matching::experience::score_experience;
use crate::matching::location::score_location;
use crate::matching::recommendations::{build_recommendations, RecommendationInput};
use crate::matching::skills::score_skills;
use crate::matching::taxonomy::SkillTaxonomy;
use crate::models::job::JobRecord;
use crate::models::match_result::{MatchBand, MatchResult};
use crate::models::profile::CandidateProfile;

/// Identifies the scoring logic. Bump whenever weights or scoring semantics change.
pub const ALGORITHM_VERSION: &str = "2.1.0";

/// Holds a validated config and a shared taxonomy. Cheap to clone; safe to share.
#[derive(Debug, Clone)]
pub struct MatchingEngine {
    config: MatchingConfig,
    taxonomy: Arc<SkillTaxonomy>,
}

impl MatchingEngine {
    pub fn new(config: MatchingConfig, taxonomy: Arc<SkillTaxonomy>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, taxonomy })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Scores one job. `None` when the overall score falls under the minimum, so a
    /// result that must not reach output is never handed out.
    pub fn score_job(&self, profile: &CandidateProfile, job: &JobRecord) -> Option<MatchResult> {
        match self.evaluate(profile, job) {
            (result, Some(_)) => Some(result),
            (_, None) => None,
        }
    }

    /// Full evaluation of one pair. The result's `band` is only meaningful when the
    /// returned band is `Some`.
    fn evaluate(
        &self,
        profile: &CandidateProfile,
        job: &JobRecord,
    ) -> (MatchResult, Option<MatchBand>) {
        let config = &self.config;

        let skills = score_skills(
            &self.taxonomy,
            &profile.skills,
            &job.requirements,
            &job.nice_to_have,
        );
        let experience = score_experience(profile.years(), job.experience_level, &config.experience);
        let education = score_education(
            profile.education(),
            job.education_required,
            config.education_step_penalty,
        );
        let location = score_location(profile.location(), job.location(), job.remote);

        let factors = FactorScores {
            skill: skills.score,
            experience: experience.score,
            education: education.score,
            location: location.score,
        };
        let overall_score = compute_overall_score(&factors, &config.weights);

        let evidence = Evidence {
            candidate_skills: profile.has_skills(),
            candidate_years: profile.experience_years.is_some(),
            candidate_education: profile.education_level.is_some(),
            location: location.known,
            job_requirements: job.has_requirements(),
        };
        let confidence_score = compute_confidence(&evidence, config.confidence_penalty);

        let recommendations = build_recommendations(&RecommendationInput {
            job,
            skills: &skills,
            experience: &experience,
            education: &education,
            location: &location,
            max_skills: config.max_skill_recommendations,
        });

        let band = classify(overall_score, &config.thresholds);

        let result = MatchResult {
            job_id: job.id.clone(),
            overall_score,
            skills_score: skills.score,
            experience_score: experience.score,
            education_score: education.score,
            location_score: location.score,
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            skill_gaps: skills.gaps,
            experience_match: experience.matched,
            education_match: education.matched,
            recommendations,
            confidence_score,
            algorithm_version: ALGORITHM_VERSION.to_string(),
            band: band.unwrap_or(MatchBand::Low),
        };

        (result, band)
    }

    /// Matches a candidate against a job set: score, drop below-minimum results,
    /// rank, truncate to `limit` (`None` keeps everything). An empty job list
    /// yields an empty result.
    pub fn match_jobs(
        &self,
        profile: &CandidateProfile,
        jobs: &[JobRecord],
        limit: Option<usize>,
    ) -> Vec<MatchResult> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let kept: Vec<MatchResult> = jobs
            .par_iter()
            .filter_map(|job| self.score_job(profile, job))
            .collect();

        debug!(
            jobs = jobs.len(),
            kept = kept.len(),
            "Scored candidate against job set"
        );

        // Band filtering already happened; rank_results re-checks the same minimum
        rank_results(kept, self.config.thresholds.min_match_score, limit)
    }
}

/// Drops results under `min_score`, sorts by overall score desc, confidence desc,
/// job id asc, and truncates to `limit`.
pub fn rank_results(
    results: Vec<MatchResult>,
    min_score: f64,
    limit: Option<usize>,
) -> Vec<MatchResult> {
    let mut ranked: Vec<MatchResult> = results
        .into_iter()
        .filter(|r| r.overall_score >= min_score)
        .collect();

    ranked.sort_by(compare_ranked);

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

fn compare_ranked(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.overall_score
        .total_cmp(&a.overall_score)
        .then_with(|| b.confidence_score.total_cmp(&a.confidence_score))
        .then_with(|| a.job_id.cmp(&b.job_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::config::ScoringWeights;
    use crate::models::job::ExperienceLevel;
    use crate::models::profile::EducationLevel;

    fn engine() -> MatchingEngine {
        MatchingEngine::new(
            MatchingConfig::default(),
            Arc::new(SkillTaxonomy::builtin().unwrap()),
        )
        .unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn profile() -> CandidateProfile {
        CandidateProfile {
            name: Some("Ada".to_string()),
            skills: strings(&["Python", "SQL", "Django", "Git"]),
            experience_years: Some(5),
            education_level: Some(EducationLevel::Bachelor),
            location: Some("Warsaw, Poland".to_string()),
            ..Default::default()
        }
    }

    fn job(id: &str, requirements: &[&str], nice: &[&str]) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            requirements: strings(requirements),
            nice_to_have: strings(nice),
            experience_level: ExperienceLevel::Mid,
            education_required: EducationLevel::Bachelor,
            location: Some("Warsaw (Hybrid)".to_string()),
            ..Default::default()
        }
    }

    fn result(job_id: &str, overall: f64, confidence: f64) -> MatchResult {
        MatchResult {
            job_id: job_id.to_string(),
            overall_score: overall,
            skills_score: overall,
            experience_score: 1.0,
            education_score: 1.0,
            location_score: 1.0,
            matched_skills: vec![],
            missing_skills: vec![],
            skill_gaps: vec![],
            experience_match: true,
            education_match: true,
            recommendations: vec![],
            confidence_score: confidence,
            algorithm_version: ALGORITHM_VERSION.to_string(),
            band: MatchBand::Low,
        }
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = MatchingConfig {
            weights: ScoringWeights {
                skill: 0.4,
                experience: 0.4,
                education: 0.2,
                location: 0.1,
            },
            ..Default::default()
        };
        let result = MatchingEngine::new(config, Arc::new(SkillTaxonomy::builtin().unwrap()));
        assert!(matches!(result, Err(ConfigError::WeightSum { .. })));
    }

    #[test]
    fn test_empty_job_list_yields_empty_result() {
        assert!(engine().match_jobs(&profile(), &[], Some(10)).is_empty());
    }

    #[test]
    fn test_perfect_match() {
        let result = engine()
            .score_job(&profile(), &job("job-1", &["Python", "SQL"], &[]))
            .unwrap();
        assert!((result.overall_score - 1.0).abs() < 1e-9);
        assert_eq!(result.band, MatchBand::High);
        assert_eq!(result.confidence_score, 1.0);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.algorithm_version, ALGORITHM_VERSION);
    }

    #[test]
    fn test_missing_docker_is_gap_and_missing() {
        let candidate = CandidateProfile {
            skills: strings(&["Python", "SQL"]),
            ..profile()
        };
        let result = engine()
            .score_job(&candidate, &job("job-1", &["Python", "Docker"], &["AWS"]))
            .unwrap();
        assert_eq!(result.matched_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["Docker", "AWS"]);
        assert_eq!(result.skill_gaps, vec!["Docker"]);
        assert!(result.recommendations[0].contains("Docker"));
    }

    #[test]
    fn test_unconstrained_job_scores_full_skills_with_lower_confidence() {
        let result = engine().score_job(&profile(), &job("job-1", &[], &[])).unwrap();
        assert_eq!(result.skills_score, 1.0);
        assert!(result.confidence_score < 1.0);
    }

    #[test]
    fn test_senior_shortfall_scores_five_sixths() {
        let mut senior = job("job-1", &["Python"], &[]);
        senior.experience_level = ExperienceLevel::Senior;
        let result = engine().score_job(&profile(), &senior).unwrap();
        assert!((result.experience_score - 5.0 / 6.0).abs() < 1e-9);
        assert!(!result.experience_match);
    }

    #[test]
    fn test_remote_job_ignores_missing_candidate_location() {
        let candidate = CandidateProfile {
            location: None,
            ..profile()
        };
        let mut remote = job("job-1", &["Python"], &[]);
        remote.remote = true;
        remote.location = None;
        let result = engine().score_job(&candidate, &remote).unwrap();
        assert_eq!(result.location_score, 1.0);
        assert_eq!(result.confidence_score, 1.0);
    }

    #[test]
    fn test_other_city_in_same_country_recommends_relocation() {
        let candidate = CandidateProfile {
            location: Some("Gdańsk, Poland".to_string()),
            ..profile()
        };
        let mut krakow = job("job-1", &["Python"], &[]);
        krakow.location = Some("Kraków, Poland".to_string());
        let result = engine().score_job(&candidate, &krakow).unwrap();
        assert_eq!(result.location_score, 0.0);
        assert_eq!(result.recommendations.len(), 1);
        assert!(result.recommendations[0].contains("relocate to Kraków, Poland"));
    }

    #[test]
    fn test_empty_profile_scores_without_failing() {
        let (result, band) =
            engine().evaluate(&CandidateProfile::default(), &job("job-1", &["Rust"], &[]));
        assert!((0.0..=1.0).contains(&result.overall_score));
        assert!(result.confidence_score < 0.5);
        assert_eq!(band, None);
        assert!(engine()
            .score_job(&CandidateProfile::default(), &job("job-1", &["Rust"], &[]))
            .is_none());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let e = engine();
        let j = job("job-1", &["Python", "Kafka", "Docker"], &["AWS", "Git"]);
        let (first, _) = e.evaluate(&profile(), &j);
        let (second, _) = e.evaluate(&profile(), &j);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_rank_results_example_ordering() {
        let results = vec![
            result("job1", 0.9, 0.6),
            result("job2", 0.5, 1.0),
            result("job3", 0.9, 0.9),
            result("job4", 0.2, 1.0),
        ];
        let ranked = rank_results(results, 0.3, None);
        let ids: Vec<&str> = ranked.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(ids, vec!["job3", "job1", "job2"]);
    }

    #[test]
    fn test_rank_results_ties_broken_by_job_id() {
        let results = vec![result("b", 0.7, 0.8), result("a", 0.7, 0.8)];
        let ranked = rank_results(results, 0.3, None);
        assert_eq!(ranked[0].job_id, "a");
    }

    #[test]
    fn test_rank_results_truncates() {
        let results = (0..10)
            .map(|i| result(&format!("job-{i}"), 0.5, 1.0))
            .collect();
        assert_eq!(rank_results(results, 0.3, Some(3)).len(), 3);
    }

    #[test]
    fn test_match_jobs_filters_ranks_and_limits() {
        let e = engine();
        let jobs = vec![
            job("job-a", &["Rust", "Kafka", "Scala"], &[]),
            job("job-b", &["Python", "SQL"], &[]),
            job("job-c", &["Python", "Docker"], &[]),
        ];
        let ranked = e.match_jobs(&profile(), &jobs, Some(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].job_id, "job-b");
        assert_eq!(ranked[1].job_id, "job-c");
        assert!(ranked[0].overall_score >= ranked[1].overall_score);
    }

    #[test]
    fn test_match_jobs_excludes_below_minimum() {
        let e = engine();
        let candidate = CandidateProfile {
            skills: strings(&["Excel"]),
            experience_years: Some(0),
            education_level: Some(EducationLevel::None),
            location: Some("Lisbon".to_string()),
            ..Default::default()
        };
        let mut hard = job("job-hard", &["Rust", "Kafka"], &[]);
        hard.experience_level = ExperienceLevel::Senior;
        hard.education_required = EducationLevel::Phd;
        assert!(e.match_jobs(&candidate, &[hard], None).is_empty());
    }

    #[test]
    fn test_match_jobs_order_independent_of_input_order() {
        let e = engine();
        let mut jobs: Vec<JobRecord> = (0..40)
            .map(|i| {
                let reqs: &[&str] = if i % 3 == 0 {
                    &["Python", "SQL"]
                } else if i % 3 == 1 {
                    &["Python", "Docker"]
                } else {
                    &["Python", "Kafka", "Docker"]
                };
                job(&format!("job-{i:02}"), reqs, &[])
            })
            .collect();
        let forward = e.match_jobs(&profile(), &jobs, None);
        jobs.reverse();
        let backward = e.match_jobs(&profile(), &jobs, None);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_engines_with_different_weights_coexist() {
        let taxonomy = Arc::new(SkillTaxonomy::builtin().unwrap());
        let skill_only = MatchingEngine::new(
            MatchingConfig {
                weights: ScoringWeights {
                    skill: 1.0,
                    experience: 0.0,
                    education: 0.0,
                    location: 0.0,
                },
                ..Default::default()
            },
            taxonomy.clone(),
        )
        .unwrap();
        let default = MatchingEngine::new(MatchingConfig::default(), taxonomy).unwrap();

        let j = job("job-1", &["Python", "Docker"], &[]);
        let a = skill_only.score_job(&profile(), &j).unwrap();
        let b = default.score_job(&profile(), &j).unwrap();
        assert!((a.overall_score - 0.5).abs() < 1e-9);
        assert!(b.overall_score > a.overall_score);
    }
}
