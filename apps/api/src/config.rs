use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::config::MatchingConfig;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but unparseable.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON array of raw postings seeding the job catalog.
    pub jobs_file: Option<PathBuf>,
    /// JSON array of `{category, forms}` replacing the built-in skill taxonomy.
    pub taxonomy_file: Option<PathBuf>,
    /// Result limit when a match request does not name one.
    pub default_limit: usize,
    pub matching: MatchingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            jobs_file: None,
            taxonomy_file: None,
            default_limit: 50,
            matching: MatchingConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Matching values are
    /// only parsed here; `MatchingEngine::new` validates them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let mut matching = defaults.matching.clone();

        matching.weights.skill = parse_or(&lookup, "MATCH_WEIGHT_SKILL", matching.weights.skill)?;
        matching.weights.experience =
            parse_or(&lookup, "MATCH_WEIGHT_EXPERIENCE", matching.weights.experience)?;
        matching.weights.education =
            parse_or(&lookup, "MATCH_WEIGHT_EDUCATION", matching.weights.education)?;
        matching.weights.location =
            parse_or(&lookup, "MATCH_WEIGHT_LOCATION", matching.weights.location)?;
        matching.thresholds.min_match_score = parse_or(
            &lookup,
            "MATCH_MIN_SCORE",
            matching.thresholds.min_match_score,
        )?;
        matching.thresholds.medium_match_threshold = parse_or(
            &lookup,
            "MATCH_MEDIUM_THRESHOLD",
            matching.thresholds.medium_match_threshold,
        )?;
        matching.thresholds.high_match_threshold = parse_or(
            &lookup,
            "MATCH_HIGH_THRESHOLD",
            matching.thresholds.high_match_threshold,
        )?;
        matching.experience.junior =
            parse_or(&lookup, "MATCH_EXPERIENCE_JUNIOR_YEARS", matching.experience.junior)?;
        matching.experience.mid =
            parse_or(&lookup, "MATCH_EXPERIENCE_MID_YEARS", matching.experience.mid)?;
        matching.experience.senior =
            parse_or(&lookup, "MATCH_EXPERIENCE_SENIOR_YEARS", matching.experience.senior)?;
        matching.education_step_penalty = parse_or(
            &lookup,
            "MATCH_EDUCATION_STEP_PENALTY",
            matching.education_step_penalty,
        )?;
        matching.confidence_penalty =
            parse_or(&lookup, "MATCH_CONFIDENCE_PENALTY", matching.confidence_penalty)?;
        matching.max_skill_recommendations = parse_or(
            &lookup,
            "MATCH_MAX_SKILL_RECOMMENDATIONS",
            matching.max_skill_recommendations,
        )?;

        Ok(Config {
            port: parse_or(&lookup, "PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            jobs_file: non_empty(&lookup, "JOBS_FILE").map(PathBuf::from),
            taxonomy_file: non_empty(&lookup, "SKILL_TAXONOMY_FILE").map(PathBuf::from),
            default_limit: parse_or(&lookup, "MATCH_DEFAULT_LIMIT", defaults.default_limit)?,
            matching,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty(lookup, key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
