use serde::{Deserialize, Serialize};

use crate::models::profile::EducationLevel;

/// Seniority a posting asks for, classified upstream or by the job classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    #[default]
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
        }
    }
}

/// Monthly gross salary band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u32,
    pub max: u32,
    pub currency: String,
}

/// A classified job posting, ready for matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    /// Mandatory skills.
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub education_required: EducationLevel,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Stated on the posting or estimated by the classifier. Never scored.
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    /// Broad areas of the role, then its top requirements. Display only.
    #[serde(default)]
    pub skills_hierarchy: Vec<String>,
    #[serde(default)]
    pub relocation_support: bool,
}

impl JobRecord {
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn has_requirements(&self) -> bool {
        self.requirements
            .iter()
            .chain(self.nice_to_have.iter())
            .any(|s| !s.trim().is_empty())
    }
}

/// A posting as it arrives from the scraping collaborator, before classification.
/// Explicit values override whatever the classifier would infer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawJobPosting {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub nice_to_have: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub education_required: Option<EducationLevel>,
    #[serde(default)]
    pub remote: Option<bool>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
    #[serde(default)]
    pub relocation_support: Option<bool>,
}
