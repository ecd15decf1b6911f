use serde::{Deserialize, Serialize};

/// Ordinal education scale shared by candidates and job requirements.
///
/// Variant order is the ordinal order: `None < HighSchool < Bachelor < Master < Phd`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    None,
    HighSchool,
    Bachelor,
    Master,
    Phd,
}

impl EducationLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            EducationLevel::None => 0,
            EducationLevel::HighSchool => 1,
            EducationLevel::Bachelor => 2,
            EducationLevel::Master => 3,
            EducationLevel::Phd => 4,
        }
    }

    /// Human-readable credential name used in recommendations.
    pub fn credential(self) -> &'static str {
        match self {
            EducationLevel::None => "no formal degree",
            EducationLevel::HighSchool => "high school diploma",
            EducationLevel::Bachelor => "bachelor's degree",
            EducationLevel::Master => "master's degree",
            EducationLevel::Phd => "PhD",
        }
    }
}

/// A past role. Display only, never scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

/// A degree or course of study. Display only, never scored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
}

/// Structured resume as produced by the resume-parsing collaborator.
/// Every field is optional on the wire; absences are handled by scoring policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Negative values are clamped to 0 when scored.
    #[serde(default)]
    pub experience_years: Option<i64>,
    #[serde(default)]
    pub education_level: Option<EducationLevel>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

impl CandidateProfile {
    /// Years of experience for scoring: absent → 0, negative → 0.
    pub fn years(&self) -> u32 {
        self.experience_years
            .map(|y| y.clamp(0, u32::MAX as i64) as u32)
            .unwrap_or(0)
    }

    pub fn education(&self) -> EducationLevel {
        self.education_level.unwrap_or_default()
    }

    /// Location with surrounding whitespace removed; blank counts as absent.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn has_skills(&self) -> bool {
        self.skills.iter().any(|s| !s.trim().is_empty())
    }
}
