//! Job Classifier: turns raw postings into `JobRecord`s with a fixed rule table.
//!
//! Scorers never look at titles; seniority, education and work mode are decided here
//! once, and explicit values on the posting always win over inference. Salary, the
//! skills hierarchy and relocation support are descriptive and never scored.

use crate::models::job::{ExperienceLevel, JobRecord, RawJobPosting, SalaryRange};
use crate::models::profile::EducationLevel;

const SENIOR_TITLE_TOKENS: &[&str] = &["senior", "sr", "lead", "principal", "staff"];
const JUNIOR_TITLE_TOKENS: &[&str] = &["junior", "jr", "entry", "intern", "graduate"];
const REMOTE_LOCATION_TOKENS: &[&str] = &["remote", "hybrid"];

/// Category rules, evaluated in order against requirement + nice-to-have terms.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("python", &["python", "django", "flask", "fastapi"]),
    ("java", &["java", "spring", "kotlin"]),
    ("javascript", &["javascript", "node.js", "react", "angular"]),
    (
        "ai_ml",
        &["machine learning", "ml", "tensorflow", "pytorch", "ai"],
    ),
    ("data", &["data", "sql", "etl", "spark", "hadoop"]),
    (
        "devops",
        &["aws", "azure", "gcp", "cloud", "devops", "kubernetes"],
    ),
    (
        "security",
        &["security", "siem", "penetration", "cybersecurity"],
    ),
];
const FALLBACK_CATEGORY: &str = "other";

/// Categories whose senior roles ask for a master's degree.
const ADVANCED_DEGREE_CATEGORIES: &[&str] = &["ai_ml", "data"];

const SALARY_CURRENCY: &str = "PLN";

/// Category adjustment applied to the level's base salary band, in percent.
/// Unlisted categories keep the base band.
const CATEGORY_SALARY_PERCENT: &[(&str, u32)] = &[
    ("ai_ml", 130),
    ("data", 120),
    ("python", 110),
    ("java", 110),
    ("javascript", 100),
    ("devops", 115),
    ("security", 125),
];

/// Broad areas each category belongs to, most general first.
const CATEGORY_HIERARCHY: &[(&str, &[&str])] = &[
    ("python", &["backend", "python", "api", "database"]),
    ("java", &["backend", "java", "spring", "microservices"]),
    ("javascript", &["frontend", "javascript", "react", "node.js"]),
    ("ai_ml", &["ai", "machine learning", "python", "data science"]),
    ("data", &["data", "analytics", "sql", "etl"]),
    ("devops", &["devops", "cloud", "automation", "infrastructure"]),
    ("security", &["security", "cybersecurity", "network", "compliance"]),
];

/// Requirements appended to the hierarchy after the category areas.
const HIERARCHY_REQUIREMENTS: usize = 3;

/// Classifies one posting. `position` is its 1-based index in the input and
/// becomes the id (`job-<position>`) when the posting carries none.
pub fn classify_job(raw: RawJobPosting, position: usize) -> JobRecord {
    let experience_level = raw
        .experience_level
        .unwrap_or_else(|| infer_experience_level(&raw.title));
    let category = infer_category(&raw.requirements, &raw.nice_to_have);
    let education_required = raw
        .education_required
        .unwrap_or_else(|| infer_education(&raw.title, category, experience_level));
    let remote = raw
        .remote
        .unwrap_or_else(|| raw.location.as_deref().is_some_and(is_remote_location));
    let salary = raw
        .salary
        .unwrap_or_else(|| estimate_salary(experience_level, category));
    let relocation_support = raw
        .relocation_support
        .unwrap_or_else(|| offers_relocation(experience_level, raw.location.as_deref()));
    let skills_hierarchy = build_skills_hierarchy(category, &raw.requirements);
    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| format!("job-{position}"));

    JobRecord {
        id,
        title: raw.title,
        company: raw.company,
        requirements: raw.requirements,
        nice_to_have: raw.nice_to_have,
        experience_level,
        education_required,
        location: raw.location,
        remote,
        category: Some(category.to_string()),
        description: raw.description.filter(|d| !d.trim().is_empty()),
        salary: Some(salary),
        skills_hierarchy,
        relocation_support,
    }
}

pub fn classify_jobs(raw: Vec<RawJobPosting>) -> Vec<JobRecord> {
    raw.into_iter()
        .enumerate()
        .map(|(i, posting)| classify_job(posting, i + 1))
        .collect()
}

pub fn infer_experience_level(title: &str) -> ExperienceLevel {
    let tokens = title_tokens(title);
    if tokens.iter().any(|t| SENIOR_TITLE_TOKENS.contains(&t.as_str())) {
        ExperienceLevel::Senior
    } else if tokens.iter().any(|t| JUNIOR_TITLE_TOKENS.contains(&t.as_str())) {
        ExperienceLevel::Junior
    } else {
        ExperienceLevel::Mid
    }
}

pub fn infer_category(requirements: &[String], nice_to_have: &[String]) -> &'static str {
    let terms: Vec<String> = requirements
        .iter()
        .chain(nice_to_have.iter())
        .map(|s| s.trim().to_lowercase())
        .collect();

    CATEGORY_RULES
        .iter()
        .find(|(_, markers)| terms.iter().any(|t| markers.contains(&t.as_str())))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

pub fn infer_education(
    title: &str,
    category: &str,
    experience_level: ExperienceLevel,
) -> EducationLevel {
    if title_tokens(title).iter().any(|t| t == "phd") {
        EducationLevel::Phd
    } else if experience_level == ExperienceLevel::Senior
        && ADVANCED_DEGREE_CATEGORIES.contains(&category)
    {
        EducationLevel::Master
    } else {
        EducationLevel::Bachelor
    }
}

/// Base band for the level, scaled by the category adjustment.
pub fn estimate_salary(level: ExperienceLevel, category: &str) -> SalaryRange {
    let (min, max) = match level {
        ExperienceLevel::Junior => (8_000, 15_000),
        ExperienceLevel::Mid => (12_000, 22_000),
        ExperienceLevel::Senior => (18_000, 35_000),
    };
    let percent = CATEGORY_SALARY_PERCENT
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, p)| *p)
        .unwrap_or(100);

    SalaryRange {
        min: min * percent / 100,
        max: max * percent / 100,
        currency: SALARY_CURRENCY.to_string(),
    }
}

/// Category areas followed by the first few requirements not already listed.
pub fn build_skills_hierarchy(category: &str, requirements: &[String]) -> Vec<String> {
    let mut hierarchy: Vec<String> = CATEGORY_HIERARCHY
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, areas)| areas.iter().map(|a| a.to_string()).collect())
        .unwrap_or_default();

    for requirement in requirements.iter().take(HIERARCHY_REQUIREMENTS) {
        let skill = requirement.trim().to_lowercase();
        if !skill.is_empty() && !hierarchy.contains(&skill) {
            hierarchy.push(skill);
        }
    }
    hierarchy
}

/// Senior roles always relocate; otherwise only roles not advertised as remote.
pub fn offers_relocation(level: ExperienceLevel, location: Option<&str>) -> bool {
    level == ExperienceLevel::Senior
        || !location.is_some_and(|l| l.to_lowercase().contains("remote"))
}

pub fn is_remote_location(location: &str) -> bool {
    location
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .any(|t| REMOTE_LOCATION_TOKENS.contains(&t))
}

fn title_tokens(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn raw(title: &str, location: &str, requirements: &[&str]) -> RawJobPosting {
        RawJobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            location: Some(location.to_string()),
            requirements: strings(requirements),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_seniority() {
        assert_eq!(
            infer_experience_level("Senior Backend Engineer (Python)"),
            ExperienceLevel::Senior
        );
        assert_eq!(
            infer_experience_level("Sr Backend Engineer"),
            ExperienceLevel::Senior
        );
        assert_eq!(
            infer_experience_level("Junior Model Developer"),
            ExperienceLevel::Junior
        );
        assert_eq!(infer_experience_level("Python Developer"), ExperienceLevel::Mid);
    }

    #[test]
    fn test_seniority_uses_whole_tokens() {
        // "sr" must not fire inside other words
        assert_eq!(
            infer_experience_level("Software Engineer, SRE tooling"),
            ExperienceLevel::Mid
        );
    }

    #[test]
    fn test_category_rules_in_order() {
        assert_eq!(infer_category(&strings(&["Python", "SQL"]), &[]), "python");
        assert_eq!(infer_category(&strings(&["SQL", "ETL"]), &[]), "data");
        assert_eq!(
            infer_category(&strings(&["SIEM", "Incident Response"]), &[]),
            "security"
        );
        assert_eq!(infer_category(&strings(&["Excel"]), &[]), "other");
    }

    #[test]
    fn test_category_considers_nice_to_have() {
        assert_eq!(
            infer_category(&strings(&["Terraform"]), &strings(&["Kubernetes"])),
            "devops"
        );
    }

    #[test]
    fn test_education_inference() {
        assert_eq!(
            infer_education("Machine Learning Engineer (PhD)", "python", ExperienceLevel::Mid),
            EducationLevel::Phd
        );
        assert_eq!(
            infer_education("Senior Data Engineer", "data", ExperienceLevel::Senior),
            EducationLevel::Master
        );
        assert_eq!(
            infer_education("Junior Developer", "python", ExperienceLevel::Junior),
            EducationLevel::Bachelor
        );
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote_location("Remote (Poland)"));
        assert!(is_remote_location("Warsaw (Hybrid)"));
        assert!(!is_remote_location("Kraków"));
    }

    #[test]
    fn test_classify_fills_inferred_fields() {
        let job = classify_job(
            raw("Senior Backend Engineer (Python)", "Remote (Poland)", &["Python", "Docker"]),
            1,
        );
        assert_eq!(job.id, "job-1");
        assert_eq!(job.experience_level, ExperienceLevel::Senior);
        assert_eq!(job.education_required, EducationLevel::Bachelor);
        assert!(job.remote);
        assert_eq!(job.category.as_deref(), Some("python"));
    }

    #[test]
    fn test_explicit_values_override_inference() {
        let mut posting = raw("Senior Engineer", "Remote", &["Python"]);
        posting.id = Some("ext-42".to_string());
        posting.experience_level = Some(ExperienceLevel::Junior);
        posting.education_required = Some(EducationLevel::None);
        posting.remote = Some(false);

        let job = classify_job(posting, 7);
        assert_eq!(job.id, "ext-42");
        assert_eq!(job.experience_level, ExperienceLevel::Junior);
        assert_eq!(job.education_required, EducationLevel::None);
        assert!(!job.remote);
    }

    #[test]
    fn test_salary_scaled_by_category() {
        let senior_ml = estimate_salary(ExperienceLevel::Senior, "ai_ml");
        assert_eq!((senior_ml.min, senior_ml.max), (23_400, 45_500));
        assert_eq!(senior_ml.currency, "PLN");

        let mid_devops = estimate_salary(ExperienceLevel::Mid, "devops");
        assert_eq!((mid_devops.min, mid_devops.max), (13_800, 25_300));

        let junior_other = estimate_salary(ExperienceLevel::Junior, "other");
        assert_eq!((junior_other.min, junior_other.max), (8_000, 15_000));
    }

    #[test]
    fn test_skills_hierarchy_appends_top_requirements() {
        let hierarchy =
            build_skills_hierarchy("data", &strings(&["SQL", "Airflow", "dbt", "Looker"]));
        assert_eq!(
            hierarchy,
            vec!["data", "analytics", "sql", "etl", "airflow", "dbt"]
        );
        assert_eq!(
            build_skills_hierarchy("other", &strings(&["Excel"])),
            vec!["excel"]
        );
    }

    #[test]
    fn test_relocation_support() {
        assert!(offers_relocation(ExperienceLevel::Senior, Some("Remote (Poland)")));
        assert!(!offers_relocation(ExperienceLevel::Mid, Some("Remote (Poland)")));
        assert!(offers_relocation(ExperienceLevel::Mid, Some("Warsaw (Hybrid)")));
        assert!(offers_relocation(ExperienceLevel::Junior, None));
    }

    #[test]
    fn test_classify_carries_description_and_derived_fields() {
        let mut posting = raw("Data Engineer", "Poland (Remote)", &["SQL", "ETL"]);
        posting.description = Some("Build pipelines.".to_string());
        let job = classify_job(posting, 3);
        assert_eq!(job.description.as_deref(), Some("Build pipelines."));
        assert_eq!(job.salary.as_ref().map(|s| s.min), Some(14_400));
        assert_eq!(&job.skills_hierarchy[..4], &["data", "analytics", "sql", "etl"]);
        assert!(!job.relocation_support);
    }

    #[test]
    fn test_explicit_salary_wins() {
        let mut posting = raw("Python Developer", "Warsaw", &["Python"]);
        posting.salary = Some(SalaryRange {
            min: 20_000,
            max: 26_000,
            currency: "PLN".to_string(),
        });
        posting.relocation_support = Some(false);
        let job = classify_job(posting, 1);
        assert_eq!(job.salary.map(|s| s.max), Some(26_000));
        assert!(!job.relocation_support);
    }

    #[test]
    fn test_classify_jobs_numbers_from_one() {
        let jobs = classify_jobs(vec![
            raw("Python Developer", "Warsaw", &["Python"]),
            raw("Data Analyst", "Poznań", &["SQL"]),
        ]);
        assert_eq!(jobs[0].id, "job-1");
        assert_eq!(jobs[1].id, "job-2");
    }
}
