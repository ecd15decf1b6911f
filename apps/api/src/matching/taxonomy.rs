//! Skill Taxonomy: canonical categories and their surface forms.
//!
//! Built once at startup and shared read-only behind an `Arc`. Every surface form
//! belongs to exactly one category; lookups are case-insensitive.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default category table: canonical name → known surface forms.
const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    (
        "python",
        &["python", "django", "flask", "fastapi", "pandas", "numpy"],
    ),
    (
        "javascript",
        &["javascript", "js", "node.js", "react", "angular", "vue"],
    ),
    ("java", &["java", "spring", "hibernate", "maven"]),
    (
        "sql",
        &["sql", "mysql", "postgresql", "mongodb", "redis"],
    ),
    (
        "aws",
        &["aws", "amazon web services", "ec2", "s3", "lambda"],
    ),
    ("docker", &["docker", "kubernetes", "containerization"]),
    ("git", &["git", "github", "gitlab", "version control"]),
    (
        "machine_learning",
        &[
            "ml",
            "machine learning",
            "tensorflow",
            "pytorch",
            "scikit-learn",
        ],
    ),
    (
        "data_science",
        &["data science", "data analysis", "statistics", "r"],
    ),
];

/// Shortest form allowed to resolve a category from inside a longer skill.
const MIN_EMBEDDED_FORM_LEN: usize = 4;

/// One category as it appears in a taxonomy file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub category: String,
    pub forms: Vec<String>,
}

#[derive(Debug)]
pub struct SkillTaxonomy {
    entries: Vec<TaxonomyEntry>,
    /// lowercased form (including the category name) → index into `entries`
    form_index: HashMap<String, usize>,
    /// (form, category index) in table order, for phrase scanning
    forms: Vec<(String, usize)>,
}

/// A raw skill string paired with its normalized identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSkill {
    pub raw: String,
    pub canonical: String,
}

impl SkillTaxonomy {
    /// The built-in table.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_entries(DEFAULT_TABLE.iter().map(|(category, forms)| TaxonomyEntry {
            category: category.to_string(),
            forms: forms.iter().map(|f| f.to_string()).collect(),
        }))
    }

    /// Loads a JSON array of `{"category": ..., "forms": [...]}` objects.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let source_path = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: source_path.clone(),
            source,
        })?;
        let entries: Vec<TaxonomyEntry> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: source_path,
                source,
            })?;
        Self::from_entries(entries)
    }

    /// Builds and validates a taxonomy. Category names are registered as forms of
    /// their own category. Fails if a form is blank or claimed by two categories.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = TaxonomyEntry>,
    {
        let mut normalized: Vec<TaxonomyEntry> = Vec::new();
        let mut form_index: HashMap<String, usize> = HashMap::new();
        let mut forms: Vec<(String, usize)> = Vec::new();

        for entry in entries {
            let category = entry.category.trim().to_lowercase();
            if category.is_empty() {
                return Err(ConfigError::Taxonomy("empty category name".to_string()));
            }
            if normalized.iter().any(|e| e.category == category) {
                return Err(ConfigError::Taxonomy(format!(
                    "category '{category}' is defined twice"
                )));
            }
            let idx = normalized.len();

            let mut entry_forms: Vec<String> = Vec::new();
            for form in std::iter::once(category.clone()).chain(
                entry
                    .forms
                    .iter()
                    .map(|f| f.trim().to_lowercase()),
            ) {
                if form.is_empty() {
                    return Err(ConfigError::Taxonomy(format!(
                        "blank surface form under '{category}'"
                    )));
                }
                match form_index.get(&form) {
                    Some(&owner) if owner == idx => continue,
                    Some(&owner) => {
                        return Err(ConfigError::Taxonomy(format!(
                            "form '{form}' maps to both '{}' and '{category}'",
                            normalized[owner].category
                        )));
                    }
                    None => {}
                }
                form_index.insert(form.clone(), idx);
                forms.push((form.clone(), idx));
                entry_forms.push(form);
            }

            normalized.push(TaxonomyEntry {
                category,
                forms: entry_forms,
            });
        }

        Ok(Self {
            entries: normalized,
            form_index,
            forms,
        })
    }

    pub fn entries(&self) -> &[TaxonomyEntry] {
        &self.entries
    }

    pub fn category_count(&self) -> usize {
        self.entries.len()
    }

    /// Canonical category for a skill, if the taxonomy knows it.
    ///
    /// An exact form wins. Otherwise the longest form found inside the skill wins;
    /// equal lengths resolve to the earlier table entry.
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        let lower = skill.trim().to_lowercase();
        if lower.is_empty() {
            return None;
        }
        if let Some(&idx) = self.form_index.get(&lower) {
            return Some(&self.entries[idx].category);
        }

        let mut best: Option<(&str, usize)> = None;
        for (form, idx) in &self.forms {
            if !form_occurs_in(&lower, form) {
                continue;
            }
            if best.map_or(true, |(b, _)| form.len() > b.len()) {
                best = Some((form, *idx));
            }
        }
        best.map(|(_, idx)| self.entries[idx].category.as_str())
    }

    /// Canonical category, or the trimmed lowercased input when unknown.
    pub fn normalize(&self, skill: &str) -> String {
        match self.category_of(skill) {
            Some(category) => category.to_string(),
            None => skill.trim().to_lowercase(),
        }
    }

    pub fn normalize_skill(&self, skill: &str) -> NormalizedSkill {
        NormalizedSkill {
            raw: skill.trim().to_lowercase(),
            canonical: self.normalize(skill),
        }
    }
}

impl NormalizedSkill {
    /// Equal canonical identities, or either raw form a substring of the other.
    /// Symmetric. Blank skills never match.
    pub fn matches(&self, other: &NormalizedSkill) -> bool {
        if self.raw.is_empty() || other.raw.is_empty() {
            return false;
        }
        self.canonical == other.canonical
            || self.raw.contains(other.raw.as_str())
            || other.raw.contains(self.raw.as_str())
    }
}

/// Whether a taxonomy form occurs inside a lowercased skill.
///
/// Forms of `MIN_EMBEDDED_FORM_LEN` chars or more match anywhere ("python3",
/// "reactjs"). Shorter forms ("r", "js", "vue") must not touch a letter on either
/// side, so "r" stays out of "docker" while "vue3" still resolves.
fn form_occurs_in(skill: &str, form: &str) -> bool {
    if form.is_empty() || form.len() > skill.len() {
        return false;
    }
    if form.chars().count() >= MIN_EMBEDDED_FORM_LEN {
        return skill.contains(form);
    }
    skill.match_indices(form).any(|(start, _)| {
        let before = skill[..start].chars().next_back();
        let after = skill[start + form.len()..].chars().next();
        !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic)
    })
}
