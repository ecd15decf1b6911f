use crate::models::profile::EducationLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EducationScore {
    pub score: f64,
    pub matched: bool,
    pub required: EducationLevel,
}

/// 1.0 at or above the requirement, minus `step_penalty` per ordinal step below it.
pub fn score_education(
    candidate: EducationLevel,
    required: EducationLevel,
    step_penalty: f64,
) -> EducationScore {
    let matched = candidate >= required;
    let score = if matched {
        1.0
    } else {
        let steps = (required.ordinal() - candidate.ordinal()) as f64;
        (1.0 - step_penalty * steps).max(0.0)
    };

    EducationScore {
        score,
        matched,
        required,
    }
}
