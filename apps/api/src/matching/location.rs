//! Location Scorer: remote flag, then city/region token overlap.
//!
//! Only the leading comma segment is the city or region; trailing segments
//! ("Poland") widen it and never match on their own.

pub const UNKNOWN_LOCATION_SCORE: f64 = 0.5;

/// Work-mode and filler words that say nothing about a place.
const NON_PLACE_TOKENS: &[&str] = &[
    "remote",
    "hybrid",
    "onsite",
    "on",
    "site",
    "office",
    "recruitment",
    "relocation",
    "or",
    "and",
    "the",
    "in",
    "of",
    "full",
    "partially",
];

/// Shortest token allowed to match inside a longer one ("warsaw" in "warsawa").
const MIN_CONTAINED_TOKEN_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationScore {
    pub score: f64,
    /// Both places were known and compared.
    pub known: bool,
}

pub fn score_location(
    candidate_location: Option<&str>,
    job_location: Option<&str>,
    remote: bool,
) -> LocationScore {
    if remote {
        return LocationScore {
            score: 1.0,
            known: true,
        };
    }

    let candidate_places = candidate_location.map(place_segments).unwrap_or_default();
    let job_places = job_location.map(place_segments).unwrap_or_default();

    if candidate_places.is_empty() || job_places.is_empty() {
        return LocationScore {
            score: UNKNOWN_LOCATION_SCORE,
            known: false,
        };
    }

    LocationScore {
        score: if places_overlap(&candidate_places, &job_places) {
            1.0
        } else {
            0.0
        },
        known: true,
    }
}

/// Comma-separated segments of a location, most specific first ("Warsaw, Poland"
/// gives `[["warsaw"], ["poland"]]`). Segments without place tokens are dropped.
fn place_segments(location: &str) -> Vec<Vec<String>> {
    location
        .split(',')
        .map(place_tokens)
        .filter(|tokens| !tokens.is_empty())
        .collect()
}

/// The leading city/region segments must overlap. A location that names a single
/// area ("Poland", "Warsaw") may also match any segment of the other side. Two
/// different cities never match through a shared trailing country.
fn places_overlap(a: &[Vec<String>], b: &[Vec<String>]) -> bool {
    if segments_overlap(&a[0], &b[0]) {
        return true;
    }
    let within = |single: &[Vec<String>], other: &[Vec<String>]| {
        single.len() == 1 && other.iter().any(|segment| segments_overlap(&single[0], segment))
    };
    within(a, b) || within(b, a)
}

fn segments_overlap(a: &[String], b: &[String]) -> bool {
    a.iter().any(|x| b.iter().any(|y| tokens_overlap(x, y)))
}

/// Lowercased place tokens of a free-text location.
fn place_tokens(location: &str) -> Vec<String> {
    location
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .filter(|t| !NON_PLACE_TOKENS.contains(t))
        .map(str::to_string)
        .collect()
}

fn tokens_overlap(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= MIN_CONTAINED_TOKEN_LEN && long.contains(short)
}
