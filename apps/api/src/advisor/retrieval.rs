//! Retrieval & ranking: filters the course catalog against the resolved
//! search profile and orders survivors by class average. Pure.

use std::cmp::Ordering;

use crate::advisor::lexicon;
use crate::models::course::CourseRow;
use crate::models::user::SearchProfile;

/// Which way survivors were sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    /// Hard query: lowest class average first.
    HardestFirst,
    /// Default: highest class average first.
    HighestGradesFirst,
}

impl SortMode {
    /// The label used when the grounding text names the sort criterion.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::HardestFirst => "DIFFICULTY",
            SortMode::HighestGradesFirst => "HIGHEST GRADES",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedCourse {
    pub code: String,
    pub class_average: f64,
}

/// Outcome of one ranking pass. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq)]
pub enum GroundingResult {
    /// Up to five survivors, ranked, plus the filters that produced them.
    Matches {
        subject: String,
        min_level: i32,
        max_level: i32,
        sort: SortMode,
        ranked: Vec<RankedCourse>,
    },
    /// The filters matched nothing; still carries the active band so the
    /// assistant can say what was searched.
    NoMatches {
        subject: String,
        min_level: i32,
        max_level: i32,
    },
    /// No advisory trigger in the message, or no subject resolved yet.
    NotApplicable,
}

const MAX_MATCHES: usize = 5;

/// Filters and ranks `catalog` against `profile` for this message.
///
/// Activates only when the message contains an advisory trigger word and the
/// profile has a resolved subject. Survivors must match the subject prefix,
/// carry a parsable level inside the profile band, and have a non-zero class
/// average; malformed rows are dropped silently, never surfaced.
pub fn rank(message: &str, profile: &SearchProfile, catalog: &[CourseRow]) -> GroundingResult {
    let lower = message.to_lowercase();

    let Some(subject) = profile.subject.as_deref() else {
        return GroundingResult::NotApplicable;
    };
    if !lexicon::TRIGGER_WORDS.iter().any(|w| lower.contains(w)) {
        return GroundingResult::NotApplicable;
    }

    let mut survivors: Vec<RankedCourse> = Vec::new();
    for course in catalog {
        if !course.code.starts_with(subject) {
            continue;
        }
        let Some(level) = parse_level(&course.code) else {
            continue;
        };
        if level < profile.min_level || level > profile.max_level {
            continue;
        }
        let class_average = match course.class_average {
            Some(avg) if avg != 0.0 => avg,
            _ => continue,
        };
        survivors.push(RankedCourse {
            code: course.code.clone(),
            class_average,
        });
    }

    if survivors.is_empty() {
        return GroundingResult::NoMatches {
            subject: subject.to_string(),
            min_level: profile.min_level,
            max_level: profile.max_level,
        };
    }

    let is_hard_query = lexicon::HARD_WORDS.iter().any(|w| lower.contains(w));
    let sort = if is_hard_query {
        SortMode::HardestFirst
    } else {
        SortMode::HighestGradesFirst
    };

    // Stable sort: catalog order is preserved for equal averages.
    survivors.sort_by(|a, b| {
        let ascending = a
            .class_average
            .partial_cmp(&b.class_average)
            .unwrap_or(Ordering::Equal);
        match sort {
            SortMode::HardestFirst => ascending,
            SortMode::HighestGradesFirst => ascending.reverse(),
        }
    });
    survivors.truncate(MAX_MATCHES);

    GroundingResult::Matches {
        subject: subject.to_string(),
        min_level: profile.min_level,
        max_level: profile.max_level,
        sort,
        ranked: survivors,
    }
}

/// Parses the first run of digits in a course code as its numeric level.
fn parse_level(code: &str) -> Option<i32> {
    let digits: String = code
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
