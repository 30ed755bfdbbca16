//! Intent extraction: a bounded keyword/lexicon match, deliberately not a
//! statistical classifier. Pure; the caller persists the result.

use crate::advisor::lexicon;
use crate::models::user::SearchProfile;

/// Merges subject and level intent from `message` into `prior`.
///
/// Matching is case-insensitive substring containment against the ordered
/// lexicon tables; the first hit in each table wins and replaces the stored
/// value. No match carries the prior value forward unchanged.
///
/// The `updated` flag is true whenever any keyword matched, even if the
/// matched value equals what was already stored. Callers depend on that
/// exact behavior, so it is kept rather than compared old-vs-new.
pub fn extract(message: &str, prior: &SearchProfile) -> (SearchProfile, bool) {
    let lower = message.to_lowercase();
    let mut profile = prior.clone();
    let mut updated = false;

    for (keyword, code) in lexicon::SUBJECTS {
        if lower.contains(keyword) {
            profile.subject = Some((*code).to_string());
            updated = true;
            break;
        }
    }

    for (keywords, (min_level, max_level)) in lexicon::LEVEL_BANDS {
        if keywords.iter().any(|w| lower.contains(w)) {
            profile.min_level = *min_level;
            profile.max_level = *max_level;
            updated = true;
            break;
        }
    }

    (profile, updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(subject: Option<&str>, min: i32, max: i32) -> SearchProfile {
        SearchProfile {
            subject: subject.map(String::from),
            min_level: min,
            max_level: max,
        }
    }

    #[test]
    fn test_single_subject_keyword_resolves_regardless_of_prior() {
        let (fresh, updated) = extract("tell me about biology", &SearchProfile::default());
        assert_eq!(fresh.subject.as_deref(), Some("BIOL"));
        assert!(updated);

        let (overridden, updated) = extract("tell me about biology", &profile(Some("COMP"), 0, 900));
        assert_eq!(overridden.subject.as_deref(), Some("BIOL"));
        assert!(updated);
    }

    #[test]
    fn test_earlier_lexicon_entry_wins_on_multiple_subjects() {
        // "math" precedes "history" in the canonical scan order.
        let (p, _) = extract("math or history, which is better?", &SearchProfile::default());
        assert_eq!(p.subject.as_deref(), Some("MATH"));
    }

    #[test]
    fn test_no_keyword_carries_prior_forward() {
        let prior = profile(Some("CHEM"), 200, 299);
        let (p, updated) = extract("what do you think?", &prior);
        assert_eq!(p, prior);
        assert!(!updated);
    }

    #[test]
    fn test_level_band_resolution() {
        let (p, updated) = extract("any intro options?", &SearchProfile::default());
        assert_eq!((p.min_level, p.max_level), (100, 199));
        assert!(updated);

        let (p, _) = extract("something 300-level please", &SearchProfile::default());
        assert_eq!((p.min_level, p.max_level), (300, 399));

        let (p, _) = extract("grad seminars", &SearchProfile::default());
        assert_eq!((p.min_level, p.max_level), (400, 600));
    }

    #[test]
    fn test_first_matching_level_group_wins() {
        // freshman group is tested before the senior group
        let (p, _) = extract(
            "freshman or senior courses, whatever",
            &SearchProfile::default(),
        );
        assert_eq!((p.min_level, p.max_level), (100, 199));
    }

    #[test]
    fn test_level_match_keeps_existing_subject() {
        let (p, updated) = extract("show me sophomore ones", &profile(Some("COMP"), 100, 199));
        assert_eq!(p.subject.as_deref(), Some("COMP"));
        assert_eq!((p.min_level, p.max_level), (200, 299));
        assert!(updated);
    }

    #[test]
    fn test_rematching_stored_value_still_reports_updated() {
        // Re-typing the active subject keyword counts as an update even
        // though nothing changed; kept for compatibility.
        let prior = profile(Some("BIOL"), 0, 900);
        let (p, updated) = extract("more biology please", &prior);
        assert_eq!(p, prior);
        assert!(updated);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let (p, _) = extract("CHEMISTRY?!", &SearchProfile::default());
        assert_eq!(p.subject.as_deref(), Some("CHEM"));
    }
}
