//! Static keyword tables for intent extraction and retrieval triggering.
//!
//! These are ordered slices, not maps: scan order is part of the contract.
//! The first entry whose keyword appears in the message wins, so earlier
//! entries shadow later ones.

/// Subject keyword -> canonical subject code, in canonical scan order.
pub const SUBJECTS: &[(&str, &str)] = &[
    ("computer science", "COMP"),
    ("cs", "COMP"),
    ("comp", "COMP"),
    ("math", "MATH"),
    ("biology", "BIOL"),
    ("physics", "PHYS"),
    ("chemistry", "CHEM"),
    ("engineering", "ECSE"),
    ("psychology", "PSYC"),
    ("management", "MGCR"),
    ("economics", "ECON"),
    ("arts", "ARTH"),
    ("sociology", "SOCI"),
    ("history", "HIST"),
];

/// Level keyword groups -> inclusive (min, max) course-level band, in
/// priority order. The first group with any keyword present wins.
pub const LEVEL_BANDS: &[(&[&str], (i32, i32))] = &[
    (&["freshman", "100-level", "intro"], (100, 199)),
    (&["sophomore", "200-level"], (200, 299)),
    (&["junior", "300-level"], (300, 399)),
    (
        &["senior", "400-level", "500-level", "advanced", "grad"],
        (400, 600),
    ),
];

/// Advisory trigger vocabulary: retrieval activates only when one of these
/// appears in the message (and a subject is resolved).
pub const TRIGGER_WORDS: &[&str] = &[
    "recommend",
    "suggest",
    "easy",
    "hard",
    "difficult",
    "worst",
    "best",
    "course",
    "class",
];

/// A message containing any of these is a "hard query": the caller wants
/// difficult courses, so ranking flips to lowest-average-first.
pub const HARD_WORDS: &[&str] = &[
    "hard",
    "difficult",
    "challenging",
    "complex",
    "worst",
    "lowest",
    "advanced",
];
