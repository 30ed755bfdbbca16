use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default course-level band applied to a profile before any level intent
/// has been expressed: effectively "no level filter".
pub const DEFAULT_MIN_LEVEL: i32 = 0;
pub const DEFAULT_MAX_LEVEL: i32 = 900;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub subject: Option<String>,
    pub min_level: i32,
    pub max_level: i32,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub fn profile(&self) -> SearchProfile {
        SearchProfile {
            subject: self.subject.clone(),
            min_level: self.min_level,
            max_level: self.max_level,
        }
    }
}

/// Per-user search context carried across conversation turns.
///
/// Deliberately a fixed-shape record, not an open key-value bag: only these
/// three fields are ever read, and a closed shape cannot drift silently.
/// Invariant: `min_level <= max_level`; the band is either the default or
/// one of the lexicon bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchProfile {
    /// Canonical subject code, e.g. "COMP". Unset until first resolved.
    pub subject: Option<String>,
    pub min_level: i32,
    pub max_level: i32,
}

impl Default for SearchProfile {
    fn default() -> Self {
        Self {
            subject: None,
            min_level: DEFAULT_MIN_LEVEL,
            max_level: DEFAULT_MAX_LEVEL,
        }
    }
}
