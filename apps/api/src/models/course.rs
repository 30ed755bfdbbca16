use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// One catalog row. A course participates in ranking only if a numeric level
/// parses from `code` and `class_average` is present and non-zero.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CourseRow {
    /// Canonical identifier: alphabetic subject prefix + numeric level, e.g. "COMP202".
    pub code: String,
    pub title: String,
    /// Crowd-sourced mean grade in [0, 4]. None or 0 means "no usable signal".
    pub class_average: Option<f64>,
    pub credits: i32,
    pub term: String,
    /// Extra feed fields carried through; not used by ranking.
    pub metadata: Value,
}
