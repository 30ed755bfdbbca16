use std::collections::hash_map::Entry;
use std::collections::HashMap;

use anyhow::{Context, Result};
use serde_json::json;
use sqlx::PgPool;
use tracing::info;

use crate::models::course::CourseRow;

/// Returns the full catalog in a stable order. Rows are immutable for the
/// duration of one ranking call.
pub async fn all(pool: &PgPool) -> Result<Vec<CourseRow>, sqlx::Error> {
    sqlx::query_as::<_, CourseRow>("SELECT * FROM courses ORDER BY code")
        .fetch_all(pool)
        .await
}

pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await
}

/// One usable line of the crowd-sourcing CSV.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCatalogRow {
    pub code: String,
    pub term: String,
    pub class_average: f64,
    pub credits: i32,
}

/// Parses one CSV line of the class-average feed, or rejects it.
///
/// Usable rows look like:
///   ACCT351-201601,ACCT351,W2016,B,3.00,3.00,#REF!
///
/// The feed has messy headers and partial rows, so validation is structural:
/// a course code of at least 6 characters with a 4-letter alphabetic prefix,
/// and a numeric grade column. Anything else is skipped silently.
pub fn parse_catalog_row(line: &str) -> Option<ParsedCatalogRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 6 {
        return None;
    }

    let code = fields[1].trim().to_uppercase();
    if code.len() < 6 || !code.chars().take(4).all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let class_average: f64 = fields[4].trim().parse().ok()?;
    let credits_field = fields[5].trim();
    let credits = if credits_field.is_empty() {
        3
    } else {
        credits_field.parse::<f64>().ok()? as i32
    };

    Some(ParsedCatalogRow {
        code,
        term: fields[2].trim().to_string(),
        class_average,
        credits,
    })
}

/// Running merge for duplicate course rows (one per term in the feed):
/// a simple average of averages, kept at two decimals.
pub fn merge_average(existing: f64, incoming: f64) -> f64 {
    (((existing + incoming) / 2.0) * 100.0).round() / 100.0
}

/// Folds all usable CSV lines into one record per course code. Duplicates
/// merge their averages pairwise in feed order and keep the latest term.
pub fn parse_catalog(text: &str) -> HashMap<String, ParsedCatalogRow> {
    let mut merged: HashMap<String, ParsedCatalogRow> = HashMap::new();
    for line in text.lines() {
        let Some(row) = parse_catalog_row(line) else {
            continue;
        };
        match merged.entry(row.code.clone()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.class_average = merge_average(existing.class_average, row.class_average);
                if row.term > existing.term {
                    existing.term = row.term;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(row);
            }
        }
    }
    merged
}

/// Bulk loader: replaces the catalog with the contents of the CSV at `path`.
/// Returns the number of unique courses written.
pub async fn seed_from_csv(pool: &PgPool, path: &str) -> Result<usize> {
    let raw = std::fs::read(path).with_context(|| format!("CSV file not found: {path}"))?;
    let text = String::from_utf8_lossy(&raw);

    info!("Clearing old course data...");
    sqlx::query("DELETE FROM courses").execute(pool).await?;

    info!("Reading {path}...");
    let merged = parse_catalog(&text);

    for (code, row) in &merged {
        sqlx::query(
            r#"
            INSERT INTO courses (code, title, class_average, credits, term, metadata)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(code)
        // The feed carries no titles; the code doubles as one.
        .bind(format!("{code} (Crowdsourced)"))
        .bind(row.class_average)
        .bind(row.credits)
        .bind(&row.term)
        .bind(json!({}))
        .execute(pool)
        .await?;
    }

    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_row() {
        let row = parse_catalog_row("ACCT351-201601,ACCT351,W2016,B,3.00,3.00,#REF!").unwrap();
        assert_eq!(row.code, "ACCT351");
        assert_eq!(row.term, "W2016");
        assert_eq!(row.class_average, 3.0);
        assert_eq!(row.credits, 3);
    }

    #[test]
    fn test_parse_rejects_short_row() {
        assert!(parse_catalog_row("COMP202,W2019").is_none());
    }

    #[test]
    fn test_parse_rejects_header_row() {
        // Non-numeric grade column
        assert!(parse_catalog_row("Section,Course,Term,Letter,GPA,Credits,Notes").is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_code() {
        // Prefix shorter than 4 alphabetic characters
        assert!(parse_catalog_row("X1-201601,X1,W2016,B,3.00,3.00,").is_none());
        // Digits inside the prefix
        assert!(parse_catalog_row("C0MP202-1,C0MP202,W2016,B,3.00,3.00,").is_none());
    }

    #[test]
    fn test_parse_lowercase_code_is_uppercased() {
        let row = parse_catalog_row("comp202-201901,comp202,F2019,A,3.70,3.00,").unwrap();
        assert_eq!(row.code, "COMP202");
    }

    #[test]
    fn test_parse_empty_credits_defaults_to_three() {
        let row = parse_catalog_row("COMP202-201901,COMP202,F2019,A,3.70,,").unwrap();
        assert_eq!(row.credits, 3);
    }

    #[test]
    fn test_merge_average_rounds_to_two_decimals() {
        assert_eq!(merge_average(3.0, 3.33), 3.17);
        assert_eq!(merge_average(3.5, 3.5), 3.5);
    }

    #[test]
    fn test_parse_catalog_merges_duplicates() {
        let text = "\
COMP202-201901,COMP202,F2019,A,3.00,3.00,
COMP202-202001,COMP202,W2020,A,3.50,3.00,
MATH240-201901,MATH240,F2019,B,2.80,3.00,";
        let merged = parse_catalog(text);
        assert_eq!(merged.len(), 2);

        let comp = &merged["COMP202"];
        assert_eq!(comp.class_average, 3.25);
        assert_eq!(comp.term, "W2020");
    }

    #[test]
    fn test_parse_catalog_skips_garbage_lines() {
        let text = "\
,,,,,
junk
COMP202-201901,COMP202,F2019,A,3.00,3.00,";
        assert_eq!(parse_catalog(text).len(), 1);
    }
}
