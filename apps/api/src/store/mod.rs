//! Thin storage adapters over PostgreSQL. One module per table; all
//! functions take `&PgPool` so callers stay free of connection plumbing.

pub mod courses;
pub mod messages;
pub mod users;
