//! This module contains all the sqlx structs for the database tables.

/// sqlx structs for partner table.
pub mod partner;
/// sqlx structs for session table.
pub mod session;
/// sqlx structs for app_user table.
pub mod user;

/// Current time in the format every `*_at` column is stored in.
///
/// Fixed-width UTC timestamps keep the text columns sortable.
#[must_use]
pub fn timestamp_now() -> String {
    format_timestamp(chrono::Utc::now())
}

/// Format a UTC datetime the way `*_at` columns store it.
#[must_use]
pub fn format_timestamp(datetime: chrono::DateTime<chrono::Utc>) -> String {
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
