//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Year and month label shown on post cards
///
/// # Examples
/// ```ignore
/// month_label(&date) // -> "2024 • 01"
/// ```
pub fn month_label<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y • %m").to_string()
}

/// Format a date in ISO 8601 / XML format
pub fn date_xml<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Format date in full format (like "January 1, 2024")
pub fn full_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%B %-d, %Y").to_string()
}
