use chrono::{Local, NaiveDate};

/// Resolves the dashboard's optional `YYYY-MM-DD` date query value. A missing
/// or unparseable value falls back to the current date.
#[must_use]
pub fn requested_date(query: Option<&str>) -> NaiveDate {
    query
        .and_then(|value| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
        .unwrap_or_else(|| Local::now().date_naive())
}
