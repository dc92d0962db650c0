//! Time related utils.

use crate::{Error, Result};
use chrono::Utc;

/// DateTime in UTC, the only timezone signing cares about.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into RFC 1123 date used by `x-ms-date`: "Wed, 01 Jan 2014 00:00:00 GMT"
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an RFC 1123 date such as "Wed, 01 Jan 2014 00:00:00 GMT".
pub fn parse_http_date(s: &str) -> Result<DateTime> {
    let t = chrono::DateTime::parse_from_rfc2822(s).map_err(|e| {
        Error::unexpected("failed to parse http date")
            .with_source(e)
            .with_context(format!("value: {s}"))
    })?;
    Ok(t.with_timezone(&Utc))
}
