// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format a BSON timestamp as RFC3339 for API responses.
pub fn format_bson_rfc3339(date: mongodb::bson::DateTime) -> String {
    let utc = DateTime::from_timestamp_millis(date.timestamp_millis()).unwrap_or_default();
    format_utc_rfc3339(utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bson_rfc3339() {
        let date = mongodb::bson::DateTime::from_millis(1_735_689_600_000);
        assert_eq!(format_bson_rfc3339(date), "2025-01-01T00:00:00Z");
    }
}
