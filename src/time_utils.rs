// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, NaiveDate, Utc};

/// Calendar date of a UTC timestamp.
pub fn utc_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

/// Format a date the way Slovak locales print it, e.g. `5. 3. 2024`.
pub fn format_slovak_date(date: NaiveDate) -> String {
    date.format("%-d. %-m. %Y").to_string()
}
