// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route metadata synthesis.
//!
//! Builds a [`TrackRecord`] from raw form strings. Synthesis is total:
//! empty or malformed input degrades into well-formed but degenerate fields
//! instead of failing.

use crate::models::form::{Difficulty, RouteForm, Sport};
use crate::models::track::{About, StatEntry, Stats, TrackRecord, GPX_FILE_REF, PREVIEW_IMAGE_REF};
use crate::services::slug;
use crate::time_utils::{format_slovak_date, utc_date};
use chrono::{DateTime, Utc};

const ABOUT_TITLE: &str = "O tejto trase";

/// Options that are not part of the form itself.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    /// Region the catalog files routes under
    pub location_region: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            location_region: "slovakia".to_string(),
        }
    }
}

/// Split comma-separated tags, trimming each and dropping blanks.
///
/// Order and duplicates are preserved.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Parse the leading decimal number of a string, ignoring anything after it.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, an optional exponent and `Infinity`. Returns
/// NaN when no number is present.
pub fn parse_leading_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Synthesize the route record for a form at the given instant.
///
/// Deterministic for a fixed `(form, now, options)`.
pub fn synthesize(form: &RouteForm, now: DateTime<Utc>, options: &SynthesisOptions) -> TrackRecord {
    let id = slug::normalize(&form.name);
    let difficulty = Difficulty::parse(&form.difficulty);
    let sport = Sport::parse(&form.category);

    let distance_display = format!("{} km", form.distance);
    let elevation_display = format!("{}m", form.elevation);
    let created_at = utc_date(now);

    let about = About {
        title: ABOUT_TITLE.to_string(),
        created_text: format!("Vytvorené dňa {}", format_slovak_date(created_at)),
        experience_text: format!(
            "Táto trasa ponúka zážitok {} úrovne, ideálny pre nadšencov {}.",
            difficulty.label(),
            sport.label()
        ),
    };

    let stats = Stats {
        distance: StatEntry::new("📏", "Vzdialenosť", distance_display.clone()),
        duration: StatEntry::new("⏱️", "Trvanie", form.duration.clone()),
        elevation: StatEntry::new("⛰️", "Prevýšenie", elevation_display.clone()),
        start_point: StatEntry::new("📍", "START", form.location.clone()),
    };

    tracing::debug!(track_id = %id, sport = sport.as_str(), "Synthesized track record");

    TrackRecord {
        id,
        name: form.name.clone(),
        description: form.description.clone(),
        sport,
        distance_display,
        distance_value: parse_leading_float(&form.distance),
        difficulty,
        location: form.location.clone(),
        location_region: options.location_region.clone(),
        duration: form.duration.clone(),
        elevation_display,
        preview_image_ref: PREVIEW_IMAGE_REF.to_string(),
        gpx_file_ref: GPX_FILE_REF.to_string(),
        map_url: String::new(),
        tags: parse_tags(&form.tags),
        created_at,
        about,
        stats,
    }
}
