// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canonical route metadata written to `track-info.json`.
//!
//! Field names and nesting are a file format consumed by the route
//! renderer, so serde renames here must not change.

use crate::models::form::{Difficulty, Sport};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Archive-relative path of the map preview image.
pub const PREVIEW_IMAGE_REF: &str = "./preview.png";
/// Archive-relative path of the GPX track.
pub const GPX_FILE_REF: &str = "./track.gpx";

/// Fully synthesized route record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub sport: Sport,
    /// Raw distance with a ` km` suffix
    pub distance_display: String,
    /// Leading numeric part of the distance; NaN (JSON `null`) if none
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    #[serde(serialize_with = "serialize_json_number")]
    pub distance_value: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub difficulty: Difficulty,
    pub location: String,
    pub location_region: String,
    pub duration: String,
    /// Raw elevation with an `m` suffix
    pub elevation_display: String,
    pub preview_image_ref: String,
    pub gpx_file_ref: String,
    /// Reserved for an external map link
    pub map_url: String,
    pub tags: Vec<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: NaiveDate,
    pub about: About,
    pub stats: Stats,
}

/// "About this route" block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct About {
    pub title: String,
    pub created_text: String,
    pub experience_text: String,
}

/// Display-ready stat tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Stats {
    pub distance: StatEntry,
    pub duration: StatEntry,
    pub elevation: StatEntry,
    pub start_point: StatEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatEntry {
    pub icon: String,
    pub label: String,
    pub value: String,
}

impl StatEntry {
    pub fn new(icon: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Largest integer a JSON consumer can read back exactly as a double.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Write a number the way JavaScript's `JSON.stringify` does: whole values
/// without a fractional part (`18`, not `18.0`) and non-finite values as `null`.
fn serialize_json_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        serializer.serialize_none()
    } else if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl TrackRecord {
    /// Suggested download name for the packaged archive.
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.id)
    }
}
