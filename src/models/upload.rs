// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uploaded route assets.

/// A single uploaded file: its original name and raw content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Original file name as supplied by the client (used for extension only)
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Final path component of the file name, ignoring any client-side directories.
    pub fn base_name(&self) -> &str {
        self.name.rsplit(['/', '\\']).next().unwrap_or_default()
    }

    /// Text after the last `.` of the base name, or the whole base name if it has no dot.
    pub fn extension(&self) -> &str {
        self.base_name().rsplit('.').next().unwrap_or_default()
    }
}

/// The four upload slots of a route.
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles {
    /// Map image
    pub map: Option<UploadedFile>,
    /// Elevation profile image
    pub profile: Option<UploadedFile>,
    /// GPX track
    pub gpx: Option<UploadedFile>,
    /// Optional gallery images, in display order
    pub gallery: Vec<UploadedFile>,
}

/// Named upload slot, as addressed by a multipart field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadSlot {
    Map,
    Profile,
    Gpx,
    Gallery,
}

impl UploadSlot {
    /// Resolve a form field name, accepting the legacy Slovak names too.
    pub fn from_field_name(field: &str) -> Option<Self> {
        match field {
            "map" | "mapa" => Some(Self::Map),
            "profile" | "profil" => Some(Self::Profile),
            "gpx" => Some(Self::Gpx),
            "gallery" | "images" => Some(Self::Gallery),
            _ => None,
        }
    }
}

impl UploadedFiles {
    /// Place a file into its slot. Single-file slots keep the latest upload.
    pub fn insert(&mut self, slot: UploadSlot, file: UploadedFile) {
        match slot {
            UploadSlot::Map => self.map = Some(file),
            UploadSlot::Profile => self.profile = Some(file),
            UploadSlot::Gpx => self.gpx = Some(file),
            UploadSlot::Gallery => self.gallery.push(file),
        }
    }
}
