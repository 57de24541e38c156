// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route archive assembly and packaging.
//!
//! Assembly validates the required uploads and lays out the archive entries
//! under their fixed names. Packaging then deflates those entries into a
//! single zip blob. Entry names are a contract with the route renderer:
//! map and profile images are always stored as `.png` whatever their
//! actual type.

use crate::models::track::TrackRecord;
use crate::models::upload::UploadedFiles;
use std::fmt;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const TRACK_INFO_ENTRY: &str = "track-info.json";
pub const PREVIEW_ENTRY: &str = "preview.png";
pub const PROFILE_ENTRY: &str = "profil.png";
pub const GPX_ENTRY: &str = "track.gpx";

/// One of the uploads an archive cannot be built without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredFile {
    Map,
    Profile,
    Gpx,
}

impl fmt::Display for RequiredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredFile::Map => "mapa",
            RequiredFile::Profile => "profil",
            RequiredFile::Gpx => "GPX",
        };
        f.write_str(name)
    }
}

/// A named archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Ordered set of archive entries, fixed once assembled.
#[derive(Debug, Clone)]
pub struct Archive {
    file_name: String,
    entries: Vec<ArchiveEntry>,
}

/// Packaged zip ready for download.
#[derive(Debug, Clone)]
pub struct PackagedArchive {
    /// Suggested download name, `<id>.zip`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Errors from archive assembly and packaging.
#[derive(Debug, thiserror::Error)]
pub enum PackagingError {
    #[error("Missing required files: {}", join_missing(.0))]
    MissingRequiredFiles(Vec<RequiredFile>),

    #[error("Failed to write archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to write archive entry: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize track info: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Comma-separated display names of missing uploads.
pub fn join_missing(missing: &[RequiredFile]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl PackagingError {
    /// Whether the user can fix this by supplying the missing uploads.
    pub fn is_missing_files(&self) -> bool {
        matches!(self, PackagingError::MissingRequiredFiles(_))
    }
}

impl Archive {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Deflate all entries into a zip blob, in insertion order.
    pub fn package(self) -> Result<PackagedArchive, PackagingError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for entry in &self.entries {
            writer.start_file(entry.name.as_str(), options)?;
            writer.write_all(&entry.bytes)?;
        }

        let bytes = writer.finish()?.into_inner();
        tracing::info!(
            file_name = %self.file_name,
            entries = self.entries.len(),
            size = bytes.len(),
            "Packaged archive"
        );

        Ok(PackagedArchive {
            file_name: self.file_name,
            bytes,
        })
    }
}

/// Lay out the archive for a record and its uploads.
///
/// Fails before any entry is built if the map, profile or GPX upload is
/// absent. Gallery images are named `img<N>.<ext>` (1-based) keeping the
/// extension of their original file name.
pub fn assemble(record: &TrackRecord, files: UploadedFiles) -> Result<Archive, PackagingError> {
    let UploadedFiles {
        map,
        profile,
        gpx,
        gallery,
    } = files;

    let (map, profile, gpx) = match (map, profile, gpx) {
        (Some(map), Some(profile), Some(gpx)) => (map, profile, gpx),
        (map, profile, gpx) => {
            let missing = [
                (map.is_none(), RequiredFile::Map),
                (profile.is_none(), RequiredFile::Profile),
                (gpx.is_none(), RequiredFile::Gpx),
            ]
            .into_iter()
            .filter_map(|(absent, file)| absent.then_some(file))
            .collect();
            return Err(PackagingError::MissingRequiredFiles(missing));
        }
    };

    let track_info = serde_json::to_vec_pretty(record)?;

    let mut entries = Vec::with_capacity(4 + gallery.len());
    entries.push(ArchiveEntry {
        name: TRACK_INFO_ENTRY.to_string(),
        bytes: track_info,
    });
    entries.push(ArchiveEntry {
        name: PREVIEW_ENTRY.to_string(),
        bytes: map.bytes,
    });
    entries.push(ArchiveEntry {
        name: PROFILE_ENTRY.to_string(),
        bytes: profile.bytes,
    });
    entries.push(ArchiveEntry {
        name: GPX_ENTRY.to_string(),
        bytes: gpx.bytes,
    });
    for (index, image) in gallery.into_iter().enumerate() {
        entries.push(ArchiveEntry {
            name: format!("img{}.{}", index + 1, image.extension()),
            bytes: image.bytes,
        });
    }

    Ok(Archive {
        file_name: record.archive_file_name(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::RouteForm;
    use crate::models::upload::UploadedFile;
    use crate::services::metadata::{synthesize, SynthesisOptions};
    use chrono::{TimeZone, Utc};
    use std::io::Read;
    use zip::ZipArchive;

    fn record() -> TrackRecord {
        let form = RouteForm {
            name: "Malá Fatra".to_string(),
            category: "hiking".to_string(),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
        synthesize(&form, now, &SynthesisOptions::default())
    }

    fn required_files() -> UploadedFiles {
        UploadedFiles {
            map: Some(UploadedFile::new("map.jpeg", b"MAP".to_vec())),
            profile: Some(UploadedFile::new("profile.webp", b"PROFILE".to_vec())),
            gpx: Some(UploadedFile::new("route.gpx", b"<gpx/>".to_vec())),
            gallery: Vec::new(),
        }
    }

    #[test]
    fn test_entry_layout() {
        let mut files = required_files();
        files.gallery = vec![
            UploadedFile::new("a.jpg", b"A".to_vec()),
            UploadedFile::new("b.png", b"B".to_vec()),
        ];

        let archive = assemble(&record(), files).unwrap();

        assert_eq!(
            archive.entry_names(),
            vec![
                "track-info.json",
                "preview.png",
                "profil.png",
                "track.gpx",
                "img1.jpg",
                "img2.png"
            ]
        );
        assert_eq!(archive.file_name(), "mala-fatra.zip");
        assert_eq!(archive.entries()[1].bytes, b"MAP");
    }

    #[test]
    fn test_gallery_names_drop_client_paths() {
        let mut files = required_files();
        files.gallery = vec![
            UploadedFile::new("a./../../evil", b"E".to_vec()),
            UploadedFile::new("dir.v2/photo", b"P".to_vec()),
            UploadedFile::new("C:\\Fotky\\hrebeň.jpeg", b"J".to_vec()),
        ];

        let packaged = assemble(&record(), files).unwrap().package().unwrap();
        let mut zip = ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();

        assert_eq!(
            names,
            vec![
                "track-info.json",
                "preview.png",
                "profil.png",
                "track.gpx",
                "img1.evil",
                "img2.photo",
                "img3.jpeg"
            ]
        );
        assert!(names.iter().all(|n| !n.contains('/') && !n.contains('\\')));
    }

    #[test]
    fn test_missing_gpx_builds_nothing() {
        let mut files = required_files();
        files.gpx = None;

        let err = assemble(&record(), files).unwrap_err();
        assert!(err.is_missing_files());
        match err {
            PackagingError::MissingRequiredFiles(missing) => {
                assert_eq!(missing, vec![RequiredFile::Gpx])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_all_missing_reported() {
        let err = assemble(&record(), UploadedFiles::default()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required files: mapa, profil, GPX");
    }

    #[test]
    fn test_track_info_is_pretty_json() {
        let archive = assemble(&record(), required_files()).unwrap();
        let json = String::from_utf8(archive.entries()[0].bytes.clone()).unwrap();

        assert!(json.starts_with("{\n  \"id\": \"mala-fatra\""));
        assert!(json.contains("\n  \"sport\": \"hiking\""));
    }

    #[test]
    fn test_package_round_trips_through_zip_reader() {
        let mut files = required_files();
        files.gallery = vec![UploadedFile::new("photo", b"P".to_vec())];

        let packaged = assemble(&record(), files).unwrap().package().unwrap();
        assert_eq!(packaged.file_name, "mala-fatra.zip");

        let mut zip = ZipArchive::new(Cursor::new(packaged.bytes)).unwrap();
        let names: Vec<String> = (0..zip.len())
            .map(|i| zip.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["track-info.json", "preview.png", "profil.png", "track.gpx", "img1.photo"]
        );

        let mut gpx = String::new();
        zip.by_name("track.gpx")
            .unwrap()
            .read_to_string(&mut gpx)
            .unwrap();
        assert_eq!(gpx, "<gpx/>");

        let entry = zip.by_name("preview.png").unwrap();
        assert_eq!(entry.compression(), CompressionMethod::Deflated);
    }
}
