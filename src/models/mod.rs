// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod form;
pub mod generation;
pub mod track;
pub mod upload;

pub use form::{Difficulty, RouteForm, Sport};
pub use generation::GenerationState;
pub use track::{About, StatEntry, Stats, TrackRecord};
pub use upload::{UploadSlot, UploadedFile, UploadedFiles};
