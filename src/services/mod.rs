// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod archive;
pub mod generation;
pub mod metadata;
pub mod slug;

pub use archive::{assemble, join_missing, Archive, PackagedArchive, PackagingError, RequiredFile};
pub use generation::{GenerationError, GenerationTicket, GenerationTracker};
pub use metadata::{synthesize, SynthesisOptions};
