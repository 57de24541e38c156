// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Archive generation state token.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lifecycle of one client's archive generation.
///
/// `Generating` blocks re-entry; every other state accepts a new request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum GenerationState {
    #[default]
    Idle,
    Generating,
    Succeeded,
    /// Carries the user-facing error message of the last attempt
    Failed(String),
}

impl GenerationState {
    pub fn is_generating(&self) -> bool {
        matches!(self, Self::Generating)
    }

    /// Transition into `Generating`, or `None` if a generation is already running.
    pub fn begin(&self) -> Option<Self> {
        if self.is_generating() {
            None
        } else {
            Some(Self::Generating)
        }
    }

    /// Final state for a completed attempt.
    pub fn finish<T, E: ToString>(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => Self::Succeeded,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}
