// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Track-Packager: bundle an outdoor route into a downloadable archive
//!
//! This crate provides the backend for the route submission form: it turns
//! the loosely-typed form fields into a canonical `track-info.json` record
//! and packages it together with the uploaded map, elevation profile, GPX
//! track and gallery images into a single zip.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::GenerationTracker;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub generation: GenerationTracker,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            generation: GenerationTracker::new(),
        }
    }
}
