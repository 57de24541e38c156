// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Generation status route.

use crate::middleware::ClientId;
use crate::models::GenerationState;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generation/status", get(get_status))
}

/// Generation state of the calling client, so the form can disable its
/// trigger while an archive is being built.
async fn get_status(
    State(state): State<Arc<AppState>>,
    Extension(client): Extension<ClientId>,
) -> Json<GenerationState> {
    Json(state.generation.state(client.as_str()))
}
