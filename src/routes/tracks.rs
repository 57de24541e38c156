// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track preview and packaging routes.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::ClientId;
use crate::models::{RouteForm, TrackRecord, UploadSlot, UploadedFile, UploadedFiles};
use crate::services::{assemble, synthesize, PackagedArchive};
use crate::AppState;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Track routes. The upload limit applies to the packaging endpoint only.
pub fn routes(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tracks/preview", post(preview_track))
        .route(
            "/api/tracks/package",
            post(package_track).layer(DefaultBodyLimit::max(config.max_upload_bytes)),
        )
}

fn validate_form(form: &RouteForm) -> Result<()> {
    form.validate()
        .map_err(|e| AppError::BadRequest(format!("Neplatný formulár: {e}")))
}

// ─── Preview ─────────────────────────────────────────────────

/// Synthesized record plus the icons the form shows next to it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrackPreview {
    pub track: TrackRecord,
    pub difficulty_icon: String,
    pub sport_icon: String,
}

/// Preview the `track-info.json` content for the current form state.
async fn preview_track(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RouteForm>,
) -> Result<Json<TrackPreview>> {
    validate_form(&form)?;

    let track = synthesize(&form, chrono::Utc::now(), &state.config.synthesis_options());
    Ok(Json(TrackPreview {
        difficulty_icon: track.difficulty.icon().to_string(),
        sport_icon: track.sport.icon().to_string(),
        track,
    }))
}

// ─── Packaging ───────────────────────────────────────────────

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", err.body_text()))
    }
}

/// Split a multipart body into form fields and uploads.
///
/// Unknown fields are ignored. File inputs the user left empty arrive as
/// parts with no file name and no content and are skipped.
async fn read_package_request(mut multipart: Multipart) -> Result<(RouteForm, UploadedFiles)> {
    let mut form = RouteForm::default();
    let mut files = UploadedFiles::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(slot) = UploadSlot::from_field_name(&name) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            files.insert(slot, UploadedFile::new(file_name, bytes.to_vec()));
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            if !form.set_field(&name, value) {
                tracing::debug!(field = %name, "Ignoring unknown form field");
            }
        }
    }

    Ok((form, files))
}

/// Build the archive for one request.
async fn build_package(state: &AppState, multipart: Multipart) -> Result<PackagedArchive> {
    let (form, files) = read_package_request(multipart).await?;
    validate_form(&form)?;

    let record = synthesize(&form, chrono::Utc::now(), &state.config.synthesis_options());
    if record.id.is_empty() {
        return Err(AppError::BadRequest(
            "Názov trasy musí obsahovať aspoň jedno písmeno alebo číslicu".to_string(),
        ));
    }
    tracing::info!(
        track_id = %record.id,
        gallery = files.gallery.len(),
        "Packaging track"
    );

    // Compression is CPU-bound; keep it off the async workers.
    tokio::task::spawn_blocking(move || assemble(&record, files)?.package())
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Packaging task failed: {e}")))?
        .map_err(AppError::from)
}

fn archive_response(archive: PackagedArchive) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
    (
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.bytes,
    )
        .into_response()
}

/// Package the route form and uploads into a downloadable zip.
///
/// Runs under the client's generation state: a second request from the
/// same client while one is in flight gets 409.
async fn package_track(
    State(state): State<Arc<AppState>>,
    Extension(client): Extension<ClientId>,
    multipart: Multipart,
) -> Result<Response> {
    let ticket = state.generation.begin(client.as_str())?;

    let result = build_package(&state, multipart).await;
    ticket.finish(&result.as_ref().map_err(AppError::user_message));

    Ok(archive_response(result?))
}
