// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::services::{join_missing, GenerationError, PackagingError, RequiredFile};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// User-facing message for missing required uploads.
pub const MISSING_FILES_MESSAGE: &str = "Chýbajú povinné súbory (mapa, profil alebo GPX)";
/// User-facing message for any other generation failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Nastala chyba pri generovaní ZIP súboru";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Missing required files: {}", join_missing(.0))]
    MissingRequiredFiles(Vec<RequiredFile>),

    #[error("Upload exceeds the size limit")]
    PayloadTooLarge,

    #[error("Archive generation already in progress")]
    Busy,

    #[error("Archive packaging error: {0}")]
    Packaging(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::MissingRequiredFiles(missing) => {
                format!("{MISSING_FILES_MESSAGE}: {}", join_missing(missing))
            }
            AppError::PayloadTooLarge => "Nahrané súbory sú príliš veľké".to_string(),
            AppError::Busy => "Generovanie ZIP súboru už prebieha".to_string(),
            AppError::Packaging(_) | AppError::Internal(_) => GENERATION_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<PackagingError> for AppError {
    fn from(err: PackagingError) -> Self {
        match err {
            PackagingError::MissingRequiredFiles(missing) => AppError::MissingRequiredFiles(missing),
            other => AppError::Packaging(other.to_string()),
        }
    }
}

impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Busy => AppError::Busy,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::MissingRequiredFiles(missing) => {
                tracing::warn!(missing = %join_missing(missing), "Archive requested without required files");
                (StatusCode::UNPROCESSABLE_ENTITY, "missing_required_files")
            }
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Busy => (StatusCode::CONFLICT, "generation_in_progress"),
            AppError::Packaging(msg) => {
                tracing::error!(error = %msg, "Archive packaging error");
                (StatusCode::INTERNAL_SERVER_ERROR, "packaging_error")
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details: Some(self.user_message()),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
