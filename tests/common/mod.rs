// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use std::sync::Arc;
use track_packager::config::Config;
use track_packager::routes::create_router;
use track_packager::AppState;

const BOUNDARY: &str = "----track-packager-test-boundary";

/// Create a test app with default configuration.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config));
    (create_router(state.clone()), state)
}

/// Minimal multipart/form-data body builder.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

#[allow(dead_code)]
impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Route form fields of the "Rysy Okruh" example route.
    pub fn rysy_form(self) -> Self {
        self.text("name", "Rysy Okruh")
            .text("category", "hiking")
            .text("difficulty", "hard")
            .text("distance", "18")
            .text("elevation", "1200")
            .text("duration", "6h")
            .text("location", "Tatry")
            .text("description", "Výstup na Rysy zo Štrbského Plesa")
            .text("tags", " hory, , tatry ")
    }

    /// The three required uploads.
    pub fn required_files(self) -> Self {
        self.file("map", "map.jpg", b"MAP-BYTES")
            .file("profile", "profile.png", b"PROFILE-BYTES")
            .file("gpx", "rysy.gpx", b"<gpx></gpx>")
    }

    pub fn into_request(self, client_id: Option<&str>) -> Request<Body> {
        let mut body = self.body;
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/tracks/package")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(id) = client_id {
            builder = builder.header("X-Client-Id", id);
        }
        builder.body(Body::from(body)).unwrap()
    }
}

/// Read a whole response body.
#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body")
        .to_vec()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("Body is not JSON")
}
