// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client identification middleware.
//!
//! Generation state is tracked per client. The browser form sends a stable
//! `X-Client-Id` header. Requests without a usable one get a fresh
//! per-request identity, so anonymous callers never block each other.

use axum::{extract::Request, middleware::Next, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};

pub const CLIENT_ID_HEADER: &str = "x-client-id";
const MAX_CLIENT_ID_LEN: usize = 128;

/// Anonymous ids start with `#`, which header ids may not contain.
const ANONYMOUS_PREFIX: &str = "#anonymous-";

static NEXT_ANONYMOUS: AtomicU64 = AtomicU64::new(1);

/// Client identity extracted from the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientId(String);

fn is_valid_header_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_CLIENT_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':'))
}

impl ClientId {
    /// Resolve a header value. Blank, oversized or malformed ids are
    /// treated as absent.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| is_valid_header_id(v)) {
            Some(id) => Self(id.to_string()),
            None => Self::anonymous(),
        }
    }

    /// A new identity unique to this process.
    pub fn anonymous() -> Self {
        let n = NEXT_ANONYMOUS.fetch_add(1, Ordering::Relaxed);
        Self(format!("{ANONYMOUS_PREFIX}{n}"))
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.starts_with(ANONYMOUS_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Attach a [`ClientId`] extension to every request.
pub async fn identify_client(mut request: Request, next: Next) -> Response {
    let client_id = ClientId::from_header(
        request
            .headers()
            .get(CLIENT_ID_HEADER)
            .and_then(|h| h.to_str().ok()),
    );
    request.extensions_mut().insert(client_id);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_header() {
        assert_eq!(ClientId::from_header(Some(" tab-1 ")).as_str(), "tab-1");
        assert!(!ClientId::from_header(Some("tab-1")).is_anonymous());

        assert!(ClientId::from_header(Some("")).is_anonymous());
        assert!(ClientId::from_header(None).is_anonymous());

        let long = "x".repeat(MAX_CLIENT_ID_LEN + 1);
        assert!(ClientId::from_header(Some(&long)).is_anonymous());
    }

    #[test]
    fn test_anonymous_ids_are_distinct() {
        let a = ClientId::from_header(None);
        let b = ClientId::from_header(None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_header_cannot_claim_anonymous_id() {
        let anonymous = ClientId::anonymous();
        let spoofed = ClientId::from_header(Some(anonymous.as_str()));
        assert_ne!(spoofed, anonymous);
        assert!(ClientId::from_header(Some("a b")).is_anonymous());
    }
}
