// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (client identification, response headers).

pub mod client;
pub mod security;

pub use client::{identify_client, ClientId};
