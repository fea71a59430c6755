// Copyright 2025 cvbench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Request context middleware.
//!
//! Assigns every request an ID (taken from the `x-request-id` header when the
//! caller supplies one), injects a [`RequestContext`] into the request
//! extensions, echoes the ID on the response and logs one line per
//! completed request.

use axum::{
    extract::{FromRequestParts, Request},
    http::{request::Parts, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::convert::Infallible;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Per-request context available to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Caller-supplied or generated request ID.
    pub request_id: String,
}

impl RequestContext {
    fn generate() -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Middleware function establishing the [`RequestContext`].
pub async fn request_context_middleware(mut req: Request, next: Next) -> Response {
    let ctx = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| RequestContext {
            request_id: s.to_string(),
        })
        .unwrap_or_else(RequestContext::generate);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    req.extensions_mut().insert(ctx.clone());
    let mut response = next.run(req).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        response.headers_mut().insert(X_REQUEST_ID, value);
    }

    info!(
        request_id = %ctx.request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

/// Handlers running without the middleware get a fresh ID.
#[async_trait::async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(RequestContext::generate))
    }
}
