//! Full-response page cache
//!
//! Middleware that stores successful `GET`/`HEAD` responses in the cache
//! backend and replays them until they expire. Responses also advertise the
//! page lifetime through `Cache-Control`.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE, HOST},
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::handlers::AppState;
use crate::cache::MAX_VALUE_SIZE;
#[cfg(test)]
use crate::cache::MAX_KEY_LENGTH;
use crate::error::{AppError, Result};

/// Default lifetime of a cached page: fifteen minutes.
pub const PAGE_TTL: Duration = Duration::from_secs(900);

/// What is kept of a response in the cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPage {
    status: u16,
    content_type: Option<String>,
    body: String,
}

impl IntoResponse for CachedPage {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        let mut response = (status, self.body).into_response();

        if let Some(content_type) = self
            .content_type
            .and_then(|ct| HeaderValue::from_str(&ct).ok())
        {
            response.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        response
    }
}

/// Cache key for a request: method, host and full URI including the query.
pub fn page_cache_key(request: &Request) -> String {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    page_key(request.method(), host, &request.uri().to_string())
}

/// Fixed-length key: the method stays readable, host and URI are hashed so
/// arbitrarily long query strings fit the backend's key limit.
pub fn page_key(method: &Method, host: &str, uri: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update((host.len() as u64).to_le_bytes());
    hasher.update(host.as_bytes());
    hasher.update(uri.as_bytes());
    format!("page:{}:{:x}", method, hasher.finalize())
}

// == Page Cache Middleware ==
pub async fn page_cache(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return Ok(next.run(request).await);
    }

    let key = page_cache_key(&request);

    if let Some(cached) = state.cache.fetch(&key).await? {
        let page: CachedPage = serde_json::from_str(&cached)?;
        debug!("Page cache hit for {}", key);
        return Ok(with_cache_control(page.into_response(), state.page_ttl));
    }

    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_VALUE_SIZE)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to buffer response body: {}", e)))?;

    let response = match String::from_utf8(bytes.to_vec()) {
        Ok(body) => {
            let page = CachedPage {
                status: parts.status.as_u16(),
                content_type: parts
                    .headers
                    .get(CONTENT_TYPE)
                    .and_then(|ct| ct.to_str().ok())
                    .map(str::to_string),
                body,
            };
            // A page that cannot be cached is still served
            match serde_json::to_string(&page) {
                Ok(encoded) => match state.cache.store(&key, encoded, state.page_ttl).await {
                    Ok(()) => debug!("Page cached for {}", key),
                    Err(e) => warn!("Page not cached for {}: {}", key, e),
                },
                Err(e) => warn!("Page not cached for {}: {}", key, e),
            }
            Response::from_parts(parts, Body::from(page.body))
        }
        // Binary bodies are passed through uncached
        Err(e) => Response::from_parts(parts, Body::from(e.into_bytes())),
    };

    Ok(with_cache_control(response, state.page_ttl))
}

fn with_cache_control(mut response: Response, ttl: Duration) -> Response {
    if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", ttl.as_secs())) {
        response.headers_mut().insert(CACHE_CONTROL, value);
    }
    response
}
