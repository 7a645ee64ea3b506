//! In-process cache for GET responses.
//!
//! Successful (200) GET responses are stored under their path and query for a
//! fixed TTL. The stream endpoint is never cached, and a successful write
//! clears everything so searches see newly created programs. Expired entries
//! are swept on insert at most once per TTL.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;

/// Path prefix of the stream endpoint, excluded from caching.
pub const STREAM_PATH: &str = "/ws";

/// Header reporting whether a response came from the cache.
pub static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

#[derive(Debug, Clone)]
struct CachedResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    stored_at: Instant,
}

impl CachedResponse {
    fn to_response(&self) -> Response {
        let mut response = Response::new(Body::from(self.body.clone()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
            .headers_mut()
            .insert(X_CACHE.clone(), HeaderValue::from_static("HIT"));
        response
    }
}

/// TTL cache of rendered responses keyed by path and query.
///
/// Every [`clear`](Self::clear) advances a generation counter. A response is
/// only kept if no clear happened between reading the generation and storing
/// it, so a search that raced a write never outlives that write.
#[derive(Debug)]
pub struct ResponseCache {
    entries: DashMap<String, CachedResponse>,
    ttl: Duration,
    generation: AtomicU64,
    last_sweep: Mutex<Instant>,
}

impl ResponseCache {
    /// Creates a cache whose entries expire after `ttl`. A zero TTL disables it.
    pub fn new(ttl: Duration) -> Self {
        ResponseCache {
            entries: DashMap::new(),
            ttl,
            generation: AtomicU64::new(0),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// A cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current generation; read it before producing a response to store.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Drops every entry and invalidates responses still being produced.
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.clear();
    }

    fn lookup(&self, key: &str) -> Option<CachedResponse> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                return Some(entry.value().clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Stores a response produced under `generation`. Returns `false` if a
    /// clear happened since, in which case nothing is kept.
    fn store(
        &self,
        generation: u64,
        key: String,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> bool {
        if self.generation() != generation {
            return false;
        }
        self.sweep_expired();
        self.entries.insert(
            key.clone(),
            CachedResponse {
                status,
                headers,
                body,
                stored_at: Instant::now(),
            },
        );
        // A clear that started after the check above may have missed the insert.
        if self.generation() != generation {
            self.entries.remove(&key);
            return false;
        }
        true
    }

    fn sweep_expired(&self) {
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if last_sweep.elapsed() < self.ttl {
            return;
        }
        *last_sweep = Instant::now();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < ttl);
    }
}

fn is_cacheable_path(path: &str) -> bool {
    !path.starts_with(STREAM_PATH)
}

/// Middleware serving GET requests from [`ResponseCache`].
///
/// Install with `axum::middleware::from_fn_with_state`.
pub async fn cache_responses(
    State(cache): State<Arc<ResponseCache>>,
    request: Request,
    next: Next,
) -> Response {
    if !cache.is_enabled() || !is_cacheable_path(request.uri().path()) {
        return next.run(request).await;
    }

    if request.method() != Method::GET {
        let writes = !request.method().is_safe();
        let response = next.run(request).await;
        if writes && response.status().is_success() {
            cache.clear();
        }
        return response;
    }

    let key = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    if let Some(hit) = cache.lookup(&key) {
        tracing::debug!(key = %key, "cache hit");
        return hit.to_response();
    }

    let generation = cache.generation();
    let response = next.run(request).await;
    if response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "failed to buffer response for cache");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let headers = parts.headers.clone();
    if !cache.store(generation, key, parts.status, headers, bytes.clone()) {
        tracing::debug!("cache cleared while responding; response not stored");
    }
    parts
        .headers
        .insert(X_CACHE.clone(), HeaderValue::from_static("MISS"));
    Response::from_parts(parts, Body::from(bytes))
}
