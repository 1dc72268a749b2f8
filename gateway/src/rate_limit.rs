//! Per-Client Rate Limiting
//!
//! ## Core Concepts
//! - **Token Bucket**: Each client owns a bucket holding up to `requests` tokens,
//!   refilled continuously at `requests / window`. A request spends one token.
//! - **Client Key**: The first `X-Forwarded-For` hop, else the peer IP address.
//! - **Lifecycle**: The limiter is created at startup and shared through router
//!   state. A background task evicts clients idle for 10 minutes; its handle is
//!   aborted at shutdown.

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use taxihub::drivers::protocol::ErrorResponse;
use tokio::task::JoinHandle;

pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const MAX_IDLE: Duration = Duration::from_secs(10 * 60);

const CODE_RATE_LIMITED: &str = "RATE_LIMIT_EXCEEDED";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitSettings {
    pub enabled: bool,
    /// Burst size and number of requests allowed per window.
    pub requests: u32,
    pub window: Duration,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
    last_seen: Instant,
}

pub struct RateLimiter {
    settings: RateLimitSettings,
    clients: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new(settings: RateLimitSettings) -> Arc<Self> {
        Arc::new(Self {
            settings,
            clients: DashMap::new(),
        })
    }

    pub fn settings(&self) -> RateLimitSettings {
        self.settings
    }

    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    /// Spends one token of `client`'s bucket as of `now`. Returns `false` when empty.
    pub fn check_at(&self, client: &str, now: Instant) -> bool {
        if !self.settings.enabled {
            return true;
        }

        let capacity = f64::from(self.settings.requests);
        let per_second = capacity / self.settings.window.as_secs_f64();

        let mut bucket = self
            .clients
            .entry(client.to_string())
            .or_insert_with(|| Bucket {
                tokens: capacity,
                last_refill: now,
                last_seen: now,
            });

        let elapsed = now.saturating_duration_since(bucket.last_refill);
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * per_second).min(capacity);
        bucket.last_refill = bucket.last_refill.max(now);
        bucket.last_seen = bucket.last_seen.max(now);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Drops clients not seen for longer than `max_idle`. Returns how many were dropped.
    pub fn evict_idle(&self, now: Instant, max_idle: Duration) -> usize {
        let before = self.clients.len();
        self.clients
            .retain(|_, bucket| now.saturating_duration_since(bucket.last_seen) <= max_idle);
        before.saturating_sub(self.clients.len())
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn spawn_cleanup(self: &Arc<Self>) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
            // The first tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let evicted = limiter.evict_idle(Instant::now(), MAX_IDLE);
                if evicted > 0 {
                    tracing::debug!(
                        "Evicted {} idle rate limit clients, {} remain",
                        evicted,
                        limiter.client_count()
                    );
                }
            }
        })
    }
}

/// Middleware rejecting requests with 429 once the client's bucket is empty.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(&req);

    if limiter.check(&client) {
        return next.run(req).await;
    }

    tracing::warn!("Rate limit exceeded for {}", client);
    (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::new(
            CODE_RATE_LIMITED,
            "too many requests, please try again later",
        )),
    )
        .into_response()
}

pub fn client_key(req: &Request) -> String {
    let forwarded = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|hop| !hop.is_empty());

    if let Some(hop) = forwarded {
        return hop.to_string();
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn limiter(requests: u32, window_secs: u64) -> Arc<RateLimiter> {
        RateLimiter::new(RateLimitSettings {
            enabled: true,
            requests,
            window: Duration::from_secs(window_secs),
        })
    }

    #[test]
    fn test_burst_then_reject() {
        let limiter = limiter(3, 60);
        let now = Instant::now();

        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(!limiter.check_at("10.0.0.1", now));
    }

    #[test]
    fn test_tokens_refill_over_time() {
        // One token every 20 seconds
        let limiter = limiter(3, 60);
        let start = Instant::now();
        for _ in 0..3 {
            assert!(limiter.check_at("client", start));
        }
        assert!(!limiter.check_at("client", start));

        assert!(!limiter.check_at("client", start + Duration::from_secs(10)));
        assert!(limiter.check_at("client", start + Duration::from_secs(21)));
        assert!(!limiter.check_at("client", start + Duration::from_secs(22)));

        // Never refills beyond capacity
        let later = start + Duration::from_secs(3600);
        for _ in 0..3 {
            assert!(limiter.check_at("client", later));
        }
        assert!(!limiter.check_at("client", later));
    }

    #[test]
    fn test_clients_are_isolated() {
        let limiter = limiter(1, 60);
        let now = Instant::now();

        assert!(limiter.check_at("a", now));
        assert!(!limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
        assert_eq!(limiter.client_count(), 2);
    }

    #[test]
    fn test_disabled_admits_everything() {
        let limiter = RateLimiter::new(RateLimitSettings {
            enabled: false,
            requests: 1,
            window: Duration::from_secs(60),
        });

        for _ in 0..1000 {
            assert!(limiter.check("a"));
        }
        assert_eq!(limiter.client_count(), 0);
    }

    #[test]
    fn test_idle_clients_are_evicted() {
        let limiter = limiter(5, 60);
        let start = Instant::now();
        limiter.check_at("idle", start);
        limiter.check_at("active", start);
        limiter.check_at("active", start + Duration::from_secs(9 * 60));

        let evicted = limiter.evict_idle(start + Duration::from_secs(11 * 60), MAX_IDLE);

        assert_eq!(evicted, 1);
        assert_eq!(limiter.client_count(), 1);
        // An evicted client starts over with a full bucket
        assert!(limiter.check_at("idle", start + Duration::from_secs(11 * 60)));
    }

    #[test]
    fn test_client_key_prefers_forwarded_for() {
        let req = HttpRequest::builder()
            .header("x-forwarded-for", " 203.0.113.7 , 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&req), "203.0.113.7");

        let mut req = HttpRequest::builder().body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 51000))));
        assert_eq!(client_key(&req), "192.168.1.20");

        let req = HttpRequest::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&req), "unknown");
    }
}
