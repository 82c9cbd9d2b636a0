//! In-memory request rate limiting for the API surface.
//!
//! Fixed window per client IP and path prefix. Expired windows are reset
//! lazily on the next request from the same key; there is no background
//! sweeper. Every response, limited or not, carries a fresh `x-request-id`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

/// One rate limit rule.
#[derive(Debug, Clone, Copy)]
pub struct RateRule {
    pub max: u32,
    pub window: Duration,
}

/// Prefix-keyed limit table, checked in order (list tighter prefixes first).
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub rules: Vec<(String, RateRule)>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                (
                    "/api/chat".to_string(),
                    RateRule {
                        max: 20,
                        window: Duration::from_secs(60),
                    },
                ),
                (
                    "/api".to_string(),
                    RateRule {
                        max: 100,
                        window: Duration::from_secs(60),
                    },
                ),
            ],
        }
    }
}

struct WindowEntry {
    count: u32,
    reset_at: SystemTime,
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy)]
pub struct Decision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: SystemTime,
}

/// Fixed-window in-memory rate limiter.
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Check the request against the first matching prefix rule. `None`
    /// means no rule covers this path.
    pub fn evaluate(&self, path: &str, ip: &str) -> Option<Decision> {
        let (prefix, rule) = self
            .config
            .rules
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))?;
        let key = format!("{ip}:{prefix}");
        Some(self.check_at(&key, *rule, SystemTime::now()))
    }

    fn check_at(&self, key: &str, rule: RateRule, now: SystemTime) -> Decision {
        let mut store = self.store.lock().unwrap();
        let entry = store.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            reset_at: now + rule.window,
        });

        if now > entry.reset_at {
            entry.count = 0;
            entry.reset_at = now + rule.window;
        }

        entry.count += 1;
        Decision {
            allowed: entry.count <= rule.max,
            limit: rule.max,
            remaining: rule.max.saturating_sub(entry.count),
            reset_at: entry.reset_at,
        }
    }
}

fn epoch_secs(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
}

fn client_ip(req: &Request) -> String {
    req.headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn header(value: String) -> HeaderValue {
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("invalid"))
}

/// Site-wide middleware: rate limiting on `/api/` plus a per-request id on
/// every response.
pub async fn site_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let path = req.uri().path().to_string();

    let decision = if path.starts_with("/api/") {
        limiter.evaluate(&path, &client_ip(&req))
    } else {
        None
    };

    if let Some(decision) = decision {
        if !decision.allowed {
            tracing::debug!(path = %path, "request rate limited");
            let retry_after = decision
                .reset_at
                .duration_since(SystemTime::now())
                .map(|d| d.as_secs().max(1))
                .unwrap_or(1);
            let body = Json(serde_json::json!({
                "error": {
                    "code": "RATE_LIMITED",
                    "message": "Too many requests. Please try again later.",
                },
                "meta": { "requestId": request_id },
            }));
            let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();
            let headers = response.headers_mut();
            headers.insert("Retry-After", header(retry_after.to_string()));
            headers.insert("X-RateLimit-Limit", header(decision.limit.to_string()));
            headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
            headers.insert(
                "X-RateLimit-Reset",
                header(epoch_secs(decision.reset_at).to_string()),
            );
            headers.insert("x-request-id", header(request_id));
            return response;
        }

        let mut response = next.run(req).await;
        let headers = response.headers_mut();
        headers.insert("X-RateLimit-Limit", header(decision.limit.to_string()));
        headers.insert(
            "X-RateLimit-Remaining",
            header(decision.remaining.to_string()),
        );
        headers.insert(
            "X-RateLimit-Reset",
            header(epoch_secs(decision.reset_at).to_string()),
        );
        headers.insert("x-request-id", header(request_id));
        return response;
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert("x-request-id", header(request_id));
    response
}
