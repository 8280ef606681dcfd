use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// In-memory sliding-window rate limiter, keyed by an arbitrary string
/// (in practice "subscribe_<ip>" / "contact_<ip>").
///
/// State is process-local: it does not survive restarts and is not shared
/// across horizontally scaled instances, so limiting is best-effort. Keys
/// are never evicted; a key's slot only empties out once every recorded
/// timestamp ages past the window.
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
    max_attempts: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_attempts: usize, window: Duration) -> RateLimiter {
        RateLimiter {
            attempts: Mutex::new(HashMap::new()),
            max_attempts,
            window,
        }
    }

    /// Returns true and records the attempt when `key` is under its ceiling.
    /// Denied attempts are not recorded, so a client at the limit does not
    /// push its own window further into the future by retrying.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut attempts = self.attempts.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = attempts.entry(key.to_string()).or_default();

        entry.retain(|attempted_at| now.duration_since(*attempted_at) < self.window);

        if entry.len() >= self.max_attempts {
            return false;
        }

        entry.push(now);
        true
    }
}

/// Newtype wrappers so the two limiter instances can both live in actix's
/// type-keyed app data.
pub struct SubscribeLimiter(pub RateLimiter);

pub struct ContactLimiter(pub RateLimiter);
