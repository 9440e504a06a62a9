use std::sync::Mutex;
use std::time::{Duration, Instant};

use dashmap::DashMap;

const MAX_FAILURES: u32 = 5;
const WINDOW: Duration = Duration::from_secs(15 * 60);
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Per-username login brute force limiter.
///
/// Entries whose window has closed are swept at most once per
/// `SWEEP_INTERVAL`, piggybacking on `check` and `record_failure`.
pub struct LoginRateLimiter {
    /// username -> (failed_count, window_start)
    entries: DashMap<String, (u32, Instant)>,
    last_sweep: Mutex<Instant>,
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginRateLimiter {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            last_sweep: Mutex::new(Instant::now()),
        }
    }

    /// Check if a login attempt is allowed. Returns the seconds until retry otherwise.
    /// Does NOT increment the counter; call `record_failure()` on bad credentials.
    pub fn check(&self, username: &str) -> Result<(), u64> {
        self.check_at(username, Instant::now())
    }

    pub fn record_failure(&self, username: &str) {
        self.record_failure_at(username, Instant::now());
    }

    /// Forget the failures for `username` after a successful login.
    pub fn reset(&self, username: &str) {
        self.entries.remove(&username.to_lowercase());
    }

    fn check_at(&self, username: &str, now: Instant) -> Result<(), u64> {
        self.sweep_stale(now);
        let key = username.to_lowercase();

        if let Some(entry) = self.entries.get(&key) {
            let (count, start) = *entry.value();
            let elapsed = now.duration_since(start);

            if elapsed <= WINDOW {
                if count >= MAX_FAILURES {
                    return Err(WINDOW.as_secs().saturating_sub(elapsed.as_secs()));
                }
                return Ok(());
            }
        }

        // Re-checked under the shard lock: a failure recorded since the read
        // above has opened a fresh window and must survive.
        self.entries
            .remove_if(&key, |_, (_, start)| now.duration_since(*start) > WINDOW);
        Ok(())
    }

    fn record_failure_at(&self, username: &str, now: Instant) {
        self.sweep_stale(now);
        let mut entry = self
            .entries
            .entry(username.to_lowercase())
            .or_insert((0, now));
        let (count, start) = entry.value_mut();

        if now.duration_since(*start) > WINDOW {
            *count = 1;
            *start = now;
        } else {
            *count += 1;
        }
    }

    /// Drop every entry whose window has closed, unless another caller swept recently.
    fn sweep_stale(&self, now: Instant) {
        let Ok(mut last) = self.last_sweep.try_lock() else {
            return;
        };
        if now.duration_since(*last) < SWEEP_INTERVAL {
            return;
        }
        *last = now;
        drop(last);

        self.entries
            .retain(|_, (_, start)| now.duration_since(*start) <= WINDOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_after_max_failures() {
        let limiter = LoginRateLimiter::new();
        let now = Instant::now();
        for _ in 0..MAX_FAILURES {
            assert!(limiter.check_at("admin", now).is_ok());
            limiter.record_failure_at("admin", now);
        }
        let retry = limiter.check_at("Admin", now).unwrap_err();
        assert_eq!(retry, WINDOW.as_secs());
    }

    #[test]
    fn window_expiry_unblocks() {
        let limiter = LoginRateLimiter::new();
        let start = Instant::now();
        for _ in 0..MAX_FAILURES {
            limiter.record_failure_at("admin", start);
        }
        let later = start + WINDOW + Duration::from_secs(1);
        assert!(limiter.check_at("admin", later).is_ok());
        assert!(limiter.entries.is_empty());
    }

    #[test]
    fn stale_usernames_are_swept() {
        let limiter = LoginRateLimiter::new();
        let start = Instant::now();
        for i in 0..10_000 {
            limiter.record_failure_at(&format!("user-{i}"), start);
        }
        assert_eq!(limiter.entries.len(), 10_000);

        let later = start + WINDOW * 10;
        assert!(limiter.check_at("admin", later).is_ok());
        assert!(limiter.entries.is_empty());
    }

    #[test]
    fn sweep_keeps_open_windows() {
        let limiter = LoginRateLimiter::new();
        let start = Instant::now();
        limiter.record_failure_at("stale", start);

        let later = start + WINDOW + SWEEP_INTERVAL;
        limiter.record_failure_at("fresh", later);

        assert!(!limiter.entries.contains_key("stale"));
        assert_eq!(limiter.entries.get("fresh").map(|e| e.value().0), Some(1));
    }

    #[test]
    fn failure_after_window_restarts_count() {
        let limiter = LoginRateLimiter::new();
        let start = Instant::now();
        limiter.record_failure_at("admin", start);

        let later = start + WINDOW + Duration::from_secs(1);
        limiter.record_failure_at("admin", later);
        assert!(limiter.check_at("admin", later).is_ok());
        assert_eq!(limiter.entries.get("admin").map(|e| e.value().0), Some(1));
    }

    #[test]
    fn reset_clears_failures() {
        let limiter = LoginRateLimiter::new();
        let now = Instant::now();
        for _ in 0..MAX_FAILURES {
            limiter.record_failure_at("admin", now);
        }
        limiter.reset("ADMIN");
        assert!(limiter.check_at("admin", now).is_ok());
    }
}
