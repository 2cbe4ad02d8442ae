//! Leaky-bucket rate limit tracking.
//!
//! Shopify reports bucket usage on every response through the
//! `X-Shopify-Shop-Api-Call-Limit` header (`"current/max"` format) and
//! drains the bucket at a fixed rate of 2 units per second. There is no
//! endpoint for querying the bucket on demand, so [`CallLimits`] estimates
//! the level between responses from the last authoritative reading plus
//! elapsed wall-clock time.
//!
//! All time-dependent operations take an explicit [`Instant`] so the decay
//! math is deterministic under test.

use std::time::Instant;

/// The fixed drain rate of Shopify's leaky bucket, in units per second.
pub const DRAIN_RATE: f64 = 2.0;

/// Bucket capacity assumed until the first response reports the real one.
pub const DEFAULT_BUCKET_SIZE: u32 = 40;

/// Estimated state of one credential's leaky bucket.
///
/// The state holds the last authoritative reading (`current`, `max`), the
/// instant it was taken, and an optional `retry-after` countdown from a
/// rejected call. `remaining` is always derived, never stored.
///
/// # Example
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use shopify_admin::clients::CallLimits;
///
/// let t0 = Instant::now();
/// let mut limits = CallLimits::new(t0);
/// limits.set_from_header("32/40", None, t0);
///
/// // Two seconds later, four units have drained.
/// let snapshot = limits.read(0, t0 + Duration::from_secs(2));
/// assert!((snapshot.current() - 28.0).abs() < 1e-9);
/// assert!((snapshot.remaining() - 12.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CallLimits {
    /// When `current` was last set or committed.
    at: Instant,
    /// Estimated bucket fill level at `at`.
    current: f64,
    /// Bucket capacity reported by the service.
    max: u32,
    /// Seconds until the service will accept calls again, counting from `at`.
    retry_after: f64,
}

impl CallLimits {
    /// Creates the initial state for a credential that has not yet seen a
    /// response. The bucket is assumed empty with the default capacity.
    #[must_use]
    pub const fn new(now: Instant) -> Self {
        Self {
            at: now,
            current: 0.0,
            max: DEFAULT_BUCKET_SIZE,
            retry_after: 0.0,
        }
    }

    /// Returns the estimated bucket fill level as of the last read.
    #[must_use]
    pub const fn current(&self) -> f64 {
        self.current
    }

    /// Returns the bucket capacity.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Returns the estimated remaining budget, clamped at zero.
    #[must_use]
    pub fn remaining(&self) -> f64 {
        (f64::from(self.max) - self.current).max(0.0)
    }

    /// Returns the seconds left on the `retry-after` countdown, if any.
    #[must_use]
    pub const fn retry_after(&self) -> f64 {
        self.retry_after
    }

    /// Sets the state authoritatively from a `"current/max"` header value.
    ///
    /// `retry_after`, when given, restarts the countdown from `now`. When
    /// absent, any prior countdown is decayed by the elapsed time instead
    /// of being cleared: a 429's `retry-after` must survive the state
    /// update performed by the next successful response's limit header,
    /// since both can arrive from the same logical exchange.
    ///
    /// Returns `false` (leaving the state untouched) if the header does
    /// not parse.
    pub fn set_from_header(
        &mut self,
        header: &str,
        retry_after: Option<f64>,
        now: Instant,
    ) -> bool {
        let Some((current, max)) = parse_call_limit(header) else {
            return false;
        };

        let elapsed = now.saturating_duration_since(self.at).as_secs_f64();
        self.retry_after = retry_after.unwrap_or_else(|| (self.retry_after - elapsed).max(0.0));
        self.at = now;
        self.current = current;
        self.max = max;
        true
    }

    /// Records a `retry-after` countdown without an authoritative bucket
    /// reading (a 429 whose limit header was absent or unparseable).
    pub fn set_retry_after(&mut self, secs: f64, now: Instant) {
        let elapsed = now.saturating_duration_since(self.at).as_secs_f64();
        self.current = (self.current - DRAIN_RATE * elapsed).max(0.0);
        self.at = now;
        self.retry_after = secs.max(0.0);
    }

    /// Returns the state decayed to `now`, optionally reserving budget.
    ///
    /// `current` drains toward zero at [`DRAIN_RATE`] and `retry_after`
    /// counts down by the same elapsed time, floored at zero. A nonzero
    /// `pre_increment` adds that many units to `current` and commits the
    /// result back as the new baseline, so concurrent readers observe the
    /// reservation; with `pre_increment == 0` the stored baseline is left
    /// untouched.
    pub fn read(&mut self, pre_increment: u32, now: Instant) -> Self {
        let elapsed = now.saturating_duration_since(self.at).as_secs_f64();

        let mut next = *self;
        next.at = now;
        next.current = (self.current - DRAIN_RATE * elapsed).max(0.0) + f64::from(pre_increment);
        next.retry_after = (self.retry_after - elapsed).max(0.0);

        if pre_increment > 0 {
            *self = next;
        }
        next
    }
}

/// Parses a `"current/max"` call-limit header value.
///
/// Returns `None` for anything that is not two `/`-separated integers.
#[must_use]
pub fn parse_call_limit(header: &str) -> Option<(f64, u32)> {
    let (current, max) = header.split_once('/')?;
    let current: u32 = current.trim().parse().ok()?;
    let max: u32 = max.trim().parse().ok()?;
    Some((f64::from(current), max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "expected {b}, got {a}");
    }

    #[test]
    fn test_parse_call_limit() {
        assert_eq!(parse_call_limit("32/40"), Some((32.0, 40)));
        assert_eq!(parse_call_limit("1/80"), Some((1.0, 80)));
        assert_eq!(parse_call_limit("invalid"), None);
        assert_eq!(parse_call_limit("40"), None);
        assert_eq!(parse_call_limit("40/"), None);
        assert_eq!(parse_call_limit("/80"), None);
        assert_eq!(parse_call_limit("abc/def"), None);
    }

    #[test]
    fn test_initial_state_assumes_empty_default_bucket() {
        let limits = CallLimits::new(Instant::now());
        assert_close(limits.current(), 0.0);
        assert_eq!(limits.max(), DEFAULT_BUCKET_SIZE);
        assert_close(limits.remaining(), 40.0);
        assert_close(limits.retry_after(), 0.0);
    }

    #[test]
    fn test_set_then_immediate_read_is_exact() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        assert!(limits.set_from_header("32/40", None, t0));

        let snapshot = limits.read(0, t0);
        assert_close(snapshot.current(), 32.0);
        assert_eq!(snapshot.max(), 40);
        assert_close(snapshot.remaining(), 8.0);
    }

    #[test]
    fn test_current_decays_at_two_units_per_second() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("30/40", None, t0);

        let snapshot = limits.read(0, t0 + Duration::from_secs(3));
        assert_close(snapshot.current(), 24.0);
        assert_close(snapshot.remaining(), 16.0);
    }

    #[test]
    fn test_decay_clamps_current_at_zero() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("10/40", None, t0);

        let snapshot = limits.read(0, t0 + Duration::from_secs(60));
        assert_close(snapshot.current(), 0.0);
        assert_close(snapshot.remaining(), 40.0);
    }

    #[test]
    fn test_retry_after_counts_down_with_elapsed_time() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("40/40", Some(4.0), t0);

        let snapshot = limits.read(0, t0 + Duration::from_secs(1));
        assert_close(snapshot.retry_after(), 3.0);

        let snapshot = limits.read(0, t0 + Duration::from_secs(10));
        assert_close(snapshot.retry_after(), 0.0);
    }

    #[test]
    fn test_retry_after_survives_next_header_update() {
        // A 429 sets retry-after; the following 200's limit header must
        // not clear it, only decay it.
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("40/40", Some(5.0), t0);

        let t1 = t0 + Duration::from_secs(2);
        limits.set_from_header("39/40", None, t1);

        let snapshot = limits.read(0, t1);
        assert_close(snapshot.retry_after(), 3.0);
        assert_close(snapshot.current(), 39.0);
    }

    #[test]
    fn test_read_without_increment_does_not_mutate_baseline() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("20/40", None, t0);

        let t1 = t0 + Duration::from_secs(2);
        let first = limits.read(0, t1);
        let second = limits.read(0, t1);
        let third = limits.read(0, t1);

        assert_close(first.current(), second.current());
        assert_close(second.current(), third.current());
        // The stored baseline still decays from t0, not t1.
        let later = limits.read(0, t0 + Duration::from_secs(4));
        assert_close(later.current(), 12.0);
    }

    #[test]
    fn test_pre_increment_commits_reservation() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("20/40", None, t0);

        let reserved = limits.read(1, t0);
        assert_close(reserved.current(), 21.0);

        // A subsequent plain read at the same instant observes the commit.
        let snapshot = limits.read(0, t0);
        assert_close(snapshot.current(), 21.0);
        assert_close(snapshot.remaining(), 19.0);
    }

    #[test]
    fn test_unparseable_header_leaves_state_untouched() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("32/40", None, t0);

        assert!(!limits.set_from_header("nonsense", Some(9.0), t0));

        let snapshot = limits.read(0, t0);
        assert_close(snapshot.current(), 32.0);
        assert_close(snapshot.retry_after(), 0.0);
    }

    #[test]
    fn test_set_retry_after_without_header() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("10/40", None, t0);

        let t1 = t0 + Duration::from_secs(2);
        limits.set_retry_after(3.0, t1);

        let snapshot = limits.read(0, t1);
        assert_close(snapshot.retry_after(), 3.0);
        // Decay up to t1 was folded into the baseline.
        assert_close(snapshot.current(), 6.0);
    }

    #[test]
    fn test_remaining_clamps_at_zero() {
        let t0 = Instant::now();
        let mut limits = CallLimits::new(t0);
        limits.set_from_header("45/40", None, t0);

        let snapshot = limits.read(0, t0);
        assert_close(snapshot.remaining(), 0.0);
    }
}
