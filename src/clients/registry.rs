//! Process-wide registry of per-credential state.
//!
//! Every (shop domain, access token) pair owns one rate-limit bucket on
//! Shopify's side, so every client and service addressing that pair must
//! share one [`CallLimits`] and one [`RequestQueue`]. The registry is that
//! shared owner: an explicit object the application constructs once and
//! hands to each client, keyed by shop domain.
//!
//! Entries are created lazily on first use and replaced wholesale when the
//! same shop presents a different access token; stale state from the old
//! credential is never merged into the new one.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::clients::limits::CallLimits;
use crate::clients::queue::RequestQueue;
use crate::config::ShopDomain;

/// Shared state for one credential: its token, rate limits, and queue.
///
/// The rate-limit state is only ever mutated inside the queue's task
/// execution and through the read accessor; both paths take the internal
/// lock for the duration of a short, await-free critical section.
#[derive(Debug)]
pub struct ShopState {
    access_token: Option<String>,
    limits: Mutex<CallLimits>,
    queue: RequestQueue,
}

impl ShopState {
    fn new(access_token: Option<String>) -> Self {
        Self {
            access_token,
            limits: Mutex::new(CallLimits::new(Instant::now())),
            queue: RequestQueue::new(),
        }
    }

    /// Returns the credential's request queue.
    #[must_use]
    pub const fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    /// Reads the rate-limit state decayed to now.
    ///
    /// A nonzero `pre_increment` reserves that many units and commits the
    /// reservation, so concurrent readers observe it immediately.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned, which requires a panic in
    /// another thread's critical section.
    pub fn read_limits(&self, pre_increment: u32) -> CallLimits {
        self.limits
            .lock()
            .expect("rate limit state lock poisoned")
            .read(pre_increment, Instant::now())
    }

    /// Feeds a response's rate-limit headers back into the state.
    ///
    /// A parseable call-limit header is authoritative. A `retry-after`
    /// without one (a 429 answered by an intermediary) is still recorded
    /// so the retry loop backs off instead of spinning.
    pub(crate) fn apply_response(&self, limit_header: Option<&str>, retry_after: Option<f64>) {
        let now = Instant::now();
        let mut limits = self
            .limits
            .lock()
            .expect("rate limit state lock poisoned");

        let updated = limit_header
            .is_some_and(|header| limits.set_from_header(header, retry_after, now));
        if !updated {
            if let Some(secs) = retry_after {
                limits.set_retry_after(secs, now);
            }
        }
    }
}

/// Registry of [`ShopState`] entries keyed by shop domain.
///
/// Construct one per process (or per test) and share it via [`Arc`] with
/// every client that should see the same rate budgets.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use shopify_admin::clients::ShopRegistry;
/// use shopify_admin::ShopDomain;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = Arc::new(ShopRegistry::new());
/// let shop = ShopDomain::new("my-store").unwrap();
///
/// let a = registry.obtain(&shop, Some("tok_abc"));
/// let b = registry.obtain(&shop, Some("tok_abc"));
/// assert!(Arc::ptr_eq(&a, &b));
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ShopRegistry {
    shops: Mutex<HashMap<String, Arc<ShopState>>>,
}

impl ShopRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state for a credential, creating it on first use.
    ///
    /// If the shop already has an entry under a different access token,
    /// the entry is replaced wholesale; callers still holding the old
    /// `Arc` keep a detached state that no new caller will observe.
    ///
    /// # Runtime
    ///
    /// Creating an entry spawns its queue worker and therefore requires a
    /// running Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn obtain(&self, shop: &ShopDomain, access_token: Option<&str>) -> Arc<ShopState> {
        let mut shops = self.shops.lock().expect("shop registry lock poisoned");

        if let Some(state) = shops.get(shop.as_ref()) {
            if state.access_token.as_deref() == access_token {
                return Arc::clone(state);
            }
        }

        let state = Arc::new(ShopState::new(access_token.map(str::to_owned)));
        shops.insert(shop.as_ref().to_string(), Arc::clone(&state));
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shop(name: &str) -> ShopDomain {
        ShopDomain::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_obtain_creates_lazily_and_reuses() {
        let registry = ShopRegistry::new();

        let first = registry.obtain(&shop("test-shop"), Some("tok_abc"));
        let second = registry.obtain(&shop("test-shop"), Some("tok_abc"));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_obtain_replaces_entry_on_token_change() {
        let registry = ShopRegistry::new();

        let old = registry.obtain(&shop("test-shop"), Some("tok_old"));
        old.apply_response(Some("39/40"), None);

        let new = registry.obtain(&shop("test-shop"), Some("tok_new"));
        assert!(!Arc::ptr_eq(&old, &new));

        // The replacement starts from a fresh bucket, no merge.
        let limits = new.read_limits(0);
        assert!(limits.current() < 1e-9);
    }

    #[tokio::test]
    async fn test_distinct_shops_get_distinct_state() {
        let registry = ShopRegistry::new();

        let a = registry.obtain(&shop("shop-a"), Some("tok"));
        let b = registry.obtain(&shop("shop-b"), Some("tok"));

        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_apply_response_updates_shared_state() {
        let registry = ShopRegistry::new();
        let state = registry.obtain(&shop("test-shop"), Some("tok"));

        state.apply_response(Some("38/40"), None);

        let seen_elsewhere = registry
            .obtain(&shop("test-shop"), Some("tok"))
            .read_limits(0);
        assert!((seen_elsewhere.current() - 38.0).abs() < 0.1);
    }

    #[tokio::test]
    async fn test_retry_after_recorded_without_limit_header() {
        let registry = ShopRegistry::new();
        let state = registry.obtain(&shop("test-shop"), Some("tok"));

        state.apply_response(None, Some(2.5));

        let limits = state.read_limits(0);
        assert!(limits.retry_after() > 2.0);
    }
}
