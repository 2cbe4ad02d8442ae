//! The shared request-dispatch layer.
//!
//! This module is the part of the crate with real concurrency and state:
//! everything a resource service does funnels through it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`RestClient`]: performs one logical API call with authentication,
//!   rate-limit-respecting backoff, transparent 429 retry, and envelope
//!   unwrapping
//! - [`Perform`]: the dispatch capability trait resource services depend on
//! - [`CallLimits`]: per-credential leaky-bucket estimate, pure state +
//!   time-based decay
//! - [`RequestQueue`]: per-credential FIFO channel with a concurrency of
//!   exactly one
//! - [`ShopRegistry`] / [`ShopState`]: explicit registry of per-credential
//!   state, keyed by shop domain
//! - [`RequestError`] / [`ApiError`]: the failure taxonomy for logical calls
//!
//! # Rate-Limit Behavior
//!
//! Shopify reports `current/max` bucket usage on every response and drains
//! the bucket at 2 units per second. The client estimates between
//! responses, stalls a queued call while fewer than 5 units remain or a
//! `retry-after` countdown is pending, reserves one unit before each
//! physical call, and retries 429 responses without surfacing them.
//! Physical calls for one credential happen strictly in enqueue order;
//! credentials never contend with each other.

mod errors;
mod limits;
mod queue;
mod registry;
mod rest;

pub use errors::{ApiError, QueueClosed, RequestError};
pub use limits::{parse_call_limit, CallLimits, DEFAULT_BUCKET_SIZE, DRAIN_RATE};
pub use queue::RequestQueue;
pub use registry::{ShopRegistry, ShopState};
pub use rest::{HttpMethod, Perform, RestClient, CLIENT_VERSION, MIN_REMAINING};
