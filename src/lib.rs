//! # Shopify Admin API Client
//!
//! A Rust client library for the Shopify Admin REST API, providing typed
//! resource services on top of a shared request-dispatch core that handles
//! authentication, leaky-bucket rate-limit tracking, per-credential request
//! serialization, and transparent retry on HTTP 429.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and validated newtypes
//! - A shared dispatch core ([`RestClient`]) used by every resource service
//! - Per-credential rate-limit bookkeeping shared across concurrent callers
//! - A per-credential FIFO request queue so call-limit headers stay usable
//! - Typed resource services (orders, products, customers, blogs, pages,
//!   webhooks) in [`resources`]
//! - OAuth authorization URL and HMAC verification helpers in [`auth`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_admin::clients::ShopRegistry;
//! use shopify_admin::resources::Orders;
//! use shopify_admin::{AccessToken, ClientConfig, RestClient, ShopDomain};
//!
//! // One registry per process; clients built against it share rate budgets.
//! let registry = Arc::new(ShopRegistry::new());
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store")?)
//!     .access_token(AccessToken::new("shpat_abc123")?)
//!     .build()?;
//!
//! let client = Arc::new(RestClient::new(config, registry));
//!
//! // Services are thin mappings onto the shared client.
//! let orders = Orders::new(Arc::clone(&client));
//! let recent = orders.list(None).await?;
//!
//! // Budget can be inspected without issuing a call.
//! let limits = client.call_limits(0);
//! println!("{} of {} units remaining", limits.remaining(), limits.max());
//! ```
//!
//! ## Rate Limiting
//!
//! Shopify enforces a leaky bucket per (shop, access token) pair: every
//! call adds a unit, the bucket drains at 2 units per second, and calls are
//! rejected with HTTP 429 once it is full. The client tracks the bucket
//! from the `X-Shopify-Shop-Api-Call-Limit` response header, serializes
//! physical calls per credential so the header sequence stays monotonic,
//! stalls dispatch while fewer than 5 units remain, and retries 429
//! responses internally. Callers never observe a 429.
//!
//! ## Design Principles
//!
//! - **No global state**: the per-credential registry is an explicit object
//!   the application constructs and injects
//! - **Composition over inheritance**: services hold a dispatch capability
//!   ([`clients::Perform`]) instead of extending a base client
//! - **Fail-fast validation**: configuration newtypes validate on construction
//! - **Thread-safe**: all shared types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export the types most applications touch at the crate root
pub use clients::{ApiError, HttpMethod, Perform, RequestError, RestClient};
pub use config::{AccessToken, ApiVersion, ClientConfig, ClientConfigBuilder, HostUrl, ShopDomain};
pub use error::ConfigError;
