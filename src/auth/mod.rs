//! Authorization helpers for Shopify apps.
//!
//! These helpers sit outside the request-dispatch layer: nothing in the
//! core consumes them, and they consume nothing from it. They cover the
//! two pieces of plumbing an Admin API app needs before it has an access
//! token to configure a client with:
//!
//! - [`build_authorization_url`]: constructs the OAuth authorization URL a
//!   merchant is redirected to, with a CSRF [`Nonce`]
//! - [`hmac`]: verification of the HMAC-SHA256 signatures Shopify attaches
//!   to OAuth callbacks (hex) and webhook deliveries (base64)
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::{build_authorization_url, Nonce};
//! use shopify_admin::ShopDomain;
//!
//! let shop = ShopDomain::new("example-shop").unwrap();
//! let state = Nonce::new();
//! let url = build_authorization_url(
//!     &shop,
//!     "api-key",
//!     "https://myapp.example.com/auth/callback",
//!     &["read_orders", "write_products"],
//!     state.as_ref(),
//! );
//!
//! assert!(url.starts_with("https://example-shop.myshopify.com/admin/oauth/authorize?"));
//! assert!(url.contains("scope=read_orders%2Cwrite_products"));
//! ```

pub mod hmac;
mod url;

pub use url::{build_authorization_url, Nonce};
