//! Resource services for the Admin REST API.
//!
//! Each service is a thin, mechanical mapping of one resource family's
//! endpoint paths, root keys, and payload shapes onto the shared dispatch
//! layer. Services hold a dispatch capability ([`Perform`]) by `Arc`
//! rather than extending a base type, so several services share one
//! client — and one rate budget — and service tests can substitute a mock.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shopify_admin::clients::ShopRegistry;
//! use shopify_admin::resources::Orders;
//! use shopify_admin::{AccessToken, ClientConfig, RestClient, ShopDomain};
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store")?)
//!     .access_token(AccessToken::new("shpat_abc123")?)
//!     .build()?;
//!
//! let client = Arc::new(RestClient::new(config, Arc::new(ShopRegistry::new())));
//! let orders = Orders::new(Arc::clone(&client));
//!
//! let open_orders = orders.list(None).await?;
//! ```

mod blogs;
mod customers;
mod orders;
mod pages;
mod products;
mod webhooks;

pub use blogs::{Blog, BlogListOptions, Blogs};
pub use customers::{Customer, CustomerListOptions, Customers};
pub use orders::{Order, OrderListOptions, Orders};
pub use pages::{Page, PageListOptions, Pages};
pub use products::{Product, ProductListOptions, Products};
pub use webhooks::{Webhook, WebhookListOptions, Webhooks};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::RequestError;

/// Serializes an options struct into a payload for the dispatch layer.
///
/// `None` options produce no payload at all, keeping the request free of
/// query parameters.
pub(crate) fn to_payload<T: Serialize>(
    options: Option<&T>,
) -> Result<Option<serde_json::Value>, RequestError> {
    options
        .map(|options| serde_json::to_value(options))
        .transpose()
        .map_err(RequestError::from)
}

/// Decodes an unwrapped response payload into a typed model.
pub(crate) fn decode<T: DeserializeOwned>(
    value: Option<serde_json::Value>,
) -> Result<T, RequestError> {
    let value = value.unwrap_or(serde_json::Value::Null);
    serde_json::from_value(value).map_err(RequestError::from)
}

/// Builds the `{"fields": [...]}` payload used by single-resource reads.
pub(crate) fn fields_payload(fields: Option<&[&str]>) -> Option<serde_json::Value> {
    fields.map(|fields| serde_json::json!({ "fields": fields }))
}
