//! Configuration types for the Shopify Admin API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for communication with a single shop.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ClientConfig`]: The configuration struct holding shop, token, and version
//! - [`ClientConfigBuilder`]: A builder for constructing [`ClientConfig`] instances
//! - [`ShopDomain`]: A validated Shopify shop domain
//! - [`AccessToken`]: A validated access token with masked debug output
//! - [`HostUrl`]: A validated base-URI override for proxying and testing
//! - [`ApiVersion`]: The Admin API version to use
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::{AccessToken, ApiVersion, ClientConfig, ShopDomain};
//!
//! let config = ClientConfig::builder()
//!     .shop(ShopDomain::new("my-store").unwrap())
//!     .access_token(AccessToken::new("shpat_abc123").unwrap())
//!     .api_version(ApiVersion::latest())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;
mod version;

pub use newtypes::{AccessToken, HostUrl, ShopDomain};
pub use version::ApiVersion;

use crate::error::ConfigError;

/// Configuration for a Shopify Admin API client.
///
/// Holds the shop domain, the access token, the API version, and optional
/// overrides. One `ClientConfig` addresses exactly one shop; the
/// (shop, token) pair also identifies the rate-limit bucket shared by all
/// clients built from equivalent configurations.
///
/// # Thread Safety
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use shopify_admin::{AccessToken, ClientConfig, ShopDomain};
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_abc123").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(config.shop().as_ref(), "my-store.myshopify.com");
/// ```
#[derive(Clone, Debug)]
pub struct ClientConfig {
    shop: ShopDomain,
    access_token: Option<AccessToken>,
    api_version: ApiVersion,
    host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the shop domain.
    #[must_use]
    pub const fn shop(&self) -> &ShopDomain {
        &self.shop
    }

    /// Returns the access token, if configured.
    ///
    /// Requests omit the `X-Shopify-Access-Token` header when no token is
    /// configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the base-URI override, if configured.
    #[must_use]
    pub const fn host(&self) -> Option<&HostUrl> {
        self.host.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// The only required field is `shop`. All other fields have defaults.
///
/// # Defaults
///
/// - `access_token`: `None` (no token header sent)
/// - `api_version`: Latest stable version
/// - `host`: `None` (requests go to `https://{shop}`)
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use shopify_admin::{AccessToken, ApiVersion, ClientConfig, ShopDomain};
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store").unwrap())
///     .access_token(AccessToken::new("shpat_abc123").unwrap())
///     .api_version(ApiVersion::V2020_01)
///     .user_agent_prefix("MyApp/1.0")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    shop: Option<ShopDomain>,
    access_token: Option<AccessToken>,
    api_version: Option<ApiVersion>,
    host: Option<HostUrl>,
    user_agent_prefix: Option<String>,
}

impl ClientConfigBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the shop domain (required).
    #[must_use]
    pub fn shop(mut self, shop: ShopDomain) -> Self {
        self.shop = Some(shop);
        self
    }

    /// Sets the access token.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Sets a base-URI override for all requests.
    ///
    /// When set, requests are sent to this host with a `Host` header
    /// carrying the shop domain.
    #[must_use]
    pub fn host(mut self, host: HostUrl) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets a prefix prepended to the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `shop` was not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let shop = self
            .shop
            .ok_or(ConfigError::MissingRequiredField { field: "shop" })?;

        Ok(ClientConfig {
            shop,
            access_token: self.access_token,
            api_version: self.api_version.unwrap_or_default(),
            host: self.host,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_shop() {
        let result = ClientConfig::builder().build();
        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "shop" })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .build()
            .unwrap();

        assert!(config.access_token().is_none());
        assert_eq!(config.api_version(), &ApiVersion::latest());
        assert!(config.host().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = ClientConfig::builder()
            .shop(ShopDomain::new("test-shop").unwrap())
            .access_token(AccessToken::new("tok_abc").unwrap())
            .api_version(ApiVersion::V2020_01)
            .host(HostUrl::new("http://localhost:3000").unwrap())
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.shop().shop_name(), "test-shop");
        assert_eq!(config.access_token().unwrap().as_ref(), "tok_abc");
        assert_eq!(config.api_version(), &ApiVersion::V2020_01);
        assert_eq!(config.host().unwrap().as_ref(), "http://localhost:3000");
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }
}
