//! OAuth authorization URL construction.
//!
//! The first step of the authorization code flow is pure string
//! construction: redirect the merchant to
//! `https://{shop}/admin/oauth/authorize` with the app's client id, the
//! requested scopes, the callback URI, and a state parameter for CSRF
//! protection.

use std::fmt;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::config::ShopDomain;

/// A cryptographically random state parameter for CSRF protection.
///
/// Generate one per authorization attempt, store it in the user's session,
/// and compare it against the `state` parameter of the callback.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::Nonce;
///
/// let nonce = Nonce::new();
/// assert_eq!(nonce.as_ref().len(), 15);
/// assert!(nonce.as_ref().chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nonce(String);

impl Nonce {
    const LENGTH: usize = 15;

    /// Generates a new random alphanumeric nonce.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }
}

impl Default for Nonce {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for Nonce {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the OAuth authorization URL for a shop.
///
/// Scopes are comma-joined into a single `scope` parameter. All parameter
/// values are URL-encoded.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::build_authorization_url;
/// use shopify_admin::ShopDomain;
///
/// let shop = ShopDomain::new("example-shop").unwrap();
/// let url = build_authorization_url(
///     &shop,
///     "api-key",
///     "https://myapp.example.com/callback",
///     &["read_orders"],
///     "nonce-value",
/// );
///
/// assert!(url.contains("client_id=api-key"));
/// assert!(url.contains("redirect_uri=https%3A%2F%2Fmyapp.example.com%2Fcallback"));
/// assert!(url.contains("state=nonce-value"));
/// ```
#[must_use]
pub fn build_authorization_url(
    shop: &ShopDomain,
    api_key: &str,
    redirect_uri: &str,
    scopes: &[&str],
    state: &str,
) -> String {
    let params = [
        ("client_id", api_key.to_string()),
        ("scope", scopes.join(",")),
        ("redirect_uri", redirect_uri.to_string()),
        ("state", state.to_string()),
    ];

    let query_string = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "https://{}/admin/oauth/authorize?{}",
        shop.as_ref(),
        query_string
    )
}
