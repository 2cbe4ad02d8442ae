//! The shared request-dispatch layer for the Admin REST API.
//!
//! [`RestClient`] turns a (verb, path, root key, payload) tuple into an
//! authenticated HTTP call. Every call for a credential flows through that
//! credential's [`RequestQueue`], where the task stalls until the rate
//! budget recovers, reserves one unit, performs the exchange, feeds the
//! response's limit headers back into [`CallLimits`], and transparently
//! repeats on HTTP 429. Callers only ever observe a final success or a
//! non-429 failure.
//!
//! Resource services depend on the [`Perform`] trait rather than on
//! `RestClient` directly, so service-level tests can substitute a mock.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::errors::{ApiError, RequestError};
use crate::clients::limits::{CallLimits, DRAIN_RATE};
use crate::clients::registry::{ShopRegistry, ShopState};
use crate::config::{ApiVersion, ClientConfig};

/// Calls stall until at least this much budget remains in the bucket.
pub const MIN_REMAINING: f64 = 5.0;

/// Crate version baked into the `User-Agent` header.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP methods supported by the Admin REST API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The dispatch capability consumed by every resource service.
///
/// Implemented by [`RestClient`]; service tests implement it with a mock
/// that records calls and returns canned payloads.
pub trait Perform: Send + Sync {
    /// Performs one logical API call.
    ///
    /// See [`RestClient::perform`] for the semantics of the arguments and
    /// the returned value.
    fn perform<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        root_key: Option<&'a str>,
        payload: Option<serde_json::Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<serde_json::Value>, RequestError>> + Send + 'a>>;
}

/// Client for the Shopify Admin REST API.
///
/// The client holds a [`ClientConfig`] for one shop and a shared
/// [`ShopRegistry`]; all clients built against the same registry and
/// credential observe the same rate budget and request queue.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`; share it across tasks with [`Arc`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use shopify_admin::{AccessToken, ClientConfig, RestClient, ShopDomain};
/// use shopify_admin::clients::{HttpMethod, ShopRegistry};
///
/// let config = ClientConfig::builder()
///     .shop(ShopDomain::new("my-store")?)
///     .access_token(AccessToken::new("shpat_abc123")?)
///     .build()?;
///
/// let client = RestClient::new(config, Arc::new(ShopRegistry::new()));
/// let orders = client
///     .perform(HttpMethod::Get, "orders.json", Some("orders"), None)
///     .await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    config: ClientConfig,
    registry: Arc<ShopRegistry>,
    /// Base URI (e.g., `https://my-store.myshopify.com`).
    base_uri: String,
    /// Default headers included in all requests.
    default_headers: HashMap<String, String>,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client for the configured shop.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(config: ClientConfig, registry: Arc<ShopRegistry>) -> Self {
        // Base URI: the configured override wins, otherwise the shop itself.
        let base_uri = config.host().map_or_else(
            || format!("https://{}", config.shop().as_ref()),
            |host| host.as_ref().to_string(),
        );

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or_else(String::new, |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}Shopify Admin API Client v{CLIENT_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        // When requests go through an override host, the Host header still
        // names the shop.
        if config.host().is_some() {
            default_headers.insert("Host".to_string(), config.shop().as_ref().to_string());
        }

        if let Some(token) = config.access_token() {
            default_headers.insert(
                "X-Shopify-Access-Token".to_string(),
                token.as_ref().to_string(),
            );
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            config,
            registry,
            base_uri,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Reads the credential's current rate-limit estimate without issuing
    /// a call.
    ///
    /// A nonzero `pre_increment` reserves that much budget up front and
    /// commits the reservation; pass `0` to observe only.
    #[must_use]
    pub fn call_limits(&self, pre_increment: u32) -> CallLimits {
        self.shop_state().read_limits(pre_increment)
    }

    /// Performs one logical API call.
    ///
    /// The URL is built from the shop domain (or host override), the
    /// versioned `admin/api/{version}/` prefix, and `path`; paths that are
    /// already admin-rooted are used as-is. For GET and DELETE, payload
    /// properties become query parameters with array values joined by
    /// commas; for POST and PUT the payload is the JSON body.
    ///
    /// Returns `Ok(None)` for a DELETE answered with 204 No Content.
    /// Otherwise returns the parsed body, unwrapped to `root_key` when one
    /// is given (a missing key yields `Value::Null`).
    ///
    /// HTTP 429 responses are retried inside the credential's queue and
    /// never surface.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Network`] if the underlying call fails (DNS,
    ///   connection, TLS); propagated unchanged, never retried here.
    /// - [`RequestError::Api`] for a non-2xx, non-429 status, carrying the
    ///   status and the body (parsed JSON when possible, else raw text).
    /// - [`RequestError::MalformedBody`] for a 2xx response whose body is
    ///   not valid JSON.
    /// - [`RequestError::QueueClosed`] if the runtime is shutting down.
    pub async fn perform(
        &self,
        method: HttpMethod,
        path: &str,
        root_key: Option<&str>,
        payload: Option<serde_json::Value>,
    ) -> Result<Option<serde_json::Value>, RequestError> {
        let url = format!(
            "{}/{}",
            self.base_uri,
            build_path(self.config.api_version(), path)
        );

        let (query, body) = match (method, payload) {
            (HttpMethod::Get | HttpMethod::Delete, Some(payload)) => {
                (query_pairs(&payload), None)
            }
            (_, Some(payload)) => (Vec::new(), Some(payload.to_string())),
            (_, None) => (Vec::new(), None),
        };

        let mut headers = self.default_headers.clone();
        if body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let state = self.shop_state();
        let exchange = Exchange {
            client: self.client.clone(),
            method,
            url,
            headers,
            query,
            body,
            state: Arc::clone(&state),
        };

        tracing::debug!(%method, path, "dispatching admin API call");
        let raw = state.queue().enqueue(exchange.run()).await??;

        // Shopify answers DELETE with 204 No Content; there is no body to parse.
        if method == HttpMethod::Delete && raw.status == 204 {
            return Ok(None);
        }

        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&raw.text);

        if !(200..=299).contains(&raw.status) {
            let body = parsed.unwrap_or(serde_json::Value::String(raw.text));
            return Err(RequestError::Api(ApiError {
                status: raw.status,
                body,
            }));
        }

        let json = match parsed {
            Ok(json) => json,
            Err(_) => {
                return Err(RequestError::MalformedBody {
                    status: raw.status,
                    raw: raw.text,
                })
            }
        };

        Ok(Some(match root_key {
            Some(key) => json.get(key).cloned().unwrap_or(serde_json::Value::Null),
            None => json,
        }))
    }

    fn shop_state(&self) -> Arc<ShopState> {
        self.registry.obtain(
            self.config.shop(),
            self.config.access_token().map(AsRef::as_ref),
        )
    }
}

impl Perform for RestClient {
    fn perform<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        root_key: Option<&'a str>,
        payload: Option<serde_json::Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<serde_json::Value>, RequestError>> + Send + 'a>>
    {
        Box::pin(Self::perform(self, method, path, root_key, payload))
    }
}

/// A completed physical exchange, reduced to what classification needs.
struct RawResponse {
    status: u16,
    text: String,
}

/// Everything one queued task needs to run the exchange loop.
struct Exchange {
    client: reqwest::Client,
    method: HttpMethod,
    url: String,
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<String>,
    state: Arc<ShopState>,
}

impl Exchange {
    /// Runs inside the credential's queue: wait for budget, reserve one
    /// unit, send, feed headers back, and repeat while the service answers
    /// 429. There is no retry cap; the loop exits on the first non-429
    /// outcome.
    async fn run(self) -> Result<RawResponse, reqwest::Error> {
        loop {
            self.wait_for_budget().await;
            self.state.read_limits(1);

            let mut builder = match self.method {
                HttpMethod::Get => self.client.get(&self.url),
                HttpMethod::Post => self.client.post(&self.url),
                HttpMethod::Put => self.client.put(&self.url),
                HttpMethod::Delete => self.client.delete(&self.url),
            };
            for (key, value) in &self.headers {
                builder = builder.header(key, value);
            }
            if !self.query.is_empty() {
                builder = builder.query(&self.query);
            }
            if let Some(body) = &self.body {
                builder = builder.body(body.clone());
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();

            let limit_header = response
                .headers()
                .get("x-shopify-shop-api-call-limit")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<f64>().ok());
            self.state
                .apply_response(limit_header.as_deref(), retry_after);

            if status == 429 {
                tracing::warn!(url = %self.url, retry_after, "rate limited, retrying");
                continue;
            }

            let text = response.text().await?;
            return Ok(RawResponse { status, text });
        }
    }

    /// Sleeps until the bucket has [`MIN_REMAINING`] units free and no
    /// `retry-after` countdown is pending. The backoff is proportional to
    /// the deficit: long enough for the missing units to drain, and at
    /// least the countdown itself.
    async fn wait_for_budget(&self) {
        loop {
            let limits = self.state.read_limits(0);
            if limits.remaining() >= MIN_REMAINING && limits.retry_after() <= 0.0 {
                return;
            }

            let deficit = (MIN_REMAINING - limits.remaining()).max(0.0);
            let wait = (deficit / DRAIN_RATE).max(limits.retry_after());
            tracing::warn!(
                remaining = limits.remaining(),
                retry_after = limits.retry_after(),
                wait_secs = wait,
                "stalling until rate budget recovers"
            );
            tokio::time::sleep(Duration::from_secs_f64(wait)).await;
        }
    }
}

/// Builds the request path from the API version and a resource path.
///
/// Paths that already look admin-rooted bypass the versioned prefix; a
/// `/.json` produced by joining a bare collection root collapses to
/// `.json`.
fn build_path(version: &ApiVersion, path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let joined = if trimmed.to_ascii_lowercase().starts_with("admin/") {
        trimmed.to_string()
    } else {
        format!("admin/api/{version}/{trimmed}")
    };
    joined.replace("/.json", ".json")
}

/// Flattens a JSON object payload into query parameters.
///
/// Shopify expects array values joined by commas (e.g.
/// `fields=id,title,vendor`) rather than repeated parameters. Null
/// properties are treated as absent.
fn query_pairs(payload: &serde_json::Value) -> Vec<(String, String)> {
    payload.as_object().map_or_else(Vec::new, |map| {
        map.iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key.clone(), query_value(value)))
            .collect()
    })
}

fn query_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}
