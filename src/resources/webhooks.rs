//! The webhooks resource.
//!
//! Creating and listing webhook subscriptions goes through the Admin API
//! like any other resource; verifying the deliveries Shopify then sends is
//! handled by [`crate::auth::hmac`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// A webhook subscription.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Webhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Event topic, e.g. `orders/create`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Destination URI for deliveries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Delivery format: `json` or `xml`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Payload fields to include; empty means all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing webhook subscriptions.
#[derive(Clone, Debug, Default, Serialize)]
pub struct WebhookListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's webhook subscriptions.
#[derive(Debug)]
pub struct Webhooks<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Webhooks<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of the shop's webhook subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "webhooks/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 of the shop's webhook subscriptions.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(
        &self,
        options: Option<&WebhookListOptions>,
    ) -> Result<Vec<Webhook>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "webhooks.json",
                Some("webhooks"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Gets the webhook subscription with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Webhook, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("webhooks/{id}.json"),
                Some("webhook"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates a webhook subscription.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, webhook: &Webhook) -> Result<Webhook, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "webhooks.json",
                Some("webhook"),
                Some(json!({ "webhook": webhook })),
            )
            .await?;
        decode(value)
    }

    /// Updates the webhook subscription with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, webhook: &Webhook) -> Result<Webhook, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("webhooks/{id}.json"),
                Some("webhook"),
                Some(json!({ "webhook": webhook })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the webhook subscription with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(
                HttpMethod::Delete,
                &format!("webhooks/{id}.json"),
                None,
                None,
            )
            .await?;
        Ok(())
    }
}
