//! The orders resource.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// An order placed in the shop.
///
/// All fields are optional: reads may be narrowed with `fields`, and the
/// same shape doubles as the partial payload for create and update calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Filters for listing orders.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    /// Order status filter: `open`, `closed`, `cancelled`, or `any`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fulfillment_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's orders.
#[derive(Debug)]
pub struct Orders<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Orders<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of all of the shop's orders.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "orders/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 of the shop's orders.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(&self, options: Option<&OrderListOptions>) -> Result<Vec<Order>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "orders.json",
                Some("orders"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 orders from the given customer.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list_for_customer(
        &self,
        customer_id: i64,
        options: Option<&OrderListOptions>,
    ) -> Result<Vec<Order>, RequestError> {
        let mut payload = to_payload(options)?.unwrap_or_else(|| json!({}));
        payload["customer_id"] = json!(customer_id);

        let value = self
            .client
            .perform(HttpMethod::Get, "orders.json", Some("orders"), Some(payload))
            .await?;
        decode(value)
    }

    /// Gets the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("orders/{id}.json"),
                Some("order"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates an order.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, order: &Order) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "orders.json",
                Some("order"),
                Some(json!({ "order": order })),
            )
            .await?;
        decode(value)
    }

    /// Updates the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, order: &Order) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("orders/{id}.json"),
                Some("order"),
                Some(json!({ "order": order })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(HttpMethod::Delete, &format!("orders/{id}.json"), None, None)
            .await?;
        Ok(())
    }

    /// Closes the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn close(&self, id: i64) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                &format!("orders/{id}/close.json"),
                Some("order"),
                None,
            )
            .await?;
        decode(value)
    }

    /// Re-opens the closed order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn open(&self, id: i64) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                &format!("orders/{id}/open.json"),
                Some("order"),
                None,
            )
            .await?;
        decode(value)
    }

    /// Cancels the order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn cancel(&self, id: i64) -> Result<Order, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                &format!("orders/{id}/cancel.json"),
                Some("order"),
                None,
            )
            .await?;
        decode(value)
    }
}
