//! The products resource.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// A product in the shop's catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing products.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's products.
#[derive(Debug)]
pub struct Products<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Products<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of all of the shop's products.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "products/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 of the shop's products.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(
        &self,
        options: Option<&ProductListOptions>,
    ) -> Result<Vec<Product>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "products.json",
                Some("products"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Gets the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Product, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("products/{id}.json"),
                Some("product"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, product: &Product) -> Result<Product, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "products.json",
                Some("product"),
                Some(json!({ "product": product })),
            )
            .await?;
        decode(value)
    }

    /// Updates the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, product: &Product) -> Result<Product, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("products/{id}.json"),
                Some("product"),
                Some(json!({ "product": product })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(
                HttpMethod::Delete,
                &format!("products/{id}.json"),
                None,
                None,
            )
            .await?;
        Ok(())
    }
}
