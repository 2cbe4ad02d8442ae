//! The customers resource.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// A customer of the shop.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_spent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing customers.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CustomerListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's customers.
#[derive(Debug)]
pub struct Customers<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Customers<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of all of the shop's customers.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "customers/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 of the shop's customers.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(
        &self,
        options: Option<&CustomerListOptions>,
    ) -> Result<Vec<Customer>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "customers.json",
                Some("customers"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Searches customers matching the given query.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn search(&self, query: &str) -> Result<Vec<Customer>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "customers/search.json",
                Some("customers"),
                Some(json!({ "query": query })),
            )
            .await?;
        decode(value)
    }

    /// Gets the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Customer, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("customers/{id}.json"),
                Some("customer"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, customer: &Customer) -> Result<Customer, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "customers.json",
                Some("customer"),
                Some(json!({ "customer": customer })),
            )
            .await?;
        decode(value)
    }

    /// Updates the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, customer: &Customer) -> Result<Customer, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("customers/{id}.json"),
                Some("customer"),
                Some(json!({ "customer": customer })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the customer with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(
                HttpMethod::Delete,
                &format!("customers/{id}.json"),
                None,
                None,
            )
            .await?;
        Ok(())
    }
}
