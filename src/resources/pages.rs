//! The pages resource.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// A static content page on the shop's online store.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing pages.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PageListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's pages.
#[derive(Debug)]
pub struct Pages<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Pages<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of all pages on the shop.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "pages/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of up to 250 of the shop's pages.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(&self, options: Option<&PageListOptions>) -> Result<Vec<Page>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "pages.json",
                Some("pages"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Gets the page with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Page, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("pages/{id}.json"),
                Some("page"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates a page.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, page: &Page) -> Result<Page, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "pages.json",
                Some("page"),
                Some(json!({ "page": page })),
            )
            .await?;
        decode(value)
    }

    /// Updates the page with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, page: &Page) -> Result<Page, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("pages/{id}.json"),
                Some("page"),
                Some(json!({ "page": page })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the page with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(HttpMethod::Delete, &format!("pages/{id}.json"), None, None)
            .await?;
        Ok(())
    }
}
