//! The blogs resource.
//!
//! For manipulating a blog's posts, Shopify exposes a separate articles
//! collection; this service covers the blogs themselves.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, Perform, RequestError, RestClient};
use crate::resources::{decode, fields_payload, to_payload};

/// A blog hosted on the shop.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Comment policy: `no`, `moderate`, or `yes`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Filters for listing blogs.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BlogListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// A service for manipulating a shop's blogs.
#[derive(Debug)]
pub struct Blogs<D = RestClient> {
    client: Arc<D>,
}

impl<D: Perform> Blogs<D> {
    /// Creates the service on top of a shared dispatch capability.
    pub const fn new(client: Arc<D>) -> Self {
        Self { client }
    }

    /// Gets a count of all blogs on the shop.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn count(&self) -> Result<u64, RequestError> {
        let value = self
            .client
            .perform(HttpMethod::Get, "blogs/count.json", Some("count"), None)
            .await?;
        decode(value)
    }

    /// Gets a list of all blogs on the shop.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn list(&self, options: Option<&BlogListOptions>) -> Result<Vec<Blog>, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                "blogs.json",
                Some("blogs"),
                to_payload(options)?,
            )
            .await?;
        decode(value)
    }

    /// Gets the blog with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn get(&self, id: i64, fields: Option<&[&str]>) -> Result<Blog, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Get,
                &format!("blogs/{id}.json"),
                Some("blog"),
                fields_payload(fields),
            )
            .await?;
        decode(value)
    }

    /// Creates a new blog.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn create(&self, blog: &Blog) -> Result<Blog, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Post,
                "blogs.json",
                Some("blog"),
                Some(json!({ "blog": blog })),
            )
            .await?;
        decode(value)
    }

    /// Updates the blog with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn update(&self, id: i64, blog: &Blog) -> Result<Blog, RequestError> {
        let value = self
            .client
            .perform(
                HttpMethod::Put,
                &format!("blogs/{id}.json"),
                Some("blog"),
                Some(json!({ "blog": blog })),
            )
            .await?;
        decode(value)
    }

    /// Deletes the blog with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] if the call fails.
    pub async fn delete(&self, id: i64) -> Result<(), RequestError> {
        self.client
            .perform(HttpMethod::Delete, &format!("blogs/{id}.json"), None, None)
            .await?;
        Ok(())
    }
}
