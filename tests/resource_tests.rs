//! Service-level tests for the resource layer.
//!
//! Resource services are mechanical mappings of paths, root keys, and
//! payload shapes onto the dispatch capability. These tests substitute a
//! recording mock for the HTTP client and assert the mapping, keeping the
//! network entirely out of the picture.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;

use shopify_admin::clients::{HttpMethod, Perform, RequestError};
use shopify_admin::resources::{
    Blogs, Customers, Order, OrderListOptions, Orders, Page, Pages, Products, Webhook, Webhooks,
};

/// One recorded `perform` invocation.
#[derive(Clone, Debug, PartialEq)]
struct RecordedCall {
    method: HttpMethod,
    path: String,
    root_key: Option<String>,
    payload: Option<serde_json::Value>,
}

/// A dispatch capability that records calls and replays canned payloads.
#[derive(Debug, Default)]
struct MockDispatch {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Option<serde_json::Value>>>,
}

impl MockDispatch {
    fn returning(responses: Vec<Option<serde_json::Value>>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        })
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Perform for MockDispatch {
    fn perform<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        root_key: Option<&'a str>,
        payload: Option<serde_json::Value>,
    ) -> Pin<Box<dyn Future<Output = Result<Option<serde_json::Value>, RequestError>> + Send + 'a>>
    {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            root_key: root_key.map(str::to_owned),
            payload,
        });
        let response = self.responses.lock().unwrap().pop_front().flatten();
        Box::pin(async move { Ok(response) })
    }
}

#[tokio::test]
async fn test_orders_list_maps_to_collection_endpoint() {
    let dispatch = MockDispatch::returning(vec![Some(json!([
        {"id": 1, "email": "a@example.com"},
        {"id": 2, "email": "b@example.com"},
    ]))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let listed = orders.list(None).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(1));
    assert_eq!(listed[1].email.as_deref(), Some("b@example.com"));

    let calls = dispatch.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, HttpMethod::Get);
    assert_eq!(calls[0].path, "orders.json");
    assert_eq!(calls[0].root_key.as_deref(), Some("orders"));
    assert_eq!(calls[0].payload, None);
}

#[tokio::test]
async fn test_orders_list_serializes_options_without_unset_fields() {
    let dispatch = MockDispatch::returning(vec![Some(json!([]))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let options = OrderListOptions {
        limit: Some(50),
        status: Some("open".to_string()),
        fields: Some(vec!["id".to_string(), "email".to_string()]),
        ..OrderListOptions::default()
    };
    orders.list(Some(&options)).await.unwrap();

    let calls = dispatch.calls();
    assert_eq!(
        calls[0].payload,
        Some(json!({"limit": 50, "status": "open", "fields": ["id", "email"]}))
    );
}

#[tokio::test]
async fn test_orders_list_for_customer_merges_customer_id() {
    let dispatch = MockDispatch::returning(vec![Some(json!([]))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let options = OrderListOptions {
        status: Some("any".to_string()),
        ..OrderListOptions::default()
    };
    orders.list_for_customer(207119551, Some(&options)).await.unwrap();

    let calls = dispatch.calls();
    assert_eq!(calls[0].path, "orders.json");
    assert_eq!(
        calls[0].payload,
        Some(json!({"customer_id": 207119551, "status": "any"}))
    );
}

#[tokio::test]
async fn test_orders_get_requests_narrowed_fields() {
    let dispatch = MockDispatch::returning(vec![Some(json!({"id": 450789469}))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let order = orders
        .get(450789469, Some(&["id", "email"]))
        .await
        .unwrap();
    assert_eq!(order.id, Some(450789469));

    let calls = dispatch.calls();
    assert_eq!(calls[0].path, "orders/450789469.json");
    assert_eq!(calls[0].root_key.as_deref(), Some("order"));
    assert_eq!(calls[0].payload, Some(json!({"fields": ["id", "email"]})));
}

#[tokio::test]
async fn test_orders_create_wraps_payload_and_skips_unset_fields() {
    let dispatch =
        MockDispatch::returning(vec![Some(json!({"id": 1, "email": "new@example.com"}))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let order = Order {
        email: Some("new@example.com".to_string()),
        ..Order::default()
    };
    let created = orders.create(&order).await.unwrap();
    assert_eq!(created.id, Some(1));

    let calls = dispatch.calls();
    assert_eq!(calls[0].method, HttpMethod::Post);
    assert_eq!(calls[0].path, "orders.json");
    // Unset model fields must not appear in the request body.
    assert_eq!(
        calls[0].payload,
        Some(json!({"order": {"email": "new@example.com"}}))
    );
}

#[tokio::test]
async fn test_orders_update_targets_resource_path() {
    let dispatch = MockDispatch::returning(vec![Some(json!({"id": 1, "note": "rush"}))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let order = Order {
        note: Some("rush".to_string()),
        ..Order::default()
    };
    orders.update(1, &order).await.unwrap();

    let calls = dispatch.calls();
    assert_eq!(calls[0].method, HttpMethod::Put);
    assert_eq!(calls[0].path, "orders/1.json");
    assert_eq!(calls[0].payload, Some(json!({"order": {"note": "rush"}})));
}

#[tokio::test]
async fn test_orders_delete_yields_unit() {
    let dispatch = MockDispatch::returning(vec![None]);
    let orders = Orders::new(Arc::clone(&dispatch));

    orders.delete(450789469).await.unwrap();

    let calls = dispatch.calls();
    assert_eq!(calls[0].method, HttpMethod::Delete);
    assert_eq!(calls[0].path, "orders/450789469.json");
    assert_eq!(calls[0].root_key, None);
}

#[tokio::test]
async fn test_orders_status_transitions_post_to_action_paths() {
    let dispatch = MockDispatch::returning(vec![
        Some(json!({"id": 1})),
        Some(json!({"id": 1})),
        Some(json!({"id": 1})),
    ]);
    let orders = Orders::new(Arc::clone(&dispatch));

    orders.close(1).await.unwrap();
    orders.open(1).await.unwrap();
    orders.cancel(1).await.unwrap();

    let paths: Vec<_> = dispatch.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec!["orders/1/close.json", "orders/1/open.json", "orders/1/cancel.json"]
    );
    assert!(dispatch
        .calls()
        .iter()
        .all(|c| c.method == HttpMethod::Post));
}

#[tokio::test]
async fn test_order_timestamps_deserialize_from_rfc3339() {
    let dispatch = MockDispatch::returning(vec![Some(json!({
        "id": 1,
        "created_at": "2020-01-10T11:00:00-05:00",
    }))]);
    let orders = Orders::new(Arc::clone(&dispatch));

    let order = orders.get(1, None).await.unwrap();
    let created_at = order.created_at.unwrap();
    assert_eq!(created_at.to_rfc3339(), "2020-01-10T16:00:00+00:00");
}

#[tokio::test]
async fn test_products_count_unwraps_count_root_key() {
    let dispatch = MockDispatch::returning(vec![Some(json!(37))]);
    let products = Products::new(Arc::clone(&dispatch));

    let count = products.count().await.unwrap();
    assert_eq!(count, 37);

    let calls = dispatch.calls();
    assert_eq!(calls[0].path, "products/count.json");
    assert_eq!(calls[0].root_key.as_deref(), Some("count"));
}

#[tokio::test]
async fn test_customers_search_sends_query_payload() {
    let dispatch = MockDispatch::returning(vec![Some(json!([{"id": 5}]))]);
    let customers = Customers::new(Arc::clone(&dispatch));

    let found = customers.search("email:bob@example.com").await.unwrap();
    assert_eq!(found[0].id, Some(5));

    let calls = dispatch.calls();
    assert_eq!(calls[0].path, "customers/search.json");
    assert_eq!(
        calls[0].payload,
        Some(json!({"query": "email:bob@example.com"}))
    );
}

#[tokio::test]
async fn test_blogs_crud_paths() {
    let dispatch = MockDispatch::returning(vec![
        Some(json!([{"id": 241253187, "title": "News"}])),
        Some(json!({"id": 241253187, "title": "News"})),
        None,
    ]);
    let blogs = Blogs::new(Arc::clone(&dispatch));

    let listed = blogs.list(None).await.unwrap();
    assert_eq!(listed[0].title.as_deref(), Some("News"));

    blogs.get(241253187, None).await.unwrap();
    blogs.delete(241253187).await.unwrap();

    let paths: Vec<_> = dispatch.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        vec!["blogs.json", "blogs/241253187.json", "blogs/241253187.json"]
    );
}

#[tokio::test]
async fn test_pages_create_wraps_payload() {
    let dispatch = MockDispatch::returning(vec![Some(json!({"id": 131092082, "title": "About"}))]);
    let pages = Pages::new(Arc::clone(&dispatch));

    let page = Page {
        title: Some("About".to_string()),
        body_html: Some("<p>We sell things.</p>".to_string()),
        ..Page::default()
    };
    let created = pages.create(&page).await.unwrap();
    assert_eq!(created.id, Some(131092082));

    let calls = dispatch.calls();
    assert_eq!(calls[0].path, "pages.json");
    assert_eq!(
        calls[0].payload,
        Some(json!({"page": {"title": "About", "body_html": "<p>We sell things.</p>"}}))
    );
}

#[tokio::test]
async fn test_webhooks_create_wraps_subscription() {
    let dispatch = MockDispatch::returning(vec![Some(json!({
        "id": 4759306,
        "topic": "orders/create",
        "address": "https://app.example.com/hooks",
        "format": "json",
    }))]);
    let webhooks = Webhooks::new(Arc::clone(&dispatch));

    let subscription = Webhook {
        topic: Some("orders/create".to_string()),
        address: Some("https://app.example.com/hooks".to_string()),
        format: Some("json".to_string()),
        ..Webhook::default()
    };
    let created = webhooks.create(&subscription).await.unwrap();
    assert_eq!(created.id, Some(4759306));

    let calls = dispatch.calls();
    assert_eq!(calls[0].method, HttpMethod::Post);
    assert_eq!(calls[0].path, "webhooks.json");
    assert_eq!(
        calls[0].payload,
        Some(json!({"webhook": {
            "topic": "orders/create",
            "address": "https://app.example.com/hooks",
            "format": "json",
        }}))
    );
}

#[tokio::test]
async fn test_decode_failure_surfaces_as_decode_error() {
    // A count endpoint answering with an object instead of a number.
    let dispatch = MockDispatch::returning(vec![Some(json!({"unexpected": true}))]);
    let products = Products::new(Arc::clone(&dispatch));

    let result = products.count().await;
    assert!(matches!(result, Err(RequestError::Decode(_))));
}
