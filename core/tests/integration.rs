//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the controller and
//! the raw HTTP client over real HTTP through `UreqTransport`. Validates that
//! request building and response parsing agree with the actual server.

use items_core::{
    ApiError, ClientConfig, HttpClient, Item, ItemsController, ResponseBody, UreqTransport,
};
use mock_server::ListShape;
use serde_json::json;

async fn start_server(shape: ListShape) -> ClientConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run_with(listener, shape));
    ClientConfig::new(format!("http://{addr}"))
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_create_fetch_lifecycle() {
    let config = start_server(ListShape::Bare).await;
    let controller = ItemsController::from_config(&config, UreqTransport::new());

    // Step 1: initial fetch — empty.
    controller.fetch_items().await;
    let state = controller.state();
    assert!(state.items.is_empty(), "expected empty list");
    assert!(!state.loading);
    assert_eq!(state.error, None);

    // Step 2: create two items; the second name is padded.
    assert!(controller.create_new_item("First").await);
    assert!(controller.create_new_item("  Second  ").await);
    let created = controller.items();
    assert_eq!(
        created,
        vec![
            Item {
                id: 1,
                name: "First".to_string()
            },
            Item {
                id: 2,
                name: "Second".to_string()
            },
        ]
    );

    // Step 3: blank name — rejected locally, server state unchanged.
    assert!(!controller.create_new_item("   ").await);
    assert!(controller.error().is_some());

    // Step 4: refetch — server agrees with the optimistic local list.
    controller.fetch_items().await;
    assert_eq!(controller.items(), created);
    assert_eq!(controller.error(), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn enveloped_list_is_normalized() {
    let config = start_server(ListShape::Enveloped).await;
    let controller = ItemsController::from_config(&config, UreqTransport::new());

    assert!(controller.create_new_item("Wrapped").await);
    controller.fetch_items().await;

    assert_eq!(
        controller.items(),
        vec![Item {
            id: 1,
            name: "Wrapped".to_string()
        }]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn server_rejection_becomes_typed_error() {
    let config = start_server(ListShape::Bare).await;
    let http = HttpClient::new(&config, UreqTransport::new());

    // Bypass local validation to reach the server's own check.
    let err = http.post("/items", &json!({ "name": "" })).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), "name must not be empty");
    assert_eq!(
        err.details(),
        Some(ResponseBody::Json(json!({ "error": "name must not be empty" })))
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn raw_get_returns_json_body() {
    let config = start_server(ListShape::Bare).await;
    let http = HttpClient::new(&config, UreqTransport::new());

    let body = http.get("/items").await.unwrap();

    assert_eq!(body, ResponseBody::Json(json!([])));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_backend_is_a_transport_error() {
    // Grab a free port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(format!("http://{addr}"));
    let http = HttpClient::new(&config, UreqTransport::new());
    let err = http.get("/items").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.status(), None);
    assert_eq!(err.message(), "Network error on GET /items");

    let controller = ItemsController::from_config(&config, UreqTransport::new());
    controller.fetch_items().await;
    assert!(!controller.loading());
    assert_eq!(controller.error().as_deref(), Some("Network error on GET /items"));
}

#[tokio::test(flavor = "multi_thread")]
async fn body_over_limit_is_a_transport_error() {
    let config = start_server(ListShape::Bare).await;
    let http = HttpClient::new(&config, UreqTransport::new());
    http.post("/items", &json!({ "name": "Long enough" })).await.unwrap();

    let capped = HttpClient::new(&config, UreqTransport::new().with_body_limit(4));
    let err = capped.get("/items").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport { .. }));
    assert_eq!(err.message(), "Network error on GET /items");
}
