use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const MAX_NAME_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
}

/// How `GET /items` wraps its array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListShape {
    /// `[ ... ]`
    #[default]
    Bare,
    /// `{ "data": [ ... ] }`
    Enveloped,
}

#[derive(Default)]
struct Store {
    next_id: i64,
    items: Vec<Item>,
}

#[derive(Clone)]
struct AppState {
    db: Arc<RwLock<Store>>,
    shape: ListShape,
}

pub fn app() -> Router {
    app_with(ListShape::Bare)
}

pub fn app_with(shape: ListShape) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        shape,
    };
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .with_state(state)
}

pub async fn run_with(listener: TcpListener, shape: ListShape) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(shape)).await
}

async fn list_items(State(state): State<AppState>) -> Json<Value> {
    let store = state.db.read().await;
    let items = json!(store.items);
    match state.shape {
        ListShape::Bare => Json(items),
        ListShape::Enveloped => Json(json!({ "data": items })),
    }
}

async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<Item>), (StatusCode, Json<Value>)> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(bad_request("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(bad_request(&format!("name must be at most {MAX_NAME_LEN} characters")));
    }

    let mut store = state.db.write().await;
    store.next_id += 1;
    let item = Item {
        id: store.next_id,
        name: name.to_string(),
    };
    store.items.push(item.clone());
    tracing::debug!(id = item.id, name = %item.name, "created item");
    Ok((StatusCode::CREATED, Json(item)))
}

fn bad_request(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}
