//! Domain DTOs for the items API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::http::ResponseBody;

/// A single item. Ids are assigned by the backend.
///
/// Decodes only from a JSON object; positional rows like `[1, "A"]` are
/// rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Map<String, Value>")]
pub struct Item {
    pub id: i64,
    pub name: String,
}

#[derive(Deserialize)]
struct ItemFields {
    id: i64,
    name: String,
}

impl TryFrom<Map<String, Value>> for Item {
    type Error = serde_json::Error;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let ItemFields { id, name } = serde_json::from_value(Value::Object(fields))?;
        Ok(Item { id, name })
    }
}

/// Request payload for creating a new item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateItem {
    pub name: String,
}

/// Accepted shapes of a list response.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireItems {
    Bare(Vec<Item>),
    Enveloped { data: Vec<Item> },
}

/// Decoded list response.
///
/// The backend may answer with a bare array or with `{ "data": [...] }`.
/// Anything else is `Empty`: list normalization never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemsPayload {
    Bare(Vec<Item>),
    Enveloped(Vec<Item>),
    Empty,
}

impl ItemsPayload {
    pub fn decode(body: &ResponseBody) -> Self {
        let value = match body {
            ResponseBody::Json(value) => value,
            ResponseBody::Text(_) => {
                warn!("items response is not JSON; treating as empty");
                return ItemsPayload::Empty;
            }
        };
        match WireItems::deserialize(value) {
            Ok(WireItems::Bare(items)) => ItemsPayload::Bare(items),
            Ok(WireItems::Enveloped { data }) => ItemsPayload::Enveloped(data),
            Err(e) => {
                warn!(error = %e, "unrecognized items response shape; treating as empty");
                ItemsPayload::Empty
            }
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        match self {
            ItemsPayload::Bare(items) | ItemsPayload::Enveloped(items) => items,
            ItemsPayload::Empty => Vec::new(),
        }
    }
}
