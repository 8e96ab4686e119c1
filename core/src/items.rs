//! Items data accessor: list and create on top of [`HttpClient`].

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpClient, HttpRequest, HttpResponse, ResponseBody};
use crate::transport::Transport;
use crate::types::{CreateItem, Item, ItemsPayload};

pub const ITEMS_ENDPOINT: &str = "/items";

/// Longest accepted item name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 100;

pub const EMPTY_NAME_MESSAGE: &str = "Item name must be a non-empty string";

/// Trim `name` and check it is acceptable to send to the backend.
pub fn validate_name(name: &str) -> Result<String, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(EMPTY_NAME_MESSAGE.to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "Item name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone)]
pub struct ItemsApi<T> {
    http: HttpClient<T>,
}

impl<T> ItemsApi<T> {
    pub fn new(http: HttpClient<T>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient<T> {
        &self.http
    }

    pub fn build_list_items(&self) -> HttpRequest {
        self.http.build_get(ITEMS_ENDPOINT)
    }

    pub fn build_create_item(&self, name: &str) -> Result<HttpRequest, ApiError> {
        let payload = CreateItem {
            name: validate_name(name)?,
        };
        self.http.build_post(ITEMS_ENDPOINT, &payload)
    }

    pub fn parse_list_items(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<Vec<Item>, ApiError> {
        let body = self.http.parse_response(request, response)?;
        Ok(ItemsPayload::decode(&body).into_items())
    }

    pub fn parse_create_item(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<Item, ApiError> {
        let status = response.status;
        let body = self.http.parse_response(request, response)?;
        decode_created(body, Some(status))
    }
}

impl<T: Transport> ItemsApi<T> {
    /// Fetch every item. Unrecognized response shapes yield an empty list.
    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        let request = self.build_list_items();
        let response = self.http.execute(&request).await?;
        let items = self.parse_list_items(&request, response)?;
        debug!(count = items.len(), "listed items");
        Ok(items)
    }

    /// Create an item. Invalid names fail before any request is sent.
    pub async fn create_item(&self, name: &str) -> Result<Item, ApiError> {
        let request = self.build_create_item(name)?;
        let response = self.http.execute(&request).await?;
        self.parse_create_item(&request, response)
    }
}

fn decode_created(body: ResponseBody, status: Option<u16>) -> Result<Item, ApiError> {
    match body {
        ResponseBody::Json(value) => {
            serde_json::from_value(value.clone()).map_err(|e| ApiError::Decode {
                status,
                message: format!("Created item response is not an item: {e}"),
                details: value.to_string(),
            })
        }
        ResponseBody::Text(text) => Err(ApiError::Decode {
            status,
            message: "Created item response is not JSON".to_string(),
            details: text,
        }),
    }
}
