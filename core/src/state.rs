//! In-memory items state and its transitions.
//!
//! Every transition is a plain `&mut self` method so the controller can apply
//! it under a short-held lock; none of them can fail.

use crate::error::ApiError;
use crate::types::Item;

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch items";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create item";

/// What the view renders from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsState {
    /// Last successful fetch, plus items created since, in order.
    pub items: Vec<Item>,
    /// True while a fetch is outstanding.
    pub loading: bool,
    pub error: Option<String>,
}

impl ItemsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn fetch_succeeded(&mut self, items: Vec<Item>) {
        self.items = items;
        self.loading = false;
        self.error = None;
    }

    /// Items from before the fetch are kept.
    pub fn fetch_failed(&mut self, err: &ApiError) {
        self.loading = false;
        self.error = Some(message_or(err, FETCH_FAILED_MESSAGE));
    }

    pub fn item_created(&mut self, item: Item) {
        self.items.push(item);
        self.error = None;
    }

    pub fn create_failed(&mut self, err: &ApiError) {
        self.error = Some(message_or(err, CREATE_FAILED_MESSAGE));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn message_or(err: &ApiError, fallback: &str) -> String {
    let message = err.message();
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
