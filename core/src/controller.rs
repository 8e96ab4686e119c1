//! Items state controller.
//!
//! # Design
//! The controller owns one `ItemsState` and exposes the three actions a view
//! needs. Each action is one async unit of work that suspends only on the
//! network call and then applies a single transition from `state.rs`.
//!
//! Actions of the same kind are serialized: a second `fetch_items` waits for
//! the first to settle before it marks the state as loading, so `loading` is
//! only ever true for one outstanding fetch and results land in call order.
//! A fetch and a create may still run side by side. The state mutex is never
//! held across an await.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::ClientConfig;
use crate::hook::{LifecycleHook, NoopHook};
use crate::http::HttpClient;
use crate::items::ItemsApi;
use crate::state::ItemsState;
use crate::transport::Transport;
use crate::types::Item;

pub struct ItemsController<T> {
    api: ItemsApi<T>,
    state: Mutex<ItemsState>,
    fetch_gate: tokio::sync::Mutex<()>,
    create_gate: tokio::sync::Mutex<()>,
    hook: Arc<dyn LifecycleHook>,
}

impl<T> ItemsController<T> {
    pub fn new(api: ItemsApi<T>) -> Self {
        Self {
            api,
            state: Mutex::new(ItemsState::new()),
            fetch_gate: tokio::sync::Mutex::new(()),
            create_gate: tokio::sync::Mutex::new(()),
            hook: Arc::new(NoopHook),
        }
    }

    pub fn from_config(config: &ClientConfig, transport: T) -> Self {
        Self::new(ItemsApi::new(HttpClient::new(config, transport)))
    }

    pub fn with_hook(mut self, hook: impl LifecycleHook + 'static) -> Self {
        self.hook = Arc::new(hook);
        self
    }

    pub fn api(&self) -> &ItemsApi<T> {
        &self.api
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ItemsState {
        self.update(|state| state.clone())
    }

    pub fn items(&self) -> Vec<Item> {
        self.update(|state| state.items.clone())
    }

    pub fn loading(&self) -> bool {
        self.update(|state| state.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.update(|state| state.error.clone())
    }

    pub fn clear_error(&self) {
        self.update(ItemsState::clear_error);
    }

    fn update<R>(&self, f: impl FnOnce(&mut ItemsState) -> R) -> R {
        // Transitions cannot panic midway, so a poisoned lock still holds a
        // consistent state.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

impl<T: Transport> ItemsController<T> {
    /// Reload all items from the backend.
    pub async fn fetch_items(&self) {
        let _in_flight = self.fetch_gate.lock().await;

        self.update(ItemsState::begin_fetch);
        self.hook.fetch_started();

        let result = self.api.list_items().await;
        self.hook.fetch_finished(result.as_ref().map(Vec::len));

        match result {
            Ok(items) => self.update(|state| state.fetch_succeeded(items)),
            Err(e) => self.update(|state| state.fetch_failed(&e)),
        }
    }

    /// Create an item and append it locally on success.
    ///
    /// Returns whether the item was created, so a form knows whether to
    /// reset its input.
    pub async fn create_new_item(&self, name: &str) -> bool {
        let _in_flight = self.create_gate.lock().await;

        self.hook.create_started(name);
        let result = self.api.create_item(name).await;
        self.hook.create_finished(result.as_ref());

        match result {
            Ok(item) => {
                self.update(|state| state.item_created(item));
                true
            }
            Err(e) => {
                self.update(|state| state.create_failed(&e));
                false
            }
        }
    }
}
