//! Lifecycle notifications emitted by `ItemsController`.

use tracing::{error, info};

use crate::error::ApiError;
use crate::types::Item;

/// Observer for controller actions. Every method defaults to a no-op.
pub trait LifecycleHook: Send + Sync {
    fn fetch_started(&self) {}

    /// `Ok` carries the number of items fetched.
    fn fetch_finished(&self, _outcome: Result<usize, &ApiError>) {}

    fn create_started(&self, _name: &str) {}

    fn create_finished(&self, _outcome: Result<&Item, &ApiError>) {}
}

/// The default hook: observes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHook;

impl LifecycleHook for NoopHook {}

/// Reports controller actions as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl LifecycleHook for TracingHook {
    fn fetch_started(&self) {
        info!("fetching items");
    }

    fn fetch_finished(&self, outcome: Result<usize, &ApiError>) {
        match outcome {
            Ok(count) => info!(count, "fetched items"),
            Err(e) => error!(error = %e, status = ?e.status(), "fetch failed"),
        }
    }

    fn create_started(&self, name: &str) {
        info!(name, "creating item");
    }

    fn create_finished(&self, outcome: Result<&Item, &ApiError>) {
        match outcome {
            Ok(item) => info!(id = item.id, name = %item.name, "created item"),
            Err(e) => error!(error = %e, status = ?e.status(), "create failed"),
        }
    }
}
