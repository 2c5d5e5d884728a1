//! Shared pagination state, keyed by instance id.
//!
//! Paginators do not own their page numbers. They bind by id to a
//! [`PaginationState`] held in a registry, and re-derive their window whenever
//! the registry announces a change for that id. Several paginators may bind to
//! the same id (for example a page-size selector and a page strip over one
//! dataset); each of them receives the same notification.
//!
//! [`InstanceRegistry`] is the seam paginators consume. [`Registry`] is the
//! in-memory implementation: cheap to clone, with clones sharing one store
//! and one change stream.
//!
//! ```rust
//! use bubbletea_pagewindow::registry::{InstanceRegistry, PaginationState, Registry};
//!
//! let registry = Registry::new();
//! let mut changes = registry.subscribe();
//!
//! registry.register("results", PaginationState::new(1, 10, 95));
//! assert_eq!(changes.try_recv().unwrap(), "results");
//!
//! registry.set_total_items("results", 120).unwrap();
//! assert_eq!(registry.get_instance("results").unwrap().total_items, 120);
//! ```

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::error::{PaginationError, Result};
use crate::window;

/// Capacity of the change stream before slow subscribers start lagging.
const CHANGE_BUFFER_SIZE: usize = 64;

/// The pagination numbers of one instance.
///
/// `current_page` is 1-based. It may temporarily point past the last page
/// (for example after `total_items` shrinks); paginators correct it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// The selected page, starting at 1.
    pub current_page: usize,
    /// Items shown per page. Always at least 1 inside a [`Registry`].
    pub items_per_page: usize,
    /// Total number of items across all pages.
    pub total_items: usize,
}

impl PaginationState {
    /// Creates a state value.
    pub fn new(current_page: usize, items_per_page: usize, total_items: usize) -> Self {
        Self {
            current_page,
            items_per_page,
            total_items,
        }
    }

    /// Number of pages for this state.
    pub fn total_pages(&self) -> usize {
        window::total_pages(self.total_items, self.items_per_page)
    }
}

/// The registry interface paginators consume.
pub trait InstanceRegistry {
    /// Looks up the state registered under `id`.
    fn get_instance(&self, id: &str) -> Option<PaginationState>;

    /// Opens a stream of changed instance ids.
    ///
    /// Dropping the receiver ends the subscription.
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

/// In-memory pagination registry with change notifications.
#[derive(Debug, Clone)]
pub struct Registry {
    instances: Arc<RwLock<HashMap<String, PaginationState>>>,
    changes: broadcast::Sender<String>,
}

impl Default for Registry {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_BUFFER_SIZE);
        Self {
            instances: Arc::new(RwLock::new(HashMap::new())),
            changes,
        }
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the state under `id` and notifies subscribers.
    ///
    /// `items_per_page` is clamped to at least 1.
    pub fn register(&self, id: impl Into<String>, state: PaginationState) {
        let id = id.into();
        let state = PaginationState {
            items_per_page: state.items_per_page.max(1),
            ..state
        };
        self.instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), state);
        debug!(instance = %id, ?state, "registered pagination instance");
        self.notify(id);
    }

    /// Removes the state under `id`, notifying subscribers if it existed.
    pub fn unregister(&self, id: &str) -> Option<PaginationState> {
        let removed = self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
        if removed.is_some() {
            debug!(instance = %id, "unregistered pagination instance");
            self.notify(id.to_string());
        }
        removed
    }

    /// Whether an instance is registered under `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(id)
    }

    /// Sets the current page of `id`.
    ///
    /// The value is stored as given; paginators bound to the instance clamp
    /// it into range.
    pub fn set_current_page(&self, id: &str, page: usize) -> Result<()> {
        self.modify(id, |state| state.current_page = page)
    }

    /// Sets the page size of `id`, clamped to at least 1.
    pub fn set_items_per_page(&self, id: &str, items_per_page: usize) -> Result<()> {
        self.modify(id, |state| state.items_per_page = items_per_page.max(1))
    }

    /// Sets the total item count of `id`.
    pub fn set_total_items(&self, id: &str, total_items: usize) -> Result<()> {
        self.modify(id, |state| state.total_items = total_items)
    }

    /// Number of live change-stream subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    /// Applies `change` to `id` and notifies only if the state actually changed.
    fn modify(&self, id: &str, change: impl FnOnce(&mut PaginationState)) -> Result<()> {
        let changed = {
            let mut instances = self
                .instances
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let state = instances
                .get_mut(id)
                .ok_or_else(|| PaginationError::UnboundInstance { id: id.to_string() })?;
            let before = *state;
            change(state);
            *state != before
        };

        if changed {
            self.notify(id.to_string());
        } else {
            trace!(instance = %id, "pagination state unchanged, skipping notification");
        }
        Ok(())
    }

    fn notify(&self, id: String) {
        // Sending fails only when nobody is listening.
        if self.changes.send(id).is_err() {
            trace!("no pagination subscribers");
        }
    }
}

impl InstanceRegistry for Registry {
    fn get_instance(&self, id: &str) -> Option<PaginationState> {
        self.instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .copied()
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}
