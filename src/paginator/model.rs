//! The paginator model: view state, registry binding and navigation.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, watch, Mutex};
use tracing::{debug, trace, warn};

use super::keymap::PaginatorKeyMap;
use super::types::{CorrectionMsg, Deferred, InstanceChangedMsg, PageChangeMsg};
use crate::error::{PaginationError, Result};
use crate::registry::{InstanceRegistry, PaginationState, Registry};
use crate::window::{compute_window, DisplayOptions, PageMarker};
use crate::Component;

/// The first page number. Pages are 1-based.
pub const FIRST_PAGE: usize = 1;

static LAST_ID: AtomicI64 = AtomicI64::new(0);
static LAST_TAG: AtomicU64 = AtomicU64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

fn next_tag() -> u64 {
    LAST_TAG.fetch_add(1, Ordering::SeqCst) + 1
}

/// Clamps the registry's current page into `[1, total_pages]`.
///
/// When there are no pages at all, only the lower bound applies: a page of
/// `5` over zero items stays `5`, and [`Model::last_page`] reports `0`. The
/// window is empty in that case, so no marker is active. The state itself is
/// never modified.
///
/// ```rust
/// use bubbletea_pagewindow::paginator::correct;
/// use bubbletea_pagewindow::registry::PaginationState;
///
/// assert_eq!(correct(&PaginationState::new(999, 10, 25)), 3);
/// assert_eq!(correct(&PaginationState::new(0, 10, 25)), 1);
/// assert_eq!(correct(&PaginationState::new(2, 10, 25)), 2);
/// assert_eq!(correct(&PaginationState::new(4, 10, 0)), 4);
/// ```
pub fn correct(state: &PaginationState) -> usize {
    let total_pages = state.total_pages();
    if total_pages > 0 && state.current_page > total_pages {
        total_pages
    } else if state.current_page < FIRST_PAGE {
        FIRST_PAGE
    } else {
        state.current_page
    }
}

/// Receivers drained by the listener command.
#[derive(Debug)]
struct Inbox {
    changes: broadcast::Receiver<String>,
    deferred: mpsc::UnboundedReceiver<Deferred>,
}

/// A live binding to the registry's change stream.
///
/// Dropping it cancels the in-flight listener, which releases the receivers
/// and discards anything still queued in the mailbox.
#[derive(Debug)]
struct Subscription {
    tag: u64,
    inbox: Arc<Mutex<Inbox>>,
    mailbox: mpsc::UnboundedSender<Deferred>,
    cancel: watch::Sender<()>,
}

impl Subscription {
    fn open<R: InstanceRegistry>(registry: &R) -> Self {
        let (mailbox, deferred) = mpsc::unbounded_channel();
        let (cancel, _) = watch::channel(());
        Self {
            tag: next_tag(),
            inbox: Arc::new(Mutex::new(Inbox {
                changes: registry.subscribe(),
                deferred,
            })),
            mailbox,
            cancel,
        }
    }
}

/// A paginator bound to one registry instance.
///
/// The model keeps the page window for its instance up to date. Whenever the
/// registry reports a change for the bound id, it re-reads the state, clamps
/// an out-of-range page, and recomputes [`pages`](Model::pages).
///
/// Corrections and page-change events are queued in a per-paginator mailbox
/// and delivered by the listener command after the current `update` returns,
/// so a change notification never re-enters the paginator.
///
/// # Examples
///
/// ```rust
/// use bubbletea_pagewindow::paginator::Model;
/// use bubbletea_pagewindow::registry::{PaginationState, Registry};
///
/// let registry = Registry::new();
/// registry.register("results", PaginationState::new(5, 10, 100));
///
/// let mut paginator = Model::new("results", registry.clone())
///     .with_max_visible(5)
///     .with_boundary_link_numbers(true);
///
/// let _listener = paginator.activate().expect("instance is registered");
/// assert_eq!(paginator.current_page(), 5);
/// assert_eq!(paginator.last_page(), 10);
/// assert_eq!(paginator.view(), "1 2 3 4 [5] 6 7 … 10");
/// ```
///
/// Binding to an unknown instance fails before anything is subscribed:
///
/// ```rust
/// use bubbletea_pagewindow::paginator::Model;
/// use bubbletea_pagewindow::registry::Registry;
///
/// let registry = Registry::new();
/// let mut paginator = Model::new("missing", registry.clone());
/// assert!(paginator.activate().is_err());
/// assert_eq!(registry.subscriber_count(), 0);
/// ```
#[derive(Debug)]
pub struct Model<R: InstanceRegistry = Registry> {
    /// Display constraints used when computing the window.
    pub options: DisplayOptions,
    /// Size setting, `"sm"` or `"lg"`; anything else means default size.
    pub size: String,
    /// Key bindings.
    pub keymap: PaginatorKeyMap,

    id: i64,
    instance: String,
    registry: R,
    current_page: usize,
    last_page: usize,
    pages: Vec<PageMarker>,
    focus: bool,
    subscription: Option<Subscription>,
}

impl<R: InstanceRegistry> Model<R> {
    /// Creates an inactive paginator bound to `instance` in `registry`.
    ///
    /// Call [`activate`](Model::activate) to start tracking the instance.
    pub fn new(instance: impl Into<String>, registry: R) -> Self {
        Self {
            options: DisplayOptions::default(),
            size: String::new(),
            keymap: PaginatorKeyMap::default(),
            id: next_id(),
            instance: instance.into(),
            registry,
            current_page: 0,
            last_page: 0,
            pages: Vec::new(),
            focus: false,
            subscription: None,
        }
    }

    /// Replaces the display options.
    pub fn with_options(mut self, options: DisplayOptions) -> Self {
        self.options = options;
        self
    }

    /// Limits the window to `max_visible` page buttons.
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.options = self.options.with_max_visible(max_visible);
        self
    }

    /// Selects rotate (`true`) or block (`false`) windowing.
    pub fn with_rotate(mut self, rotate: bool) -> Self {
        self.options = self.options.with_rotate(rotate);
        self
    }

    /// Always shows the first and last page numbers.
    pub fn with_boundary_link_numbers(mut self, enabled: bool) -> Self {
        self.options = self.options.with_boundary_link_numbers(enabled);
        self
    }

    /// Shows ellipses in rotate mode.
    pub fn with_force_ellipses(mut self, enabled: bool) -> Self {
        self.options = self.options.with_force_ellipses(enabled);
        self
    }

    /// Shows first/last controls in the view.
    pub fn with_boundary_links(mut self, enabled: bool) -> Self {
        self.options = self.options.with_boundary_links(enabled);
        self
    }

    /// Shows previous/next controls in the view.
    pub fn with_direction_links(mut self, enabled: bool) -> Self {
        self.options = self.options.with_direction_links(enabled);
        self
    }

    /// Sets the size hint, `"sm"` or `"lg"`.
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, keymap: PaginatorKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Unique id of this paginator, carried by its messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The registry instance this paginator is bound to.
    pub fn instance(&self) -> &str {
        &self.instance
    }

    /// The selected page; `0` until the first update.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Always [`FIRST_PAGE`].
    pub fn first_page(&self) -> usize {
        FIRST_PAGE
    }

    /// Number of pages at the last update.
    pub fn last_page(&self) -> usize {
        self.last_page
    }

    /// The current page window.
    pub fn pages(&self) -> &[PageMarker] {
        &self.pages
    }

    /// Whether the paginator currently holds a subscription.
    pub fn is_active(&self) -> bool {
        self.subscription.is_some()
    }

    /// Style token for the configured size: `pagination-sm`, `pagination-lg`
    /// or nothing.
    pub fn pagination_size(&self) -> Option<String> {
        match self.size.as_str() {
            "sm" | "lg" => Some(format!("pagination-{}", self.size)),
            _ => None,
        }
    }

    /// Binds to the registry and computes the initial window.
    ///
    /// Fails with [`PaginationError::UnboundInstance`] when no state is
    /// registered under the paginator's id; in that case nothing is
    /// subscribed and no window is computed. Activating an active paginator
    /// replaces its subscription.
    ///
    /// The returned command listens for registry changes and deferred work.
    /// Hand it to the bubbletea runtime and forward its messages to
    /// [`update`](Model::update).
    pub fn activate(&mut self) -> Result<Cmd> {
        if self.registry.get_instance(&self.instance).is_none() {
            warn!(instance = %self.instance, "cannot activate paginator for unregistered instance");
            return Err(PaginationError::UnboundInstance {
                id: self.instance.clone(),
            });
        }

        self.deactivate();
        let subscription = Subscription::open(&self.registry);
        let listener = self.listener(&subscription);
        debug!(instance = %self.instance, id = self.id, tag = subscription.tag, "paginator activated");
        self.subscription = Some(subscription);

        self.update_pages();
        Ok(listener)
    }

    /// Releases the subscription.
    ///
    /// The in-flight listener resolves without a message, and queued
    /// corrections or events are dropped. Calling this on an inactive
    /// paginator does nothing.
    pub fn deactivate(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            debug!(instance = %self.instance, id = self.id, tag = subscription.tag, "paginator deactivated");
        }
    }

    /// Handles registry notifications, deferred work and key presses.
    ///
    /// Returns the next listener command when the message came from this
    /// paginator's listener.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(changed) = msg.downcast_ref::<InstanceChangedMsg>() {
            if !self.owns(changed.tag) {
                return None;
            }
            if changed.instance == self.instance {
                self.update_pages();
            }
            return self.listen();
        }

        if let Some(correction) = msg.downcast_ref::<CorrectionMsg>() {
            if correction.id != self.id || !self.owns(correction.tag) {
                return None;
            }
            self.apply_correction(correction.page);
            return self.listen();
        }

        if let Some(change) = msg.downcast_ref::<PageChangeMsg>() {
            if change.id != self.id || !self.owns(change.tag) {
                return None;
            }
            return self.listen();
        }

        if self.focus {
            if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
                if self.keymap.next_page.matches(key_msg) {
                    self.to_next();
                } else if self.keymap.prev_page.matches(key_msg) {
                    self.to_previous();
                } else if self.keymap.first_page.matches(key_msg) {
                    self.to_first();
                } else if self.keymap.last_page.matches(key_msg) {
                    self.to_last();
                }
            }
        }

        None
    }

    /// Moves to the previous page unless already on the first one.
    pub fn to_previous(&mut self) {
        if self.current_page > FIRST_PAGE {
            self.set_current_page(self.current_page - 1);
        }
    }

    /// Moves to the next page unless already on the last one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagewindow::paginator::Model;
    /// use bubbletea_pagewindow::registry::{PaginationState, Registry};
    ///
    /// let registry = Registry::new();
    /// registry.register("results", PaginationState::new(2, 10, 30));
    /// let mut paginator = Model::new("results", registry);
    /// let _listener = paginator.activate().expect("instance is registered");
    ///
    /// paginator.to_next();
    /// assert_eq!(paginator.current_page(), 3);
    ///
    /// // Already on the last page.
    /// paginator.to_next();
    /// assert_eq!(paginator.current_page(), 3);
    /// ```
    pub fn to_next(&mut self) {
        if self.current_page < self.last_page {
            self.set_current_page(self.current_page + 1);
        }
    }

    /// Moves to the first page.
    pub fn to_first(&mut self) {
        self.set_current_page(FIRST_PAGE);
    }

    /// Moves to the last page.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagewindow::paginator::Model;
    /// use bubbletea_pagewindow::registry::{PaginationState, Registry};
    ///
    /// let registry = Registry::new();
    /// registry.register("results", PaginationState::new(1, 20, 500));
    /// let mut paginator = Model::new("results", registry);
    /// let _listener = paginator.activate().expect("instance is registered");
    ///
    /// paginator.to_last();
    /// assert_eq!(paginator.current_page(), 25);
    /// ```
    pub fn to_last(&mut self) {
        self.set_current_page(self.last_page);
    }

    /// Selects `page` and queues a [`PageChangeMsg`].
    ///
    /// Selecting the page that is already current does nothing, so every
    /// distinct page produces exactly one event. Inactive paginators ignore
    /// navigation.
    ///
    /// The window itself is not recomputed here; it follows once the
    /// registry is updated with the new page.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagewindow::paginator::Model;
    /// use bubbletea_pagewindow::registry::{InstanceRegistry, PaginationState, Registry};
    ///
    /// let registry = Registry::new();
    /// registry.register("results", PaginationState::new(1, 10, 100));
    /// let mut paginator = Model::new("results", registry.clone());
    ///
    /// // Ignored until activated.
    /// paginator.set_current_page(4);
    /// assert_eq!(paginator.current_page(), 0);
    ///
    /// let _listener = paginator.activate().expect("instance is registered");
    /// paginator.set_current_page(4);
    /// assert_eq!(paginator.current_page(), 4);
    /// // The registry is untouched until the application applies the event.
    /// assert_eq!(registry.get_instance("results").map(|s| s.current_page), Some(1));
    /// ```
    pub fn set_current_page(&mut self, page: usize) {
        if page == self.current_page {
            return;
        }
        let Some(subscription) = &self.subscription else {
            debug!(instance = %self.instance, page, "ignoring page change on inactive paginator");
            return;
        };

        self.current_page = page;
        trace!(instance = %self.instance, page, "page changed");
        if subscription.mailbox.send(Deferred::PageChange(page)).is_err() {
            warn!(instance = %self.instance, page, "paginator mailbox closed, page change dropped");
        }
    }

    /// Renders the window as plain text, e.g. `« ‹ 1 [2] 3 … 10 › »`.
    ///
    /// The active page is bracketed. Boundary and direction links wrap the
    /// page markers when enabled.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_pagewindow::paginator::Model;
    /// use bubbletea_pagewindow::registry::{PaginationState, Registry};
    ///
    /// let registry = Registry::new();
    /// registry.register("results", PaginationState::new(2, 10, 100));
    /// let mut paginator = Model::new("results", registry)
    ///     .with_max_visible(3)
    ///     .with_force_ellipses(true)
    ///     .with_direction_links(true);
    /// let _listener = paginator.activate().expect("instance is registered");
    ///
    /// assert_eq!(paginator.view(), "‹ 1 [2] 3 … ›");
    /// ```
    pub fn view(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(self.pages.len() + 4);
        if self.options.boundary_links {
            parts.push("«".to_string());
        }
        if self.options.direction_links {
            parts.push("‹".to_string());
        }
        parts.extend(self.pages.iter().map(|page| {
            if page.is_active() {
                format!("[{}]", page.label())
            } else {
                page.label().to_string()
            }
        }));
        if self.options.direction_links {
            parts.push("›".to_string());
        }
        if self.options.boundary_links {
            parts.push("»".to_string());
        }
        parts.join(" ")
    }

    /// Re-reads the bound instance and refreshes the window, deferring any
    /// out-of-range correction to the mailbox.
    fn update_pages(&mut self) {
        let Some(state) = self.registry.get_instance(&self.instance) else {
            warn!(instance = %self.instance, "pagination instance disappeared, keeping previous window");
            return;
        };

        self.last_page = state.total_pages();
        let corrected = correct(&state);

        if corrected != state.current_page {
            debug!(
                instance = %self.instance,
                page = state.current_page,
                corrected,
                "current page out of range, deferring correction"
            );
            self.defer(Deferred::Correction(corrected));
            return;
        }

        self.current_page = state.current_page;
        self.pages = compute_window(
            state.current_page,
            state.items_per_page,
            state.total_items,
            &self.options,
        );
    }

    /// Applies a deferred correction and recomputes the window from the
    /// registry as it is now.
    fn apply_correction(&mut self, page: usize) {
        self.set_current_page(page);

        let Some(state) = self.registry.get_instance(&self.instance) else {
            warn!(instance = %self.instance, "pagination instance disappeared before correction");
            return;
        };
        self.last_page = state.total_pages();
        self.pages = compute_window(
            correct(&state),
            state.items_per_page,
            state.total_items,
            &self.options,
        );
    }

    fn defer(&self, work: Deferred) {
        match &self.subscription {
            Some(subscription) => {
                if subscription.mailbox.send(work).is_err() {
                    warn!(instance = %self.instance, ?work, "paginator mailbox closed, work dropped");
                }
            }
            None => trace!(instance = %self.instance, ?work, "inactive paginator, work dropped"),
        }
    }

    fn owns(&self, tag: u64) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| subscription.tag == tag)
    }

    /// A fresh listener for the active subscription.
    pub(crate) fn listen(&self) -> Option<Cmd> {
        self.subscription
            .as_ref()
            .map(|subscription| self.listener(subscription))
    }

    /// Waits for the next deferred item or registry change.
    ///
    /// Cancellation wins over queued work, and queued work wins over
    /// registry changes.
    fn listener(&self, subscription: &Subscription) -> Cmd {
        let id = self.id;
        let tag = subscription.tag;
        let instance = self.instance.clone();
        let inbox = Arc::clone(&subscription.inbox);
        let mut cancelled = subscription.cancel.subscribe();

        Box::pin(async move {
            let mut inbox = inbox.lock().await;
            let Inbox { changes, deferred } = &mut *inbox;

            tokio::select! {
                biased;

                _ = cancelled.changed() => None,
                Some(work) = deferred.recv() => Some(match work {
                    Deferred::Correction(page) => Msg::from(CorrectionMsg { id, page, tag }),
                    Deferred::PageChange(page) => Msg::from(PageChangeMsg { id, instance, page, tag }),
                }),
                received = changes.recv() => match received {
                    Ok(changed) => Some(Msg::from(InstanceChangedMsg { instance: changed, tag })),
                    Err(RecvError::Lagged(skipped)) => {
                        // Missed notifications may have been ours; refresh to be safe.
                        warn!(instance = %instance, skipped, "change stream lagged");
                        Some(Msg::from(InstanceChangedMsg { instance, tag }))
                    }
                    Err(RecvError::Closed) => None,
                },
            }
        })
    }
}

impl<R: InstanceRegistry> Component for Model<R> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
