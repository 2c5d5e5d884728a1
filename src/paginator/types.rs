//! Messages produced by the paginator.
//!
//! All of them travel through the bubbletea runtime. Forward every message to
//! [`Model::update`](super::Model::update) so the paginator can keep its
//! notification listener running.

use bubbletea_rs::Msg;

/// Sent exactly once for every accepted change of the current page, whether
/// it came from navigation or from an automatic out-of-range correction.
///
/// Applications usually react by writing `page` back to the registry:
///
/// ```rust
/// use bubbletea_pagewindow::paginator::PageChangeMsg;
/// use bubbletea_pagewindow::registry::Registry;
/// use bubbletea_rs::Msg;
///
/// fn on_message(registry: &Registry, msg: &Msg) {
///     if let Some(change) = msg.downcast_ref::<PageChangeMsg>() {
///         let _ = registry.set_current_page(&change.instance, change.page);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageChangeMsg {
    /// Id of the paginator that emitted the event.
    pub id: i64,
    /// Registry instance the paginator is bound to.
    pub instance: String,
    /// The newly selected page.
    pub page: usize,
    pub(crate) tag: u64,
}

/// A registry change notification picked up by a paginator's listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceChangedMsg {
    /// The instance id that changed.
    pub instance: String,
    pub(crate) tag: u64,
}

/// A deferred out-of-range correction, delivered after the notification that
/// triggered it has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionMsg {
    /// Id of the paginator the correction belongs to.
    pub id: i64,
    pub(crate) page: usize,
    pub(crate) tag: u64,
}

/// Work queued in a paginator's mailbox for the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    Correction(usize),
    PageChange(usize),
}

impl From<PageChangeMsg> for Msg {
    fn from(msg: PageChangeMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<InstanceChangedMsg> for Msg {
    fn from(msg: InstanceChangedMsg) -> Self {
        Box::new(msg) as Msg
    }
}

impl From<CorrectionMsg> for Msg {
    fn from(msg: CorrectionMsg) -> Self {
        Box::new(msg) as Msg
    }
}
