#![warn(missing_docs)]

//! # bubbletea-pagewindow
//!
//! A page-window pagination component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications.
//!
//! ## Overview
//!
//! Given a current page, a page size, a total item count and a few display
//! constraints, the [`window`] module computes the exact sequence of page
//! buttons to show: numbers, ellipses and the active page. The [`paginator`]
//! component binds that calculation to a shared [`registry`] so several
//! views over one dataset stay in sync, and keeps the current page valid as
//! the item count changes underneath it.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`window`] | Pure page-window calculation (rotate and block modes, ellipses, boundary numbers) |
//! | [`registry`] | Shared pagination state keyed by instance id, with change notifications |
//! | [`paginator`] | The bubbletea component: view state, correction, navigation, events |
//! | [`key`] | Key bindings used for navigation |
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_pagewindow::prelude::*;
//!
//! let registry = Registry::new();
//! registry.register("results", PaginationState::new(1, 20, 500));
//!
//! let mut paginator = Paginator::new("results", registry.clone())
//!     .with_max_visible(5)
//!     .with_rotate(false);
//! let _listener = paginator.activate().expect("instance is registered");
//!
//! assert_eq!(paginator.last_page(), 25);
//! assert_eq!(paginator.view(), "[1] 2 3 4 5 …");
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]. Install any subscriber in your
//! application to see activation, correction and lifecycle events.

pub mod error;
pub mod key;
pub mod paginator;
pub mod registry;
pub mod window;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused paginator reacts to its navigation keys; a blurred one ignores
/// them. This matters when several paginators share one instance and only
/// one of them should own the keyboard.
///
/// ```rust
/// use bubbletea_pagewindow::prelude::*;
///
/// let mut paginator = Paginator::new("results", Registry::new());
/// assert!(!paginator.focused());
///
/// paginator.focus();
/// assert!(paginator.focused());
///
/// paginator.blur();
/// assert!(!paginator.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command for focus-related initialization.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use error::{PaginationError, Result};
pub use key::{new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use paginator::{
    correct, CorrectionMsg, InstanceChangedMsg, Model as Paginator, PageChangeMsg,
    PaginatorKeyMap, FIRST_PAGE,
};
pub use registry::{InstanceRegistry, PaginationState, Registry};
pub use window::{compute_window, total_pages, DisplayOptions, Label, PageMarker, ELLIPSIS};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_pagewindow::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::PaginationError;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::paginator::{
        correct, Model as Paginator, PageChangeMsg, PaginatorKeyMap, FIRST_PAGE,
    };
    pub use crate::registry::{InstanceRegistry, PaginationState, Registry};
    pub use crate::window::{compute_window, total_pages, DisplayOptions, Label, PageMarker};
    pub use crate::Component;
}
