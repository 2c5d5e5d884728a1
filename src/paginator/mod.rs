//! A paginator component bound to a shared pagination registry.
//!
//! The paginator does not own its numbers. It binds by id to a
//! [`PaginationState`](crate::registry::PaginationState) in a registry,
//! recomputes its page window whenever the registry reports a change for
//! that id, and keeps the current page within range as the item count
//! changes. Navigation is reported through [`PageChangeMsg`]; the application
//! writes the new page back to the registry, which in turn refreshes every
//! paginator bound to the instance.
//!
//! # Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_pagewindow::paginator::{Model as Paginator, PageChangeMsg};
//! use bubbletea_pagewindow::registry::{PaginationState, Registry};
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     registry: Registry,
//!     paginator: Paginator,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let registry = Registry::new();
//!         registry.register("results", PaginationState::new(1, 10, 240));
//!
//!         let mut paginator = Paginator::new("results", registry.clone())
//!             .with_max_visible(7)
//!             .with_boundary_link_numbers(true);
//!         let listener = paginator.activate().ok();
//!
//!         (Self { registry, paginator }, listener)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(change) = msg.downcast_ref::<PageChangeMsg>() {
//!             let _ = self.registry.set_current_page(&change.instance, change.page);
//!         }
//!         self.paginator.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.paginator.view()
//!     }
//! }
//! ```

pub mod keymap;
pub mod model;
pub mod types;


pub use keymap::PaginatorKeyMap;
pub use model::{correct, Model, FIRST_PAGE};
pub use types::{CorrectionMsg, InstanceChangedMsg, PageChangeMsg};
