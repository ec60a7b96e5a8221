//! Floating chat launcher icon whose visibility follows an external sidebar.
//!
//! The launcher shows a single icon while the sidebar is closed and removes it
//! while the sidebar is open. Sidebar state arrives from three places: window
//! messages, storage-change notifications, and the persisted value read once at
//! page load. Clicking the icon broadcasts a toggle request back to the page.
//!
//! Everything host specific (the DOM, the message channel, storage, timers) sits
//! behind the traits in [`host`], so [`LauncherController`] runs unchanged in a
//! browser and against the fakes in `testing`.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod icon;
pub mod message;
pub mod storage;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{ConfigError, LauncherConfig};
pub use controller::{CreateOutcome, LauncherController, LauncherSnapshot, RemoveOutcome};
pub use error::LauncherError;
pub use host::{
    IconSurface, MessageChannel, ScaleTarget, ScheduledTask, Scheduler, SidebarStateStore,
};
pub use icon::IconStyle;
pub use message::{Acknowledgement, OutboundMessage, SidebarMessage};
pub use storage::{SidebarTransition, parse_sidebar_flag};
