//! Seams between the launcher state machine and the page it runs in.

use std::time::Duration;

use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::message::OutboundMessage;

/// Something whose visual scale can be changed after the icon is built.
///
/// Scale targets are handed to deferred tasks, so they must own whatever they
/// point at.
pub trait ScaleTarget: 'static {
    fn set_scale(&self, scale: f32) -> Result<(), LauncherError>;
}

/// The document the launcher icon lives in.
pub trait IconSurface {
    type Icon;
    type Scale: ScaleTarget;

    /// Builds a styled icon element without attaching it.
    fn build_icon(&mut self, config: &LauncherConfig) -> Result<Self::Icon, LauncherError>;

    /// Appends the icon to the document body.
    fn attach(&mut self, icon: &Self::Icon) -> Result<(), LauncherError>;

    /// Routes clicks on the icon to the launcher's click handler.
    fn wire_click(&mut self, icon: &mut Self::Icon) -> Result<(), LauncherError>;

    /// Whether the icon is still a live element inside the document body.
    fn is_attached(&self, icon: &Self::Icon) -> bool;

    fn detach(&mut self, icon: &Self::Icon) -> Result<(), LauncherError>;

    fn scale_target(&self, icon: &Self::Icon) -> Self::Scale;
}

/// Page-wide message channel shared with the sidebar.
pub trait MessageChannel {
    fn broadcast(&self, message: OutboundMessage) -> Result<(), LauncherError>;
}

/// Read-only view of the persisted sidebar flag.
pub trait SidebarStateStore {
    fn read(&self, key: &str) -> Result<Option<String>, LauncherError>;
}

/// A pending deferred task.
pub trait ScheduledTask {
    /// Prevents the task from running if it has not run yet.
    fn cancel(self);
}

/// Runs one-shot tasks after a delay on the host's event loop.
pub trait Scheduler {
    type Task: ScheduledTask;

    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Task;
}
