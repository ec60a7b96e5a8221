use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::host::{
    IconSurface, MessageChannel, ScaleTarget, ScheduledTask, Scheduler, SidebarStateStore,
};
use crate::icon::{ENTRANCE_END_SCALE, ENTRANCE_START_SCALE};
use crate::message::{Acknowledgement, OutboundMessage, SidebarMessage};
use crate::storage::{SidebarTransition, parse_sidebar_flag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyPresent,
    /// The icon could not be built or attached; no handle was kept.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The handle no longer pointed at an attached element.
    NotAttached,
    DetachFailed,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LauncherSnapshot {
    pub sidebar_open: bool,
    pub icon_present: bool,
}

struct LiveIcon<I, T> {
    element: I,
    entrance: Option<T>,
}

/// Owns the sidebar flag and the single launcher icon for one page session.
pub struct LauncherController<S, C, T, K>
where
    S: IconSurface,
    C: MessageChannel,
    T: SidebarStateStore,
    K: Scheduler,
{
    config: LauncherConfig,
    surface: S,
    channel: C,
    store: T,
    scheduler: K,
    sidebar_open: bool,
    icon: Option<LiveIcon<S::Icon, K::Task>>,
}

impl<S, C, T, K> LauncherController<S, C, T, K>
where
    S: IconSurface,
    C: MessageChannel,
    T: SidebarStateStore,
    K: Scheduler,
{
    pub fn new(config: LauncherConfig, surface: S, channel: C, store: T, scheduler: K) -> Self {
        Self {
            config,
            surface,
            channel,
            store,
            scheduler,
            sidebar_open: false,
            icon: None,
        }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn icon_present(&self) -> bool {
        self.icon.is_some()
    }

    pub fn snapshot(&self) -> LauncherSnapshot {
        LauncherSnapshot {
            sidebar_open: self.sidebar_open,
            icon_present: self.icon_present(),
        }
    }

    /// Builds, attaches and animates the icon unless one already exists.
    pub fn create_icon(&mut self) -> CreateOutcome {
        if self.icon.is_some() {
            debug!("chat icon already exists");
            return CreateOutcome::AlreadyPresent;
        }

        match self.mount_icon() {
            Ok(live) => {
                self.icon = Some(live);
                info!(icon_id = %self.config.icon_id, "chat icon added to document body");
                CreateOutcome::Created
            }
            Err(error) if error.is_dom_unavailable() => {
                warn!(%error, "document not ready; chat icon not created");
                CreateOutcome::Aborted
            }
            Err(error) => {
                warn!(%error, "failed to create chat icon");
                CreateOutcome::Aborted
            }
        }
    }

    fn mount_icon(&mut self) -> Result<LiveIcon<S::Icon, K::Task>, LauncherError> {
        let mut element = self.surface.build_icon(&self.config)?;
        self.surface.attach(&element)?;

        if let Err(error) = self.surface.wire_click(&mut element) {
            // Attached but unusable: take it back out before giving up.
            if let Err(detach_error) = self.surface.detach(&element) {
                warn!(error = %detach_error, "failed to detach unwired chat icon");
            }
            return Err(error);
        }

        let target = self.surface.scale_target(&element);
        let entrance = match target.set_scale(ENTRANCE_START_SCALE) {
            Ok(()) => {
                let delay = self.config.entrance_delay();
                Some(self.scheduler.schedule(
                    delay,
                    Box::new(move || {
                        if let Err(error) = target.set_scale(ENTRANCE_END_SCALE) {
                            warn!(%error, "failed to finish chat icon entrance");
                        }
                    }),
                ))
            }
            Err(error) => {
                warn!(%error, "skipping chat icon entrance animation");
                None
            }
        };

        Ok(LiveIcon { element, entrance })
    }

    /// Detaches the icon if it is still in the document. The handle is cleared
    /// on every path.
    pub fn remove_icon(&mut self) -> RemoveOutcome {
        let Some(live) = self.icon.take() else {
            return RemoveOutcome::Absent;
        };
        if let Some(entrance) = live.entrance {
            entrance.cancel();
        }

        if !self.surface.is_attached(&live.element) {
            debug!("chat icon is not in document body");
            return RemoveOutcome::NotAttached;
        }

        match self.surface.detach(&live.element) {
            Ok(()) => {
                info!("chat icon removed");
                RemoveOutcome::Removed
            }
            Err(error) => {
                warn!(%error, "error during chat icon removal");
                RemoveOutcome::DetachFailed
            }
        }
    }

    /// Click handler for the icon: asks the sidebar to flip its visibility.
    /// Returns whether the request was dispatched.
    pub fn on_icon_click(&self) -> bool {
        match self.channel.broadcast(OutboundMessage::ToggleSidebar) {
            Ok(()) => {
                info!("toggle sidebar event sent");
                true
            }
            Err(error) => {
                warn!(%error, "error sending toggle message");
                false
            }
        }
    }

    pub fn handle_external_message(&mut self, message: &SidebarMessage) -> Acknowledgement {
        debug!(kind = message.kind(), "received message");
        match message {
            SidebarMessage::Ready | SidebarMessage::Open => {
                debug!("sidebar is ready or open");
                self.apply_transition(SidebarTransition::Opened);
                Acknowledgement::opened()
            }
            SidebarMessage::Closed => {
                debug!("sidebar is closed");
                self.apply_transition(SidebarTransition::Closed);
                Acknowledgement::closed()
            }
            SidebarMessage::Unknown(_) => Acknowledgement::unknown(),
        }
    }

    /// Reacts to a storage notification. Returns the applied transition, or
    /// `None` when the key is not the sidebar key.
    pub fn handle_storage_change(
        &mut self,
        key: Option<&str>,
        new_value: Option<&str>,
    ) -> Option<SidebarTransition> {
        if key != Some(self.config.storage_key.as_str()) {
            return None;
        }
        debug!(key = ?key, value = ?new_value, "detected change in sidebar open state");
        let transition = SidebarTransition::from_flag(parse_sidebar_flag(new_value));
        self.apply_transition(transition);
        Some(transition)
    }

    /// One-time initialization from the persisted flag. An unreadable flag
    /// counts as closed.
    pub fn on_page_load(&mut self) -> SidebarTransition {
        debug!("page has fully loaded; checking sidebar status");
        let sidebar_open = match self.store.read(&self.config.storage_key) {
            Ok(value) => parse_sidebar_flag(value.as_deref()),
            Err(error) => {
                warn!(%error, "error reading sidebar state; treating sidebar as closed");
                false
            }
        };
        let transition = SidebarTransition::from_flag(sidebar_open);
        self.apply_transition(transition);
        transition
    }

    fn apply_transition(&mut self, transition: SidebarTransition) {
        self.sidebar_open = transition.sidebar_open();
        match transition {
            SidebarTransition::Opened => {
                self.remove_icon();
            }
            SidebarTransition::Closed => {
                if self.icon.is_none() {
                    self.create_icon();
                }
            }
        }
    }
}
