//! In-memory collaborators for exercising [`crate::LauncherController`]
//! without a browser.
//!
//! Every fake is a cheap `Rc` handle, so a test keeps one clone for inspection
//! and hands the other to the controller.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::host::{
    IconSurface, MessageChannel, ScaleTarget, ScheduledTask, Scheduler, SidebarStateStore,
};
use crate::icon::{ICON_GLYPH_SVG, scale_transform};
use crate::message::OutboundMessage;

/// Snapshot of one element built by [`FakeDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeElement {
    pub key: u64,
    pub id: String,
    pub styles: BTreeMap<String, String>,
    pub inner_html: String,
    pub attached: bool,
    pub click_wired: bool,
}

impl FakeElement {
    #[must_use]
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct DocumentState {
    body_available: bool,
    fail_click_wiring: bool,
    fail_detach: bool,
    next_key: u64,
    elements: Vec<Rc<RefCell<FakeElement>>>,
    detach_calls: usize,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            body_available: true,
            fail_click_wiring: false,
            fail_detach: false,
            next_key: 1,
            elements: Vec::new(),
            detach_calls: 0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeDocument {
    state: Rc<RefCell<DocumentState>>,
}

#[derive(Debug)]
pub struct FakeIcon {
    element: Rc<RefCell<FakeElement>>,
}

#[derive(Debug)]
pub struct FakeScale {
    element: Rc<RefCell<FakeElement>>,
}

impl ScaleTarget for FakeScale {
    fn set_scale(&self, scale: f32) -> Result<(), LauncherError> {
        self.element
            .borrow_mut()
            .styles
            .insert("transform".to_string(), scale_transform(scale));
        Ok(())
    }
}

impl FakeDocument {
    pub fn set_body_available(&self, available: bool) {
        self.state.borrow_mut().body_available = available;
    }

    pub fn fail_click_wiring(&self, fail: bool) {
        self.state.borrow_mut().fail_click_wiring = fail;
    }

    pub fn fail_detach(&self, fail: bool) {
        self.state.borrow_mut().fail_detach = fail;
    }

    /// Pulls every element out of the body behind the launcher's back, the way
    /// another script replacing `document.body` would.
    pub fn detach_all_externally(&self) {
        for element in &self.state.borrow().elements {
            element.borrow_mut().attached = false;
        }
    }

    #[must_use]
    pub fn attached_icons(&self) -> Vec<FakeElement> {
        self.state
            .borrow()
            .elements
            .iter()
            .map(|element| element.borrow().clone())
            .filter(|element| element.attached)
            .collect()
    }

    #[must_use]
    pub fn attached_count(&self) -> usize {
        self.attached_icons().len()
    }

    #[must_use]
    pub fn built_count(&self) -> usize {
        self.state.borrow().elements.len()
    }

    #[must_use]
    pub fn detach_calls(&self) -> usize {
        self.state.borrow().detach_calls
    }
}

impl IconSurface for FakeDocument {
    type Icon = FakeIcon;
    type Scale = FakeScale;

    fn build_icon(&mut self, config: &LauncherConfig) -> Result<FakeIcon, LauncherError> {
        let mut state = self.state.borrow_mut();
        let key = state.next_key;
        state.next_key += 1;
        let styles = config
            .icon
            .css_properties()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let element = Rc::new(RefCell::new(FakeElement {
            key,
            id: config.icon_id.clone(),
            styles,
            inner_html: ICON_GLYPH_SVG.to_string(),
            attached: false,
            click_wired: false,
        }));
        state.elements.push(Rc::clone(&element));
        Ok(FakeIcon { element })
    }

    fn attach(&mut self, icon: &FakeIcon) -> Result<(), LauncherError> {
        if !self.state.borrow().body_available {
            return Err(LauncherError::BodyUnavailable);
        }
        icon.element.borrow_mut().attached = true;
        Ok(())
    }

    fn wire_click(&mut self, icon: &mut FakeIcon) -> Result<(), LauncherError> {
        if self.state.borrow().fail_click_wiring {
            return Err(LauncherError::ClickHandler("listener rejected".to_string()));
        }
        icon.element.borrow_mut().click_wired = true;
        Ok(())
    }

    fn is_attached(&self, icon: &FakeIcon) -> bool {
        icon.element.borrow().attached
    }

    fn detach(&mut self, icon: &FakeIcon) -> Result<(), LauncherError> {
        let mut state = self.state.borrow_mut();
        state.detach_calls += 1;
        if state.fail_detach {
            return Err(LauncherError::Detach("removal threw".to_string()));
        }
        icon.element.borrow_mut().attached = false;
        Ok(())
    }

    fn scale_target(&self, icon: &FakeIcon) -> FakeScale {
        FakeScale {
            element: Rc::clone(&icon.element),
        }
    }
}

#[derive(Debug, Default)]
struct ChannelState {
    sent: Vec<OutboundMessage>,
    fail_dispatch: bool,
}

/// Message channel that records broadcasts instead of posting them.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl RecordingChannel {
    pub fn fail_dispatch(&self, fail: bool) {
        self.state.borrow_mut().fail_dispatch = fail;
    }

    #[must_use]
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.state.borrow().sent.clone()
    }
}

impl MessageChannel for RecordingChannel {
    fn broadcast(&self, message: OutboundMessage) -> Result<(), LauncherError> {
        let mut state = self.state.borrow_mut();
        if state.fail_dispatch {
            return Err(LauncherError::Dispatch("postMessage threw".to_string()));
        }
        state.sent.push(message);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct StoreState {
    values: HashMap<String, String>,
    fail_reads: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Rc<RefCell<StoreState>>,
}

impl MemoryStore {
    pub fn set(&self, key: &str, value: &str) {
        self.state
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.state.borrow_mut().values.remove(key);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.borrow_mut().fail_reads = fail;
    }
}

impl SidebarStateStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, LauncherError> {
        let state = self.state.borrow();
        if state.fail_reads {
            return Err(LauncherError::StorageRead {
                key: key.to_string(),
                message: "access denied".to_string(),
            });
        }
        Ok(state.values.get(key).cloned())
    }
}

struct PendingTask {
    id: u64,
    delay: Duration,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler whose tasks only run when the test calls [`Self::run_pending`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<SchedulerState>>,
}

pub struct ManualTask {
    id: u64,
    state: Rc<RefCell<SchedulerState>>,
}

impl ScheduledTask for ManualTask {
    fn cancel(self) {
        self.state
            .borrow_mut()
            .pending
            .retain(|pending| pending.id != self.id);
    }
}

impl ManualScheduler {
    /// Runs every task scheduled so far, returning how many ran.
    pub fn run_pending(&self) -> usize {
        let pending = std::mem::take(&mut self.state.borrow_mut().pending);
        let count = pending.len();
        for pending in pending {
            (pending.task)();
        }
        count
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    #[must_use]
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.state
            .borrow()
            .pending
            .iter()
            .map(|pending| pending.delay)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    type Task = ManualTask;

    fn schedule(&mut self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualTask {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.pending.push(PendingTask { id, delay, task });
        ManualTask {
            id,
            state: Rc::clone(&self.state),
        }
    }
}
