use chat_launcher_core::testing::{FakeDocument, ManualScheduler, MemoryStore, RecordingChannel};
use chat_launcher_core::{
    Acknowledgement, LauncherConfig, LauncherController, OutboundMessage, SidebarMessage,
    SidebarTransition,
};
use quickcheck::{Arbitrary, Gen, QuickCheck};
use serde_json::json;

type Controller = LauncherController<FakeDocument, RecordingChannel, MemoryStore, ManualScheduler>;

fn controller_with(
    document: &FakeDocument,
    channel: &RecordingChannel,
    store: &MemoryStore,
    scheduler: &ManualScheduler,
) -> Controller {
    LauncherController::new(
        LauncherConfig::default(),
        document.clone(),
        channel.clone(),
        store.clone(),
        scheduler.clone(),
    )
}

#[test]
fn page_load_without_persisted_key_shows_one_icon() {
    let document = FakeDocument::default();
    let store = MemoryStore::default();
    let scheduler = ManualScheduler::default();
    let channel = RecordingChannel::default();
    let mut controller = controller_with(&document, &channel, &store, &scheduler);

    assert_eq!(controller.on_page_load(), SidebarTransition::Closed);
    assert!(!controller.sidebar_open());
    assert_eq!(document.attached_count(), 1);

    scheduler.run_pending();
    let icon = document.attached_icons().remove(0);
    assert_eq!(icon.style("transform"), Some("scale(1)"));
    assert!(icon.inner_html.starts_with("<svg"));
}

#[test]
fn sidebar_open_message_detaches_the_icon() {
    let document = FakeDocument::default();
    let mut controller = controller_with(
        &document,
        &RecordingChannel::default(),
        &MemoryStore::default(),
        &ManualScheduler::default(),
    );
    controller.on_page_load();
    assert_eq!(document.attached_count(), 1);

    let ack = controller
        .handle_external_message(&SidebarMessage::from_json(&json!({ "type": "sidebarOpen" })));

    assert_eq!(ack, Acknowledgement::opened());
    assert_eq!(document.attached_count(), 0);
    assert!(!controller.icon_present());
    assert!(controller.sidebar_open());
}

#[test]
fn storage_flip_to_false_recreates_the_icon() {
    let document = FakeDocument::default();
    let store = MemoryStore::default();
    store.set("isSidebarOpen", "true");
    let mut controller = controller_with(
        &document,
        &RecordingChannel::default(),
        &store,
        &ManualScheduler::default(),
    );
    controller.on_page_load();
    assert!(!controller.icon_present());

    store.set("isSidebarOpen", "false");
    let transition = controller.handle_storage_change(Some("isSidebarOpen"), Some("false"));

    assert_eq!(transition, Some(SidebarTransition::Closed));
    assert!(!controller.sidebar_open());
    assert_eq!(document.attached_count(), 1);
}

#[test]
fn click_broadcasts_toggle_to_channel_listeners() {
    let document = FakeDocument::default();
    let channel = RecordingChannel::default();
    let mut controller = controller_with(
        &document,
        &channel,
        &MemoryStore::default(),
        &ManualScheduler::default(),
    );
    controller.on_page_load();
    let before = controller.snapshot();

    assert!(controller.on_icon_click());

    assert_eq!(channel.sent(), vec![OutboundMessage::ToggleSidebar]);
    assert_eq!(
        serde_json::to_value(channel.sent()[0]).expect("serialize toggle"),
        json!({ "type": "toggleSidebar" })
    );
    assert_eq!(controller.snapshot(), before);
}

#[test]
fn closed_open_closed_ends_with_exactly_one_icon() {
    let document = FakeDocument::default();
    let mut controller = controller_with(
        &document,
        &RecordingChannel::default(),
        &MemoryStore::default(),
        &ManualScheduler::default(),
    );

    assert_eq!(
        controller.handle_external_message(&SidebarMessage::Closed),
        Acknowledgement::closed()
    );
    controller.handle_external_message(&SidebarMessage::Open);
    controller.handle_external_message(&SidebarMessage::Closed);

    assert!(!controller.sidebar_open());
    assert!(controller.icon_present());
    assert_eq!(document.attached_count(), 1);
    assert_eq!(document.built_count(), 2);
}

#[test]
fn message_and_storage_sources_are_last_write_wins() {
    let document = FakeDocument::default();
    let mut controller = controller_with(
        &document,
        &RecordingChannel::default(),
        &MemoryStore::default(),
        &ManualScheduler::default(),
    );

    controller.handle_external_message(&SidebarMessage::Open);
    controller.handle_storage_change(Some("isSidebarOpen"), Some("false"));
    assert!(!controller.sidebar_open());
    assert_eq!(document.attached_count(), 1);

    controller.handle_storage_change(Some("isSidebarOpen"), Some("true"));
    controller.handle_external_message(&SidebarMessage::Closed);
    assert!(!controller.sidebar_open());
    assert_eq!(document.attached_count(), 1);
}

#[test]
fn own_toggle_broadcast_echo_is_an_unknown_message() {
    let mut controller = controller_with(
        &FakeDocument::default(),
        &RecordingChannel::default(),
        &MemoryStore::default(),
        &ManualScheduler::default(),
    );
    controller.on_page_load();
    let before = controller.snapshot();

    let echo = serde_json::to_value(OutboundMessage::ToggleSidebar).expect("serialize toggle");
    let ack = controller.handle_external_message(&SidebarMessage::from_json(&echo));

    assert_eq!(ack, Acknowledgement::unknown());
    assert_eq!(controller.snapshot(), before);
}

#[derive(Debug, Clone)]
enum LauncherEvent {
    Message(&'static str),
    Storage(&'static str, Option<&'static str>),
    PageLoad(Option<&'static str>),
    Click,
    RunTimers,
    ExternalDetach,
}

const MESSAGE_TYPES: [&str; 5] = ["sidebarReady", "sidebarOpen", "sidebarClosed", "foo", ""];
const STORAGE_KEYS: [&str; 2] = ["isSidebarOpen", "theme"];
const STORAGE_VALUES: [Option<&str>; 4] = [Some("true"), Some("false"), Some("yes"), None];

impl Arbitrary for LauncherEvent {
    fn arbitrary(g: &mut Gen) -> Self {
        match u8::arbitrary(g) % 6 {
            0 => Self::Message(*g.choose(&MESSAGE_TYPES).unwrap_or(&"foo")),
            1 => Self::Storage(
                *g.choose(&STORAGE_KEYS).unwrap_or(&"isSidebarOpen"),
                *g.choose(&STORAGE_VALUES).unwrap_or(&None),
            ),
            2 => Self::PageLoad(*g.choose(&STORAGE_VALUES).unwrap_or(&None)),
            3 => Self::Click,
            4 => Self::RunTimers,
            _ => Self::ExternalDetach,
        }
    }
}

fn icon_present_iff_sidebar_closed(events: Vec<LauncherEvent>) -> bool {
    let document = FakeDocument::default();
    let store = MemoryStore::default();
    let scheduler = ManualScheduler::default();
    let channel = RecordingChannel::default();
    let mut controller = controller_with(&document, &channel, &store, &scheduler);
    controller.on_page_load();

    for event in events {
        match event {
            LauncherEvent::Message(kind) => {
                controller.handle_external_message(&SidebarMessage::from_type(Some(kind)));
            }
            LauncherEvent::Storage(key, value) => {
                controller.handle_storage_change(Some(key), value);
            }
            LauncherEvent::PageLoad(value) => {
                match value {
                    Some(value) => store.set("isSidebarOpen", value),
                    None => store.remove("isSidebarOpen"),
                }
                controller.on_page_load();
            }
            LauncherEvent::Click => {
                controller.on_icon_click();
            }
            LauncherEvent::RunTimers => {
                scheduler.run_pending();
            }
            LauncherEvent::ExternalDetach => {
                document.detach_all_externally();
            }
        }

        if controller.icon_present() == controller.sidebar_open() {
            return false;
        }
        if document.attached_count() > 1 {
            return false;
        }
    }
    true
}

#[test]
fn icon_exists_exactly_when_sidebar_is_closed() {
    QuickCheck::new()
        .tests(500)
        .quickcheck(icon_present_iff_sidebar_closed as fn(Vec<LauncherEvent>) -> bool);
}
