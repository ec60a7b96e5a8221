use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MESSAGE_TYPE_SIDEBAR_READY: &str = "sidebarReady";
pub const MESSAGE_TYPE_SIDEBAR_OPEN: &str = "sidebarOpen";
pub const MESSAGE_TYPE_SIDEBAR_CLOSED: &str = "sidebarClosed";
pub const MESSAGE_TYPE_TOGGLE_SIDEBAR: &str = "toggleSidebar";

/// Target origin for every outbound broadcast.
pub const BROADCAST_TARGET_ORIGIN: &str = "*";

pub const STATUS_OPEN: &str = "State Updated to Open";
pub const STATUS_CLOSED: &str = "State Updated to Closed";
pub const STATUS_UNKNOWN: &str = "Unknown message type";

/// Inbound sidebar notification, keyed on the message `type` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarMessage {
    Ready,
    Open,
    Closed,
    /// Anything else, keeping the raw `type` when one was present.
    Unknown(Option<String>),
}

impl SidebarMessage {
    #[must_use]
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind {
            Some(MESSAGE_TYPE_SIDEBAR_READY) => Self::Ready,
            Some(MESSAGE_TYPE_SIDEBAR_OPEN) => Self::Open,
            Some(MESSAGE_TYPE_SIDEBAR_CLOSED) => Self::Closed,
            other => Self::Unknown(other.map(str::to_string)),
        }
    }

    /// Reads the `type` field of an arbitrary message payload. Payloads that are
    /// not objects, or whose `type` is not a string, are unknown.
    #[must_use]
    pub fn from_json(payload: &Value) -> Self {
        Self::from_type(payload.get("type").and_then(Value::as_str))
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Ready => MESSAGE_TYPE_SIDEBAR_READY,
            Self::Open => MESSAGE_TYPE_SIDEBAR_OPEN,
            Self::Closed => MESSAGE_TYPE_SIDEBAR_CLOSED,
            Self::Unknown(Some(kind)) => kind,
            Self::Unknown(None) => "<none>",
        }
    }
}

/// Reply for every inbound message, posted back when the channel allows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub status: String,
}

impl Acknowledgement {
    #[must_use]
    pub fn opened() -> Self {
        Self {
            status: STATUS_OPEN.to_string(),
        }
    }

    #[must_use]
    pub fn closed() -> Self {
        Self {
            status: STATUS_CLOSED.to_string(),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self {
            status: STATUS_UNKNOWN.to_string(),
        }
    }
}

/// Messages the launcher broadcasts to the rest of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    ToggleSidebar,
}

impl OutboundMessage {
    #[must_use]
    pub fn kind(self) -> &'static str {
        match self {
            Self::ToggleSidebar => MESSAGE_TYPE_TOGGLE_SIDEBAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recognizes_sidebar_message_types() {
        assert_eq!(
            SidebarMessage::from_json(&json!({ "type": "sidebarReady" })),
            SidebarMessage::Ready
        );
        assert_eq!(
            SidebarMessage::from_json(&json!({ "type": "sidebarOpen", "extra": 1 })),
            SidebarMessage::Open
        );
        assert_eq!(
            SidebarMessage::from_json(&json!({ "type": "sidebarClosed" })),
            SidebarMessage::Closed
        );
    }

    #[test]
    fn unknown_payloads_keep_their_type_when_present() {
        assert_eq!(
            SidebarMessage::from_json(&json!({ "type": "foo" })),
            SidebarMessage::Unknown(Some("foo".to_string()))
        );
        assert_eq!(
            SidebarMessage::from_json(&json!({ "type": 7 })),
            SidebarMessage::Unknown(None)
        );
        assert_eq!(
            SidebarMessage::from_json(&json!("sidebarOpen")),
            SidebarMessage::Unknown(None)
        );
        assert_eq!(SidebarMessage::from_json(&Value::Null), SidebarMessage::Unknown(None));
    }

    #[test]
    fn message_types_are_case_sensitive() {
        assert_eq!(
            SidebarMessage::from_type(Some("SidebarOpen")),
            SidebarMessage::Unknown(Some("SidebarOpen".to_string()))
        );
    }

    #[test]
    fn toggle_sidebar_serializes_as_type_tagged_object() {
        let encoded =
            serde_json::to_value(OutboundMessage::ToggleSidebar).expect("serialize outbound");
        assert_eq!(encoded, json!({ "type": "toggleSidebar" }));
        assert_eq!(OutboundMessage::ToggleSidebar.kind(), "toggleSidebar");
    }

    #[test]
    fn acknowledgement_serializes_status_field() {
        let encoded = serde_json::to_value(Acknowledgement::unknown()).expect("serialize ack");
        assert_eq!(encoded, json!({ "status": "Unknown message type" }));
    }
}
