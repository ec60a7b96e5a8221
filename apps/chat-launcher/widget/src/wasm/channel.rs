use chat_launcher_core::message::BROADCAST_TARGET_ORIGIN;
use chat_launcher_core::{Acknowledgement, LauncherError, MessageChannel, OutboundMessage};
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::describe_js_error;

/// `window.postMessage` broadcast to any origin.
pub(super) struct WindowChannel;

impl MessageChannel for WindowChannel {
    fn broadcast(&self, message: OutboundMessage) -> Result<(), LauncherError> {
        let window = web_sys::window().ok_or(LauncherError::WindowUnavailable)?;
        let payload = to_js_value(&message)?;
        window
            .post_message(&payload, BROADCAST_TARGET_ORIGIN)
            .map_err(|error| LauncherError::Dispatch(describe_js_error(&error)))
    }
}

/// Posts the acknowledgement back on the first transferred port, if the sender
/// supplied one. Returns whether a reply went out.
pub(super) fn reply_on_port(
    event: &web_sys::MessageEvent,
    ack: &Acknowledgement,
) -> Result<bool, LauncherError> {
    let Ok(port) = event.ports().get(0).dyn_into::<web_sys::MessagePort>() else {
        return Ok(false);
    };
    let payload = to_js_value(ack)?;
    port.post_message(&payload)
        .map_err(|error| LauncherError::Dispatch(describe_js_error(&error)))?;
    Ok(true)
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, LauncherError> {
    let encoded =
        serde_json::to_string(value).map_err(|error| LauncherError::Dispatch(error.to_string()))?;
    js_sys::JSON::parse(&encoded)
        .map_err(|error| LauncherError::Dispatch(describe_js_error(&error)))
}
