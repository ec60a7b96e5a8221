use chat_launcher_core::SidebarMessage;
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::channel::reply_on_port;
use super::{LOAD_HANDLER, MESSAGE_HANDLER, PAGE_LOADED, STORAGE_HANDLER, with_launcher};

pub(super) fn install_window_listeners() {
    let Some(window) = web_sys::window() else {
        warn!("window is unavailable; chat launcher listeners not installed");
        return;
    };

    MESSAGE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::MessageEvent)>::wrap(Box::new(
            move |event: web_sys::MessageEvent| {
                handle_message_event(&event);
            },
        ));
        if let Err(error) = window
            .add_event_listener_with_callback("message", callback.as_ref().unchecked_ref())
        {
            warn!(error = ?error, "failed to install message listener");
        }
        *slot.borrow_mut() = Some(callback);
    });

    STORAGE_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::StorageEvent)>::wrap(Box::new(
            move |event: web_sys::StorageEvent| {
                handle_storage_event(&event);
            },
        ));
        if let Err(error) = window
            .add_event_listener_with_callback("storage", callback.as_ref().unchecked_ref())
        {
            warn!(error = ?error, "failed to install storage listener");
        }
        *slot.borrow_mut() = Some(callback);
    });

    LOAD_HANDLER.with(|slot| {
        if slot.borrow().is_some() {
            return;
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            handle_page_load();
        }));
        if let Err(error) =
            window.add_event_listener_with_callback("load", callback.as_ref().unchecked_ref())
        {
            warn!(error = ?error, "failed to install load listener");
        }
        *slot.borrow_mut() = Some(callback);
    });

    // Scripts injected after `load` already fired would otherwise never
    // initialize.
    if document_ready_state().as_deref() == Some("complete") {
        handle_page_load();
    }
}

fn handle_message_event(event: &web_sys::MessageEvent) {
    let _span = tracing::debug_span!("message").entered();
    let data = event.data();
    let kind = js_sys::Reflect::get(&data, &JsValue::from_str("type"))
        .ok()
        .and_then(|value| value.as_string());
    let message = SidebarMessage::from_type(kind.as_deref());

    let Some(ack) = with_launcher(|launcher| launcher.handle_external_message(&message)) else {
        return;
    };
    debug!(status = %ack.status, "message handled");
    if let Err(error) = reply_on_port(event, &ack) {
        warn!(%error, "failed to reply to message sender");
    }
}

fn handle_storage_event(event: &web_sys::StorageEvent) {
    let _span = tracing::debug_span!("storage").entered();
    let key = event.key();
    let new_value = event.new_value();
    with_launcher(|launcher| launcher.handle_storage_change(key.as_deref(), new_value.as_deref()));
}

fn handle_page_load() {
    if PAGE_LOADED.with(|loaded| loaded.replace(true)) {
        return;
    }
    let _span = tracing::debug_span!("load").entered();
    with_launcher(|launcher| launcher.on_page_load());
}

fn document_ready_state() -> Option<String> {
    let document = web_sys::window()?.document()?;
    js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}
