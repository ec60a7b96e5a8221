#[cfg(any(target_arch = "wasm32", test))]
mod console_level;
#[cfg(any(target_arch = "wasm32", test))]
mod page_config;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::{Cell, RefCell};

    use chat_launcher_core::LauncherController;
    use tracing::{info, warn};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    mod channel;
    mod dom;
    mod lifecycle;
    mod logging;
    mod storage;
    mod timers;

    use channel::WindowChannel;
    use dom::DomSurface;
    use lifecycle::install_window_listeners;
    use logging::install_tracing;
    use storage::LocalSidebarStore;
    use timers::TimeoutScheduler;

    use crate::page_config::resolve_page_config;

    type BrowserLauncher =
        LauncherController<DomSurface, WindowChannel, LocalSidebarStore, TimeoutScheduler>;

    thread_local! {
        static LAUNCHER: RefCell<Option<BrowserLauncher>> = const { RefCell::new(None) };
        static PAGE_LOADED: Cell<bool> = const { Cell::new(false) };
        static MESSAGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::MessageEvent)>>> = const { RefCell::new(None) };
        static STORAGE_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::StorageEvent)>>> = const { RefCell::new(None) };
        static LOAD_HANDLER: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        mount();
    }

    /// Builds the launcher for this page and starts listening. Calling it again
    /// is a no-op.
    #[wasm_bindgen]
    pub fn mount() {
        if LAUNCHER.with(|slot| slot.borrow().is_some()) {
            return;
        }

        let (config, config_error) = resolve_page_config(read_page_config_global());
        install_tracing(&config.log_filter);
        if let Some(error) = config_error {
            warn!(%error, "ignoring launcher config override");
        }
        info!(storage_key = %config.storage_key, "mounting chat launcher");

        LAUNCHER.with(|slot| {
            *slot.borrow_mut() = Some(LauncherController::new(
                config,
                DomSurface,
                WindowChannel,
                LocalSidebarStore,
                TimeoutScheduler,
            ));
        });
        install_window_listeners();
    }

    #[wasm_bindgen]
    pub fn launcher_state_json() -> String {
        LAUNCHER.with(|slot| {
            let Ok(slot) = slot.try_borrow() else {
                return "{\"detail\":\"launcher busy\"}".to_string();
            };
            match slot.as_ref() {
                Some(launcher) => serde_json::to_string(&launcher.snapshot())
                    .unwrap_or_else(|_| "{\"detail\":\"snapshot serialization failed\"}".to_string()),
                None => "{\"detail\":\"launcher not mounted\"}".to_string(),
            }
        })
    }

    /// Runs `f` against the mounted launcher. Re-entrant calls are dropped with
    /// a warning rather than panicking on the `RefCell`.
    fn with_launcher<R>(f: impl FnOnce(&mut BrowserLauncher) -> R) -> Option<R> {
        LAUNCHER.with(|slot| {
            let Ok(mut slot) = slot.try_borrow_mut() else {
                warn!("chat launcher is busy; dropping event");
                return None;
            };
            slot.as_mut().map(f)
        })
    }

    fn handle_icon_click() {
        let _span = tracing::debug_span!("click").entered();
        with_launcher(|launcher| launcher.on_icon_click());
    }

    fn read_page_config_global() -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(
            &window,
            &JsValue::from_str(chat_launcher_core::config::CONFIG_GLOBAL),
        )
        .ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        if let Some(raw) = value.as_string() {
            return Some(raw);
        }
        if value.is_object() {
            return js_sys::JSON::stringify(&value).ok()?.as_string();
        }
        Some(String::new())
    }

    fn describe_js_error(error: &JsValue) -> String {
        if let Some(message) = error.as_string() {
            return message;
        }
        if let Some(error) = error.dyn_ref::<js_sys::Error>() {
            return String::from(error.message());
        }
        format!("{error:?}")
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{launcher_state_json, mount};

#[cfg(not(target_arch = "wasm32"))]
pub fn launcher_state_json() -> String {
    "{\"detail\":\"chat launcher only runs on wasm\"}".to_string()
}
