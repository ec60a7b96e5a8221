use chat_launcher_core::icon::{ICON_GLYPH_SVG, scale_transform};
use chat_launcher_core::{IconSurface, LauncherConfig, LauncherError, ScaleTarget};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use super::{describe_js_error, handle_icon_click};

/// The page document. Window and document are looked up on every call so a
/// late `document.body` is picked up once it exists.
pub(super) struct DomSurface;

pub(super) struct DomIcon {
    element: HtmlElement,
    click_handler: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Drop for DomIcon {
    fn drop(&mut self) {
        // A detach that failed leaves the element clickable; unhook the closure
        // before it is freed.
        if let Some(handler) = self.click_handler.take() {
            if let Err(error) = self
                .element
                .remove_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
            {
                debug!(error = %describe_js_error(&error), "failed to unhook chat icon click");
            }
        }
    }
}

pub(super) struct DomScale(HtmlElement);

impl ScaleTarget for DomScale {
    fn set_scale(&self, scale: f32) -> Result<(), LauncherError> {
        self.0
            .style()
            .set_property("transform", &scale_transform(scale))
            .map_err(|error| LauncherError::Style(describe_js_error(&error)))
    }
}

fn document() -> Result<Document, LauncherError> {
    let window = web_sys::window().ok_or(LauncherError::WindowUnavailable)?;
    window.document().ok_or(LauncherError::DocumentUnavailable)
}

impl IconSurface for DomSurface {
    type Icon = DomIcon;
    type Scale = DomScale;

    fn build_icon(&mut self, config: &LauncherConfig) -> Result<DomIcon, LauncherError> {
        let document = document()?;
        let element = document
            .create_element("div")
            .map_err(|error| LauncherError::ElementCreation(describe_js_error(&error)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| LauncherError::ElementCreation("icon is not HtmlElement".to_string()))?;
        element.set_id(&config.icon_id);
        let style = element.style();
        for (name, value) in config.icon.css_properties() {
            style
                .set_property(name, &value)
                .map_err(|error| LauncherError::Style(describe_js_error(&error)))?;
        }
        element.set_inner_html(ICON_GLYPH_SVG);
        Ok(DomIcon {
            element,
            click_handler: None,
        })
    }

    fn attach(&mut self, icon: &DomIcon) -> Result<(), LauncherError> {
        let body = document()?.body().ok_or(LauncherError::BodyUnavailable)?;
        body.append_child(&icon.element)
            .map(|_| ())
            .map_err(|error| LauncherError::ElementCreation(describe_js_error(&error)))
    }

    fn wire_click(&mut self, icon: &mut DomIcon) -> Result<(), LauncherError> {
        if icon.click_handler.is_some() {
            return Ok(());
        }
        let callback = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_event| {
            handle_icon_click();
        }));
        icon.element
            .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())
            .map_err(|error| LauncherError::ClickHandler(describe_js_error(&error)))?;
        icon.click_handler = Some(callback);
        Ok(())
    }

    fn is_attached(&self, icon: &DomIcon) -> bool {
        let Ok(document) = document() else {
            return false;
        };
        let Some(body) = document.body() else {
            return false;
        };
        icon.element.is_connected() && body.contains(Some(icon.element.as_ref()))
    }

    fn detach(&mut self, icon: &DomIcon) -> Result<(), LauncherError> {
        icon.element.remove();
        Ok(())
    }

    fn scale_target(&self, icon: &DomIcon) -> DomScale {
        DomScale(icon.element.clone())
    }
}
