//! Browser front end: audio, page routing and the canvas menu.
//!
//! Compiled only for `wasm32` with the `web` feature. [`start`] runs when the
//! module loads, reads options embedded in the page and mounts the router on
//! the `#app` element.

mod audio;
mod menu;
mod pages;
mod router;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use audio::{AudioBank, WebHost};
pub use router::{Router, RouterHandle};

use crate::{error::CarouselError, options::Options};

/// Id of the `<script type="application/json">` tag holding options.
const OPTIONS_SCRIPT_ID: &str = "ringmenu-options";
/// Id of the element the router renders into.
const MOUNT_ID: &str = "app";

thread_local! {
    static ROUTER: RefCell<Option<Router>> = const { RefCell::new(None) };
}

/// Module entry point.
///
/// # Errors
///
/// A JS error if the document is unavailable or the first page cannot be
/// built.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let options = embedded_options();
    let Some(root) = document()?.get_element_by_id(MOUNT_ID) else {
        log::error!("no #{MOUNT_ID} element to mount the menu on");
        return Ok(());
    };

    let router = Router::mount(root, options)?;
    ROUTER.with(|slot| *slot.borrow_mut() = Some(router));
    Ok(())
}

/// Options from the page's embedded JSON, or the defaults.
fn embedded_options() -> Options {
    let text = document()
        .ok()
        .and_then(|doc| doc.get_element_by_id(OPTIONS_SCRIPT_ID))
        .and_then(|el| el.text_content());
    match text {
        None => Options::default(),
        Some(json) => Options::from_json(&json).unwrap_or_else(|e| {
            log::warn!("ignoring embedded options: {e}");
            Options::default()
        }),
    }
}

pub(crate) fn window() -> Result<web_sys::Window, CarouselError> {
    web_sys::window().ok_or_else(|| CarouselError::Web("no window".into()))
}

pub(crate) fn document() -> Result<web_sys::Document, CarouselError> {
    window()?
        .document()
        .ok_or_else(|| CarouselError::Web("no document".into()))
}

/// Convert a rejected DOM call into a crate error.
pub(crate) fn dom_error(context: &str, value: &JsValue) -> CarouselError {
    CarouselError::Web(format!("{context}: {value:?}"))
}

impl From<CarouselError> for JsValue {
    fn from(e: CarouselError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
