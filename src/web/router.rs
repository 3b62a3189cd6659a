//! History-backed page router.
//!
//! One page is mounted at a time. Navigation is deferred to a microtask so a
//! page is never torn down from inside one of its own callbacks.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use gloo::events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::Element;

use super::{
    audio::{AudioBank, WebHost},
    dom_error,
    menu::MenuView,
    pages::StaticPage,
    window,
};
use crate::{error::CarouselError, navigation::Route, options::Options};

enum Page {
    Menu(MenuView),
    Static(StaticPage),
}

struct RouterInner {
    root: Element,
    options: Options,
    audio: Rc<AudioBank>,
    page: RefCell<Option<Page>>,
    popstate: RefCell<Option<EventListener>>,
}

/// Owns the mounted page. Dropping it unmounts everything.
pub struct Router {
    _inner: Rc<RouterInner>,
}

/// Weak reference handed to pages and hosts so they can request navigation.
#[derive(Clone)]
pub struct RouterHandle(Weak<RouterInner>);

impl Router {
    /// Render the current location into `root` and follow back/forward.
    ///
    /// # Errors
    ///
    /// [`CarouselError::Web`] if the first page cannot be built.
    pub fn mount(root: Element, options: Options) -> Result<Self, CarouselError> {
        let audio = Rc::new(AudioBank::new(&options.sounds, &options.items));
        let inner = Rc::new(RouterInner {
            root,
            options,
            audio,
            page: RefCell::new(None),
            popstate: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let listener = EventListener::new(&window()?, "popstate", move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if let Err(e) = current_path().and_then(|path| inner.render(&path)) {
                log::error!("history navigation failed: {e}");
            }
        });
        *inner.popstate.borrow_mut() = Some(listener);

        inner.render(&current_path()?)?;
        Ok(Self { _inner: inner })
    }
}

impl RouterHandle {
    /// Push `path` onto the history and show its page on the next tick.
    pub fn navigate(&self, path: &str) {
        let handle = self.clone();
        let path = path.to_owned();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = handle.go(&path) {
                log::error!("navigation to {path} failed: {e}");
            }
        });
    }

    fn go(&self, path: &str) -> Result<(), CarouselError> {
        let Some(inner) = self.0.upgrade() else {
            return Ok(());
        };
        window()?
            .history()
            .map_err(|e| dom_error("history", &e))?
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| dom_error("pushState", &e))?;
        inner.render(path)
    }
}

impl RouterInner {
    fn render(self: &Rc<Self>, path: &str) -> Result<(), CarouselError> {
        let route = Route::from_path(path);
        log::info!("showing {route:?} for {path}");

        let old = self.page.borrow_mut().take();
        drop(old);
        self.root.set_inner_html("");

        let handle = RouterHandle(Rc::downgrade(self));
        let page = match route.content() {
            None => {
                let host = WebHost::new(Rc::clone(&self.audio), handle);
                Page::Menu(MenuView::mount(&self.root, &self.options, host)?)
            }
            Some(content) => Page::Static(StaticPage::mount(
                &self.root,
                content,
                Rc::clone(&self.audio),
                handle,
            )?),
        };
        *self.page.borrow_mut() = Some(page);
        Ok(())
    }
}

fn current_path() -> Result<String, CarouselError> {
    window()?
        .location()
        .pathname()
        .map_err(|e| dom_error("location", &e))
}
