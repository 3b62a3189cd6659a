//! Static text pages with navigation buttons.

use std::rc::Rc;

use gloo::events::EventListener;
use web_sys::Element;

use super::{audio::AudioBank, document, dom_error, router::RouterHandle};
use crate::{engine::SoundCue, error::CarouselError, navigation::PageContent};

/// A mounted static page. Its button listeners live as long as it does.
pub(crate) struct StaticPage {
    _listeners: Vec<EventListener>,
}

impl StaticPage {
    pub(crate) fn mount(
        root: &Element,
        content: PageContent,
        audio: Rc<AudioBank>,
        router: RouterHandle,
    ) -> Result<Self, CarouselError> {
        let doc = document()?;
        let create = |tag: &str| {
            doc.create_element(tag)
                .map_err(|e| dom_error("createElement", &e))
        };
        let append = |parent: &Element, child: &Element| {
            parent
                .append_child(child)
                .map(|_| ())
                .map_err(|e| dom_error("appendChild", &e))
        };

        let page = create("section")?;
        page.set_class_name("ringmenu-page");
        let title = create("h1")?;
        title.set_text_content(Some(content.title));
        let body = create("p")?;
        body.set_text_content(Some(content.body));
        let nav = create("nav")?;
        append(&page, &title)?;
        append(&page, &body)?;
        append(&page, &nav)?;

        let mut listeners = Vec::with_capacity(content.links.len() * 2);
        for link in content.links {
            let button = create("button")?;
            button.set_class_name("ringmenu-page-button");
            button.set_text_content(Some(link.label));
            append(&nav, &button)?;

            let hover_audio = Rc::clone(&audio);
            listeners.push(EventListener::new(&button, "mouseenter", move |_| {
                hover_audio.play(SoundCue::Hover);
            }));
            let router = router.clone();
            let path = link.path;
            listeners.push(EventListener::new(&button, "click", move |_| {
                router.navigate(path);
            }));
        }

        append(root, &page)?;
        Ok(Self {
            _listeners: listeners,
        })
    }
}
