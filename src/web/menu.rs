//! The carousel page: greeting overlay, canvas and rotate buttons.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use gloo::{
    events::EventListener,
    render::{request_animation_frame, AnimationFrame},
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use super::{document, dom_error, window};
use crate::{
    engine::{CarouselEngine, Host},
    error::CarouselError,
    gpu::CarouselRenderer,
    options::Options,
    CarouselCommand, InputEvent, MouseButton,
};

struct MenuState {
    engine: RefCell<Option<CarouselEngine>>,
    renderer: RefCell<Option<CarouselRenderer>>,
    host: RefCell<Box<dyn Host>>,
    canvas: HtmlCanvasElement,
    frame: RefCell<Option<AnimationFrame>>,
    /// Animation frames run so far.
    frames: Cell<u64>,
}

impl MenuState {
    fn with_engine(&self, f: impl FnOnce(&mut CarouselEngine)) {
        if let Some(engine) = self.engine.borrow_mut().as_mut() {
            f(engine);
        }
    }

    fn tick(&self) {
        self.frames.set(self.frames.get() + 1);
        let mut engine = self.engine.borrow_mut();
        let Some(engine) = engine.as_mut() else {
            return;
        };
        let _ = engine.update();
        if let Some(renderer) = self.renderer.borrow_mut().as_mut() {
            renderer.render(engine.camera(), engine.placements());
        }
        engine.flush(&mut **self.host.borrow_mut());
    }

    /// Match the canvas backing store to the window's device pixels.
    fn fit_canvas(&self) -> (u32, u32) {
        let (width, height) = viewport_pixels();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width, height)
    }

    fn resize(&self) {
        let (width, height) = self.fit_canvas();
        self.with_engine(|engine| engine.resize(width, height));
        if let Some(renderer) = self.renderer.borrow_mut().as_mut() {
            renderer.resize(width, height);
        }
    }
}

fn schedule_frame(state: &Rc<MenuState>) {
    let weak = Rc::downgrade(state);
    let frame = request_animation_frame(move |_| {
        if let Some(state) = weak.upgrade() {
            state.tick();
            schedule_frame(&state);
        }
    });
    *state.frame.borrow_mut() = Some(frame);
}

fn device_pixel_ratio() -> f64 {
    window().map_or(1.0, |w| w.device_pixel_ratio())
}

fn viewport_pixels() -> (u32, u32) {
    let Ok(window) = window() else {
        return (1, 1);
    };
    let dpr = window.device_pixel_ratio();
    let css = |value: Result<wasm_bindgen::JsValue, _>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    let width = css(window.inner_width()) * dpr;
    let height = css(window.inner_height()) * dpr;
    (width.max(1.0) as u32, height.max(1.0) as u32)
}

/// Pointer position in canvas pixels.
fn canvas_point(event: &MouseEvent) -> InputEvent {
    let dpr = device_pixel_ratio();
    InputEvent::CursorMoved {
        x: (f64::from(event.offset_x()) * dpr) as f32,
        y: (f64::from(event.offset_y()) * dpr) as f32,
    }
}

/// A mounted menu. Dropping it stops the frame loop and every sound.
pub(crate) struct MenuView {
    state: Rc<MenuState>,
    _listeners: Vec<EventListener>,
}

impl MenuView {
    pub(crate) fn mount(
        root: &Element,
        options: &Options,
        host: impl Host + 'static,
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

        let greeting = create("div")?;
        greeting.set_class_name("ringmenu-greeting");
        set_style(&greeting, "pointer-events: none")?;
        let title = create("h1")?;
        title.set_text_content(Some(&options.menu.title));
        let subtitle = create("p")?;
        subtitle.set_text_content(Some(&options.menu.subtitle));
        append(&greeting, &title)?;
        append(&greeting, &subtitle)?;

        let canvas: HtmlCanvasElement = create("canvas")?
            .dyn_into()
            .map_err(|_| CarouselError::Web("canvas is not a canvas".into()))?;
        canvas.set_class_name("ringmenu-canvas");
        set_style(&canvas, "display: block; width: 100vw; height: 100vh")?;

        let left = create("button")?;
        left.set_class_name("ringmenu-rotate ringmenu-rotate-left");
        left.set_text_content(Some("\u{2013}"));
        let right = create("button")?;
        right.set_class_name("ringmenu-rotate ringmenu-rotate-right");
        right.set_text_content(Some("+"));

        append(root, &greeting)?;
        append(root, canvas.as_ref())?;
        append(root, &left)?;
        append(root, &right)?;

        let state = Rc::new(MenuState {
            engine: RefCell::new(None),
            renderer: RefCell::new(None),
            host: RefCell::new(Box::new(host)),
            canvas,
            frame: RefCell::new(None),
            frames: Cell::new(0),
        });
        let size = state.fit_canvas();
        *state.engine.borrow_mut() = Some(CarouselEngine::new(options.clone(), size)?);

        let listeners = bind_listeners(&state, &left, &right)?;
        spawn_renderer(Rc::downgrade(&state), size, options);
        schedule_frame(&state);

        Ok(Self {
            state,
            _listeners: listeners,
        })
    }
}

impl Drop for MenuView {
    fn drop(&mut self) {
        drop(self.state.frame.borrow_mut().take());
        if let Some(engine) = self.state.engine.borrow_mut().take() {
            engine.teardown(&mut **self.state.host.borrow_mut());
        }
    }
}

fn set_style(element: &Element, style: &str) -> Result<(), CarouselError> {
    element
        .set_attribute("style", style)
        .map_err(|e| dom_error("setAttribute", &e))
}

fn bind_listeners(
    state: &Rc<MenuState>,
    left: &Element,
    right: &Element,
) -> Result<Vec<EventListener>, CarouselError> {
    let on = |target: &web_sys::EventTarget,
              name: &'static str,
              handler: fn(&MenuState, &web_sys::Event)| {
        let weak: Weak<MenuState> = Rc::downgrade(state);
        EventListener::new(target, name, move |event| {
            if let Some(state) = weak.upgrade() {
                handler(&state, event);
            }
        })
    };

    let canvas: &web_sys::EventTarget = state.canvas.as_ref();
    let window = window()?;
    Ok(vec![
        on(left, "click", |state, _| {
            state.with_engine(|e| e.execute(CarouselCommand::RotateLeft));
        }),
        on(right, "click", |state, _| {
            state.with_engine(|e| e.execute(CarouselCommand::RotateRight));
        }),
        on(canvas, "mousemove", |state, event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                state.with_engine(|e| {
                    let _ = e.handle_input(canvas_point(mouse));
                });
            }
        }),
        on(canvas, "mouseleave", |state, _| {
            state.with_engine(|e| {
                let _ = e.handle_input(InputEvent::CursorLeft);
            });
        }),
        on(canvas, "mousedown", |state, event| {
            mouse_button(state, event, true);
        }),
        on(canvas, "mouseup", |state, event| {
            mouse_button(state, event, false);
        }),
        on(&window, "keydown", |state, event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.repeat() {
                return;
            }
            let code = key.code();
            state.with_engine(|e| {
                if e.handle_key_press(&code) {
                    key.prevent_default();
                }
            });
        }),
        on(&window, "resize", |state, _| state.resize()),
    ])
}

fn mouse_button(state: &MenuState, event: &web_sys::Event, pressed: bool) {
    let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
        return;
    };
    state.with_engine(|e| {
        let _ = e.handle_input(canvas_point(mouse));
        let _ = e.handle_input(InputEvent::MouseButton {
            button: MouseButton::from_dom(mouse.button()),
            pressed,
        });
    });
}

fn spawn_renderer(state: Weak<MenuState>, size: (u32, u32), options: &Options) {
    let lighting = options.lighting.clone();
    let Some(canvas) = state.upgrade().map(|s| s.canvas.clone()) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        let target = wgpu::SurfaceTarget::Canvas(canvas);
        match CarouselRenderer::create(target, size, &lighting).await {
            Ok(mut renderer) => {
                let Some(state) = state.upgrade() else {
                    return;
                };
                // The window may have changed size while the device was
                // being requested.
                let (width, height) = (state.canvas.width(), state.canvas.height());
                renderer.resize(width, height);
                *state.renderer.borrow_mut() = Some(renderer);
            }
            Err(e) => log::error!("cannot start the renderer: {e}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use super::*;
    use crate::engine::{Effect, RecordingHost, SoundCue};

    wasm_bindgen_test_configure!(run_in_browser);

    /// Records into a log the test keeps after the view is gone.
    #[derive(Clone, Default)]
    struct SharedHost(Rc<RefCell<RecordingHost>>);

    impl Host for SharedHost {
        fn play(&mut self, cue: SoundCue) {
            self.0.borrow_mut().play(cue);
        }

        fn stop(&mut self, cue: SoundCue) {
            self.0.borrow_mut().stop(cue);
        }

        fn navigate(&mut self, path: &str) {
            self.0.borrow_mut().navigate(path);
        }

        fn open_external(&mut self, url: &str) {
            self.0.borrow_mut().open_external(url);
        }
    }

    #[wasm_bindgen_test(async)]
    async fn dropping_the_view_stops_frames_and_music() {
        let root = document().unwrap().create_element("div").unwrap();
        let host = SharedHost::default();
        let view = MenuView::mount(&root, &Options::default(), host.clone()).unwrap();

        TimeoutFuture::new(200).await;
        let state = Rc::clone(&view.state);
        assert!(state.frames.get() > 0, "frame loop never started");
        assert_eq!(
            host.0.borrow().count(&Effect::Play(SoundCue::MenuMusic)),
            1
        );

        drop(view);
        let frames_at_drop = state.frames.get();
        TimeoutFuture::new(200).await;

        assert_eq!(state.frames.get(), frames_at_drop);
        assert!(state.engine.borrow().is_none());
        assert_eq!(
            host.0.borrow().count(&Effect::Stop(SoundCue::MenuMusic)),
            1
        );
    }
}
