//! The per-frame interaction loop.
//!
//! [`CarouselEngine`] ties the carousel controller to the camera and the
//! CPU picker. It is platform independent: front ends feed it input and a
//! viewport size, call [`update`](CarouselEngine::update) once per display
//! frame, hand the resulting placements to their renderer, and flush the
//! queued [`Effect`]s into their [`Host`].

/// Commands accepted by [`CarouselEngine::execute`].
pub mod command;
/// Side effects and the host trait that performs them.
pub mod effect;
mod input;

use glam::Vec2;
use rand::Rng;

pub use self::command::CarouselCommand;
pub use self::effect::{Effect, Host, RecordingHost, SoundCue};
use crate::camera::Camera;
use crate::carousel::{Carousel, ItemId, Placement};
use crate::error::CarouselError;
use crate::input::InputProcessor;
use crate::options::Options;

/// The carousel menu's interaction and animation loop.
#[derive(Debug)]
pub struct CarouselEngine {
    options: Options,
    carousel: Carousel,
    camera: Camera,
    /// Viewport size in physical pixels.
    viewport: (u32, u32),
    input: InputProcessor,
    /// Last pointer position reported through a command.
    pointer: Option<Vec2>,
    /// Placements published by the last frame; picking tests against these.
    placements: Vec<Placement>,
    /// Effects waiting for the next flush.
    effects: Vec<Effect>,
}

impl CarouselEngine {
    /// Mount the menu: build the ring from `options` and start the menu
    /// music.
    ///
    /// # Errors
    ///
    /// [`CarouselError::EmptyRing`] if `options.items` is empty.
    pub fn new(
        options: Options,
        viewport: (u32, u32),
    ) -> Result<Self, CarouselError> {
        Self::with_rng(options, viewport, &mut rand::rng())
    }

    /// Like [`new`](Self::new), drawing the items' idle spins from `rng`.
    ///
    /// # Errors
    ///
    /// [`CarouselError::EmptyRing`] if `options.items` is empty.
    pub fn with_rng<R: Rng + ?Sized>(
        options: Options,
        viewport: (u32, u32),
        rng: &mut R,
    ) -> Result<Self, CarouselError> {
        let carousel =
            Carousel::with_rng(&options.items, options.carousel.clone(), rng)?;
        let camera = Camera::from_options(&options.camera, viewport);
        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        let placements = carousel.placements();

        log::info!(
            "carousel mounted with {} items ({}x{})",
            carousel.len(),
            viewport.0,
            viewport.1
        );

        Ok(Self {
            options,
            carousel,
            camera,
            viewport,
            input,
            pointer: None,
            placements,
            effects: vec![Effect::Play(SoundCue::MenuMusic)],
        })
    }

    // ── Frame loop ──────────────────────────────────────────────────────

    /// Advance one display frame and return the placements to draw.
    ///
    /// Queues the front item's activation sound when a new item has just
    /// reached ring position 0.
    pub fn update(&mut self) -> &[Placement] {
        if let Some(id) = self.carousel.advance() {
            self.on_front_changed(id);
        }
        self.placements = self.carousel.placements();
        &self.placements
    }

    fn on_front_changed(&mut self, id: ItemId) {
        let Some(item) = self.carousel.item(id) else {
            return;
        };
        log::debug!("{} reached the front", item.label);
        if item.activation_sound.is_some() {
            self.effects.push(Effect::Play(SoundCue::Select(id)));
        }
    }

    /// Track a new viewport size. Carousel state is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.resize(width, height);
    }

    // ── Effects ─────────────────────────────────────────────────────────

    /// Take every queued effect, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Deliver every queued effect to `host`, oldest first.
    pub fn flush<H: Host + ?Sized>(&mut self, host: &mut H) {
        for effect in self.drain_effects() {
            host.apply(&effect);
        }
    }

    /// Unmount the menu: flush anything pending, then stop and rewind every
    /// sound the menu may have started.
    pub fn teardown<H: Host + ?Sized>(mut self, host: &mut H) {
        let selects: Vec<SoundCue> = self
            .carousel
            .items()
            .filter(|item| item.activation_sound.is_some())
            .map(|item| SoundCue::Select(item.id))
            .collect();
        self.effects.extend(
            [SoundCue::MenuMusic, SoundCue::Hover, SoundCue::Button]
                .into_iter()
                .chain(selects)
                .map(Effect::Stop),
        );
        self.flush(host);
        log::info!("carousel torn down");
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// The carousel controller.
    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    /// The camera the scene is viewed through.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Placements published by the last frame.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Current viewport size in physical pixels.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Last pointer position inside the viewport.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Active options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Apply new options.
    ///
    /// Motion tuning, camera and key bindings take effect immediately. A
    /// changed item list rebuilds the ring from scratch.
    ///
    /// # Errors
    ///
    /// [`CarouselError::EmptyRing`] if the new item list is empty. The
    /// engine keeps its previous options in that case.
    pub fn set_options(&mut self, options: Options) -> Result<(), CarouselError> {
        if options.items != self.options.items {
            self.carousel =
                Carousel::new(&options.items, options.carousel.clone())?;
            self.placements = self.carousel.placements();
        } else {
            self.carousel.set_tuning(options.carousel.clone());
        }
        self.camera = Camera::from_options(&options.camera, self.viewport);
        self.input.set_key_bindings(options.keybindings.clone());
        self.options = options;
        Ok(())
    }
}
