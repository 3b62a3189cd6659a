//! Command dispatch: rotation, hover hit-testing and click resolution.

use glam::Vec2;

use super::{CarouselCommand, CarouselEngine, Effect, SoundCue};
use crate::camera::Camera;
use crate::carousel::{Direction, ItemId};
use crate::input::InputEvent;
use crate::navigation::Destination;
use crate::picking::{self, Hit};

impl CarouselEngine {
    /// Run one command.
    pub fn execute(&mut self, command: CarouselCommand) {
        match command {
            CarouselCommand::RotateLeft => self.rotate(Direction::Left),
            CarouselCommand::RotateRight => self.rotate(Direction::Right),
            CarouselCommand::PointerMoved { x, y } => {
                self.pointer = Some(Vec2::new(x, y));
                self.refresh_hover();
            }
            CarouselCommand::PointerLeft => {
                self.pointer = None;
                self.refresh_hover();
            }
            CarouselCommand::Activate => self.activate(),
        }
    }

    /// Feed a raw input event through the input processor. Returns whether
    /// it produced a command.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.handle_event(event) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    /// Run the command bound to a physical key, if any. Returns whether
    /// the key was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        match self.input.handle_key_press(key) {
            Some(command) => {
                self.execute(command);
                true
            }
            None => false,
        }
    }

    fn rotate(&mut self, direction: Direction) {
        self.effects.push(Effect::Play(SoundCue::Button));
        self.carousel.rotate(direction);
    }

    /// Items under a viewport pixel, nearest first.
    pub fn pick_at(&self, pixel: Vec2) -> Vec<Hit> {
        let Some(ndc) = Camera::pixel_to_ndc(pixel, self.viewport) else {
            return Vec::new();
        };
        let ray = self.camera.ray_through_ndc(ndc);
        picking::pick(&ray, &self.placements)
    }

    /// Re-test every item against the pointer. Items under it start
    /// hovering, all others stop. Each hover-enter queues one hover sound.
    fn refresh_hover(&mut self) {
        let hits = self.pointer.map(|p| self.pick_at(p)).unwrap_or_default();
        let view_angle = self.camera.yaw();
        let ids: Vec<ItemId> = self.carousel.items().map(|item| item.id).collect();
        for id in ids {
            let hovering = hits.iter().any(|hit| hit.id == id);
            if self.carousel.set_hover(id, hovering, view_angle) {
                log::debug!("hover enter {id:?}");
                self.effects.push(Effect::Play(SoundCue::Hover));
            }
        }
    }

    /// Resolve a click at the last pointer position. The nearest item hit
    /// decides where to go; a miss does nothing.
    fn activate(&mut self) {
        let Some(pointer) = self.pointer else {
            return;
        };
        let Some(hit) = self.pick_at(pointer).into_iter().next() else {
            return;
        };
        let Some(destination) = self.carousel.destination(hit.id) else {
            return;
        };
        let effect = match Destination::classify(destination) {
            Destination::Internal(path) => {
                log::info!("navigate to {path}");
                Effect::Navigate(path.to_owned())
            }
            Destination::External(url) => {
                log::info!("open external {url}");
                Effect::OpenExternal(url.to_owned())
            }
        };
        self.effects.push(effect);
    }
}
