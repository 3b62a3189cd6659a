//! Side effects requested by the engine and the host that performs them.
//!
//! The engine never touches audio or the browser directly. It queues
//! [`Effect`]s while handling commands and frames; the front end drains them
//! into its [`Host`] once per frame.

use crate::carousel::ItemId;

/// A sound the menu can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Pointer entered an item.
    Hover,
    /// A rotate button or key was used.
    Button,
    /// Looping background music.
    MenuMusic,
    /// The item just became front-most.
    Select(ItemId),
}

/// A side effect for the host to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Play a cue from its start.
    Play(SoundCue),
    /// Stop a cue and rewind it.
    Stop(SoundCue),
    /// Route to an internal path, e.g. `/about`.
    Navigate(String),
    /// Open an external URL in a new tab.
    OpenExternal(String),
}

/// Platform services the engine's effects are delivered to.
pub trait Host {
    /// Play `cue` from the start. Failures are the host's to swallow.
    fn play(&mut self, cue: SoundCue);

    /// Stop `cue` and rewind it.
    fn stop(&mut self, cue: SoundCue);

    /// Route to an internal path.
    fn navigate(&mut self, path: &str);

    /// Open an external URL outside the menu.
    fn open_external(&mut self, url: &str);

    /// Dispatch one effect to the matching method.
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::Play(cue) => self.play(*cue),
            Effect::Stop(cue) => self.stop(*cue),
            Effect::Navigate(path) => self.navigate(path),
            Effect::OpenExternal(url) => self.open_external(url),
        }
    }
}

/// A [`Host`] that only records what it was asked to do.
///
/// Useful for headless runs and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingHost {
    /// Every effect received, in order.
    pub effects: Vec<Effect>,
}

impl RecordingHost {
    /// Number of recorded effects equal to `effect`.
    pub fn count(&self, effect: &Effect) -> usize {
        self.effects.iter().filter(|e| *e == effect).count()
    }

    /// Recorded navigations and external opens, in order.
    pub fn destinations(&self) -> Vec<&Effect> {
        self.effects
            .iter()
            .filter(|e| matches!(e, Effect::Navigate(_) | Effect::OpenExternal(_)))
            .collect()
    }
}

impl Host for RecordingHost {
    fn play(&mut self, cue: SoundCue) {
        self.effects.push(Effect::Play(cue));
    }

    fn stop(&mut self, cue: SoundCue) {
        self.effects.push(Effect::Stop(cue));
    }

    fn navigate(&mut self, path: &str) {
        self.effects.push(Effect::Navigate(path.to_owned()));
    }

    fn open_external(&mut self, url: &str) {
        self.effects.push(Effect::OpenExternal(url.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_routes_to_matching_method() {
        let mut host = RecordingHost::default();
        let effects = [
            Effect::Play(SoundCue::Hover),
            Effect::Stop(SoundCue::MenuMusic),
            Effect::Navigate("/about".into()),
            Effect::OpenExternal("https://example.com".into()),
        ];
        for effect in &effects {
            host.apply(effect);
        }
        assert_eq!(host.effects, effects);
        assert_eq!(host.destinations().len(), 2);
    }
}
