//! HTML audio playback and the browser [`Host`].

use std::rc::Rc;

use rustc_hash::FxHashMap;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use super::router::RouterHandle;
use crate::{
    carousel::ItemId,
    engine::{Host, SoundCue},
    options::{ItemOptions, SoundOptions},
};

/// One preloaded `<audio>` element per cue.
pub struct AudioBank {
    clips: FxHashMap<SoundCue, HtmlAudioElement>,
}

impl AudioBank {
    /// Load every configured clip. Clips the browser refuses are skipped and
    /// their cues play nothing.
    pub fn new(sounds: &SoundOptions, items: &[ItemOptions]) -> Self {
        let mut clips = FxHashMap::default();
        let mut load = |cue: SoundCue, src: &str| match HtmlAudioElement::new_with_src(src) {
            Ok(clip) => {
                clip.set_preload("auto");
                let _ = clips.insert(cue, clip);
            }
            Err(e) => log::warn!("cannot load {src}: {e:?}"),
        };

        load(SoundCue::Hover, &sounds.hover);
        load(SoundCue::Button, &sounds.button);
        load(SoundCue::MenuMusic, &sounds.menu_music);
        for (i, item) in items.iter().enumerate() {
            if let Some(src) = &item.sound {
                load(SoundCue::Select(ItemId(i)), src);
            }
        }

        if let Some(music) = clips.get(&SoundCue::MenuMusic) {
            music.set_loop(true);
            music.set_volume(f64::from(sounds.music_volume.clamp(0.0, 1.0)));
        }
        Self { clips }
    }

    /// Restart `cue` from the beginning.
    pub fn play(&self, cue: SoundCue) {
        let Some(clip) = self.clips.get(&cue) else {
            return;
        };
        clip.set_current_time(0.0);
        match clip.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                // Autoplay policy rejects playback before the first gesture.
                if let Err(e) = JsFuture::from(promise).await {
                    log::debug!("playback of {cue:?} rejected: {e:?}");
                }
            }),
            Err(e) => log::debug!("playback of {cue:?} failed: {e:?}"),
        }
    }

    /// Pause `cue` and rewind it.
    pub fn stop(&self, cue: SoundCue) {
        if let Some(clip) = self.clips.get(&cue) {
            if let Err(e) = clip.pause() {
                log::debug!("pause of {cue:?} failed: {e:?}");
            }
            clip.set_current_time(0.0);
        }
    }
}

/// Delivers engine effects to the page's audio and router.
#[derive(Clone)]
pub struct WebHost {
    audio: Rc<AudioBank>,
    router: RouterHandle,
}

impl WebHost {
    /// Host sharing `audio` and routing through `router`.
    pub fn new(audio: Rc<AudioBank>, router: RouterHandle) -> Self {
        Self { audio, router }
    }
}

impl Host for WebHost {
    fn play(&mut self, cue: SoundCue) {
        self.audio.play(cue);
    }

    fn stop(&mut self, cue: SoundCue) {
        self.audio.stop(cue);
    }

    fn navigate(&mut self, path: &str) {
        self.router.navigate(path);
    }

    fn open_external(&mut self, url: &str) {
        let opened = super::window()
            .map_err(|e| e.to_string())
            .and_then(|w| {
                w.open_with_url_and_target(url, "_blank")
                    .map_err(|e| format!("{e:?}"))
            });
        if let Err(e) = opened {
            log::warn!("cannot open {url}: {e}");
        }
    }
}
