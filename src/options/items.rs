use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry on the ring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct ItemOptions {
    /// Human-readable name (logged, shown as a tooltip on the web).
    pub label: String,
    /// Internal path (`/about`) or external URL.
    pub destination: String,
    /// Sound played when the item reaches the front of the ring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl ItemOptions {
    fn new(label: &str, destination: &str, sound: Option<&str>) -> Self {
        Self {
            label: label.to_owned(),
            destination: destination.to_owned(),
            sound: sound.map(str::to_owned),
        }
    }

    /// The stock five-channel menu.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "About",
                "/about",
                Some("/assets/sounds/select-sound2.mp3"),
            ),
            Self::new("Blog", "/blog", Some("/assets/sounds/select-sound3.mp3")),
            Self::new(
                "Projects",
                "https://example.com/page3",
                Some("/assets/sounds/select-sound4.mp3"),
            ),
            Self::new(
                "Resume",
                "https://example.com/page4",
                Some("/assets/sounds/select-sound5.mp3"),
            ),
            Self::new("Contact", "https://example.com/page5", None),
        ]
    }
}

/// Sound assets shared by every item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sounds", inline)]
#[serde(default)]
pub struct SoundOptions {
    /// Played when the pointer starts hovering an item.
    pub hover: String,
    /// Played when a rotate button is pressed.
    pub button: String,
    /// Looping background music for the menu page.
    pub menu_music: String,
    /// Menu music volume in `[0, 1]`.
    #[schemars(title = "Music Volume", range(min = 0.0, max = 1.0))]
    pub music_volume: f32,
}

impl Default for SoundOptions {
    fn default() -> Self {
        Self {
            hover: "/assets/sounds/3DS-ui6.wav".into(),
            button: "/assets/sounds/+-click.wav".into(),
            menu_music: "/assets/sounds/wiiMenu.wav".into(),
            music_volume: 0.5,
        }
    }
}

/// Greeting overlay text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Menu", inline)]
#[serde(default)]
pub struct MenuOptions {
    /// Heading.
    pub title: String,
    /// Line under the heading.
    pub subtitle: String,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            title: "Hi, I'm Edwin!".into(),
            subtitle: "This site is under construction but check it out and \
                       lmk if you have any ideas! :)"
                .into(),
        }
    }
}
