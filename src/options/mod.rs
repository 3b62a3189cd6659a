//! Centralized carousel options with TOML preset support.
//!
//! Every tweakable constant (motion tuning, camera, lighting, sounds, the
//! item list, key bindings) is consolidated here. Options serialize to/from
//! TOML for presets on disk, and from JSON when embedded in a web page.

mod camera;
mod carousel;
mod items;
mod lighting;

use std::path::Path;

pub use camera::CameraOptions;
pub use carousel::CarouselOptions;
pub use items::{ItemOptions, MenuOptions, SoundOptions};
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[carousel]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Ring layout and motion tuning.
    pub carousel: CarouselOptions,
    /// Camera projection and placement.
    pub camera: CameraOptions,
    /// Scene lighting.
    pub lighting: LightingOptions,
    /// Shared sound effect assets.
    pub sounds: SoundOptions,
    /// Greeting overlay shown above the carousel.
    pub menu: MenuOptions,
    /// Items on the ring, in initial order (index 0 starts at the front).
    pub items: Vec<ItemOptions>,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            carousel: CarouselOptions::default(),
            camera: CameraOptions::default(),
            lighting: LightingOptions::default(),
            sounds: SoundOptions::default(),
            menu: MenuOptions::default(),
            items: ItemOptions::defaults(),
            keybindings: KeyBindings::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, CarouselError> {
        toml::from_str(content)
            .map_err(|e| CarouselError::OptionsParse(e.to_string()))
    }

    /// Parse options from a JSON string (used for options embedded in a
    /// web page). Missing fields use defaults.
    pub fn from_json(content: &str) -> Result<Self, CarouselError> {
        serde_json::from_str(content)
            .map_err(|e| CarouselError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CarouselError> {
        let content =
            std::fs::read_to_string(path).map_err(CarouselError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CarouselError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CarouselError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CarouselError::Io)?;
        }
        std::fs::write(path, content).map_err(CarouselError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CarouselCommand;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[carousel]
radius = 7.5
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.carousel.radius, 7.5);
        // Everything else should be default
        assert_eq!(opts.carousel.angle_smoothing, 0.05);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.items.len(), 5);
    }

    #[test]
    fn items_can_be_replaced_from_toml() {
        let toml_str = r#"
[[items]]
label = "Home"
destination = "/"

[[items]]
label = "Docs"
destination = "https://example.com/docs"
sound = "/assets/sounds/docs.mp3"
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.items.len(), 2);
        assert_eq!(opts.items[0].sound, None);
        assert_eq!(
            opts.items[1].sound.as_deref(),
            Some("/assets/sounds/docs.mp3")
        );
    }

    #[test]
    fn json_options_parse() {
        let opts =
            Options::from_json(r#"{ "menu": { "title": "Hello" } }"#).unwrap();
        assert_eq!(opts.menu.title, "Hello");
        assert_eq!(opts.sounds, SoundOptions::default());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[carousel\nradius = ").unwrap_err();
        assert!(matches!(err, CarouselError::OptionsParse(_)));
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowLeft"),
            Some(CarouselCommand::RotateLeft)
        );
        assert_eq!(
            opts.keybindings.lookup("Equal"),
            Some(CarouselCommand::RotateRight)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("ringmenu-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.carousel.hover_scale = 1.5;
        opts.save(&dir.join("wide.toml")).unwrap();
        Options::default().save(&dir.join("calm.toml")).unwrap();

        let loaded = Options::load(&dir.join("wide.toml")).unwrap();
        assert_eq!(loaded.carousel.hover_scale, 1.5);
        assert_eq!(Options::list_presets(&dir), vec!["calm", "wide"]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("carousel"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("items"));
        assert!(!props.contains_key("keybindings"));
    }

    #[test]
    fn bundled_presets_parse() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("presets");
        let names = Options::list_presets(&dir);
        assert!(names.contains(&"calm".to_owned()));
        for name in names {
            let opts = Options::load(&dir.join(format!("{name}.toml"))).unwrap();
            assert!(!opts.items.is_empty(), "{name} has no items");
        }
    }
}
