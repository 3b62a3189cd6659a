use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient + single directional light, plus the hover highlight.
pub struct LightingOptions {
    /// Ambient light color (linear RGB).
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    #[schemars(title = "Ambient", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Directional light position; the light shines toward the origin.
    #[schemars(skip)]
    pub light_position: [f32; 3],
    #[schemars(title = "Key Light", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    /// Directional light intensity.
    pub light_intensity: f32,
    /// Base color of every item.
    #[schemars(skip)]
    pub item_color: [f32; 3],
    #[schemars(title = "Hover Glow", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    /// Extra brightness added to a hovered item.
    pub hover_glow: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        // 0xaaaaaa
        let grey = 170.0 / 255.0;
        Self {
            ambient_color: [grey, grey, grey],
            ambient_intensity: 1.2,
            light_position: [5.0, 10.0, 7.5],
            light_intensity: 2.8,
            item_color: [1.0, 1.0, 1.0],
            hover_glow: 0.25,
        }
    }
}
