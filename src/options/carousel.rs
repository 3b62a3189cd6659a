use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ring layout and per-frame motion constants.
///
/// Smoothing factors are applied once per frame as
/// `value += (target - value) * factor`; steps are fixed per-frame
/// increments, so perceived speed follows the display refresh rate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Carousel", inline)]
#[serde(default)]
pub struct CarouselOptions {
    /// Distance of every item from the ring centre.
    #[schemars(title = "Radius", range(min = 1.0, max = 20.0))]
    pub radius: f32,
    /// Height of the idle floating bob.
    #[schemars(title = "Float Amplitude", range(min = 0.0, max = 1.0))]
    pub float_amplitude: f32,
    /// Elapsed-time increment per frame (drives the bob).
    pub time_step: f32,
    /// Ring angle smoothing factor per frame.
    #[schemars(title = "Angle Smoothing", range(min = 0.01, max = 1.0))]
    pub angle_smoothing: f32,
    /// Item scale smoothing factor per frame.
    #[schemars(title = "Scale Smoothing", range(min = 0.01, max = 1.0))]
    pub scale_smoothing: f32,
    /// Uniform scale of a hovered item.
    #[schemars(title = "Hover Scale", range(min = 1.0, max = 2.0))]
    pub hover_scale: f32,
    /// Idle spin added to every item each frame, in radians.
    pub spin_step: f32,
    /// Smoothing factor of a hovered item's spin toward the viewer.
    pub hover_spin_smoothing: f32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            radius: 5.0,
            float_amplitude: 0.1,
            time_step: 0.02,
            angle_smoothing: 0.05,
            scale_smoothing: 0.1,
            hover_scale: 1.2,
            spin_step: 0.003,
            hover_spin_smoothing: 0.1,
        }
    }
}
