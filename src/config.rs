use bon::Builder;
use iced::Color;

use crate::time::ClockTime;

/// Appearance and behavior settings, fixed for the lifetime of a clock.
///
/// ```
/// use iced_touch_clock::ClockConfig;
///
/// let config = ClockConfig::builder().use_duration(false).hand_width(3.0).build();
/// assert!(!config.use_duration);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ClockConfig {
    /// Dial outline and tick marks. Defaults to `#ccc`.
    #[builder(default = Color::from_rgb8(0xcc, 0xcc, 0xcc))]
    pub dial_color: Color,

    /// Hour and minute hands and the center dot. Defaults to `#111`.
    #[builder(default = Color::from_rgb8(0x11, 0x11, 0x11))]
    pub hand_color: Color,

    /// Duration hand and its sector. Defaults to `#4b9`.
    #[builder(default = Color::from_rgb8(0x44, 0xbb, 0x99))]
    pub duration_color: Color,

    /// Hand stroke width in layout units, scaled by the pixel ratio.
    #[builder(default = 2.0)]
    pub hand_width: f32,

    /// Opacity of the duration sector and the handle discs.
    #[builder(default = 0.2)]
    pub alpha: f32,

    /// Whether the duration hand is shown, grabbable and kept in sync.
    #[builder(default = true)]
    pub use_duration: bool,

    /// Start time shown before the host sets one.
    #[builder(default)]
    pub start: ClockTime,

    /// Initial duration in minutes.
    #[builder(default = 120)]
    pub duration: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
