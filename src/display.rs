//! Display configuration
//!
//! Window geometry and palette for whatever renderer draws the court. The
//! simulation never reads any of this; a renderer is built from an explicit
//! `DisplayConfig` instead of flipping a process-wide pixel mode.

use serde::{Deserialize, Serialize};

use crate::consts::REF_W;
use crate::sim::Side;

/// RGB colour triple
pub type Rgb = (u8, u8, u8);

pub const BALL_COLOR: Rgb = (217, 79, 0);
pub const AGENT_LEFT_COLOR: Rgb = (35, 93, 188);
pub const AGENT_RIGHT_COLOR: Rgb = (255, 236, 0);
/// Both agents share this colour in pixel mode
pub const PIXEL_AGENT_COLOR: Rgb = (255, 191, 0);
pub const BACKGROUND_COLOR: Rgb = (11, 16, 19);
pub const FENCE_COLOR: Rgb = (102, 56, 35);
pub const COIN_COLOR: Rgb = FENCE_COLOR;
pub const GROUND_COLOR: Rgb = (116, 114, 117);

/// Pixel observation resolution (before upscaling)
pub const PIXEL_WIDTH: u32 = 84 * 2;
pub const PIXEL_HEIGHT: u32 = 84;
/// Pixel mode renders at this multiple of the observation size, then downscales
pub const PIXEL_SCALE: u32 = 4;

/// Rendering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DisplayMode {
    /// Smooth window for human viewing
    #[default]
    Standard,
    /// Low-resolution frames for pixel observations
    Pixel,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Standard => "Standard",
            DisplayMode::Pixel => "Pixel",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(DisplayMode::Standard),
            "pixel" | "pixels" => Some(DisplayMode::Pixel),
            _ => None,
        }
    }

    /// Window size in pixels (width, height)
    pub fn window_size(&self) -> (u32, u32) {
        match self {
            DisplayMode::Standard => (1200, 500),
            DisplayMode::Pixel => (PIXEL_WIDTH * PIXEL_SCALE, PIXEL_HEIGHT * PIXEL_SCALE),
        }
    }
}

/// Renderer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub mode: DisplayMode,
    pub window_width: u32,
    pub window_height: u32,
    /// Court width in world units the window spans
    pub court_width: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::from_mode(DisplayMode::Standard)
    }
}

impl DisplayConfig {
    /// Create a configuration with the mode's window size
    pub fn from_mode(mode: DisplayMode) -> Self {
        let (window_width, window_height) = mode.window_size();
        Self {
            mode,
            window_width,
            window_height,
            court_width: REF_W,
        }
    }

    /// Pixels per world unit
    #[inline]
    pub fn factor(&self) -> f64 {
        self.window_width as f64 / self.court_width
    }

    /// World x (centered on the fence) to screen x
    #[inline]
    pub fn to_screen_x(&self, x: f64) -> f64 {
        (x + self.court_width / 2.0) * self.factor()
    }

    /// World y (up) to screen y (down)
    #[inline]
    pub fn to_screen_y(&self, y: f64) -> f64 {
        self.window_height as f64 - y * self.factor()
    }

    /// World length to pixels
    #[inline]
    pub fn to_pixels(&self, len: f64) -> f64 {
        len * self.factor()
    }

    pub fn agent_color(&self, side: Side) -> Rgb {
        match (self.mode, side) {
            (DisplayMode::Pixel, _) => PIXEL_AGENT_COLOR,
            (DisplayMode::Standard, Side::Left) => AGENT_LEFT_COLOR,
            (DisplayMode::Standard, Side::Right) => AGENT_RIGHT_COLOR,
        }
    }

    pub fn ball_color(&self) -> Rgb {
        BALL_COLOR
    }

    pub fn fence_color(&self) -> Rgb {
        FENCE_COLOR
    }

    pub fn ground_color(&self) -> Rgb {
        GROUND_COLOR
    }

    pub fn background_color(&self) -> Rgb {
        BACKGROUND_COLOR
    }
}
