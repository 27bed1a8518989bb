//! Canvas configuration.

use crate::color::{DEFAULT_BACKGROUND, css_color_or, white};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Fixed logical height of the drawing surface.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Behavior switches for one drawing canvas.
///
/// Every field has a default so hosts can pass a partial JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface height in drawing units. Width always follows the container.
    pub height: f64,
    /// Whether line, rectangle and circle tools are offered.
    pub supports_shapes: bool,
    /// Allocate the bitmap at device resolution and scale drawing to match.
    pub device_pixel_aware: bool,
    /// CSS color every repaint starts from.
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_CANVAS_HEIGHT,
            supports_shapes: true,
            device_pixel_aware: true,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl CanvasConfig {
    /// The basic pen-only canvas: 400 units tall, no shapes, no DPI scaling.
    pub fn basic() -> Self {
        Self {
            height: 400.0,
            supports_shapes: false,
            device_pixel_aware: false,
            ..Self::default()
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn with_shapes(mut self, supports_shapes: bool) -> Self {
        self.supports_shapes = supports_shapes;
        self
    }

    pub fn with_device_pixels(mut self, device_pixel_aware: bool) -> Self {
        self.device_pixel_aware = device_pixel_aware;
        self
    }

    /// Background as a paint color.
    pub fn background_color(&self) -> Color {
        css_color_or(&self.background, white())
    }
}

/// Layout size of the element hosting the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerMetrics {
    /// Current layout width in CSS pixels.
    pub width: f64,
    /// Device pixels per CSS pixel.
    pub device_pixel_ratio: f64,
}

impl ContainerMetrics {
    pub fn new(width: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            device_pixel_ratio,
        }
    }

    /// Whether these metrics describe a surface that can be allocated.
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}

/// Backing bitmap size derived from a container and a config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Device pixels per drawing unit.
    pub scale: f64,
}

impl SurfaceLayout {
    /// Compute the bitmap size for `container`, or `None` if it has no usable width.
    pub fn for_container(config: &CanvasConfig, container: ContainerMetrics) -> Option<Self> {
        if !container.is_usable() {
            return None;
        }
        let scale = if config.device_pixel_aware
            && container.device_pixel_ratio.is_finite()
            && container.device_pixel_ratio > 0.0
        {
            container.device_pixel_ratio
        } else {
            1.0
        };
        let height = if config.height.is_finite() && config.height > 0.0 {
            config.height
        } else {
            DEFAULT_CANVAS_HEIGHT
        };
        Some(Self {
            pixel_width: (container.width * scale).ceil() as u32,
            pixel_height: (height * scale).ceil() as u32,
            scale,
        })
    }
}
