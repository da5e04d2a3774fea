//! Surface layout and palette shared by the renderer and the sim
//!
//! The restart control lives here because two sides need the same
//! geometry: the renderer draws it and the tick hit-tests clicks against
//! it. Everything is in logical surface coordinates.

use glam::Vec2;

use crate::consts::{LOGICAL_HEIGHT, LOGICAL_WIDTH};

/// Axis-aligned rectangle in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive-edge containment, matching DOM-style hit testing
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Restart button shown on the game-over overlay, positioned relative to
/// the surface center
pub fn restart_button() -> Rect {
    Rect::new(
        LOGICAL_WIDTH / 2.0 - 50.0,
        LOGICAL_HEIGHT / 2.0 + 60.0,
        100.0,
        30.0,
    )
}

/// Fixed colors for everything the renderer draws
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub player: &'static str,
    pub pursuer: &'static str,
    pub scrim: &'static str,
    pub overlay_text: &'static str,
    pub button: &'static str,
    pub button_label: &'static str,
}

const DEFAULT_PALETTE: Palette = Palette {
    player: "#3498db",
    pursuer: "#e74c3c",
    scrim: "rgba(0, 0, 0, 0.5)",
    overlay_text: "white",
    button: "#4CAF50",
    button_label: "white",
};

const HIGH_CONTRAST_PALETTE: Palette = Palette {
    player: "#ffffff",
    pursuer: "#ffd400",
    scrim: "rgba(0, 0, 0, 0.75)",
    overlay_text: "white",
    button: "#0057e7",
    button_label: "white",
};

/// Palette selection from the accessibility setting
pub fn palette(high_contrast: bool) -> Palette {
    if high_contrast {
        HIGH_CONTRAST_PALETTE
    } else {
        DEFAULT_PALETTE
    }
}
