// File: crates/healchart-core/src/types.rs
// Summary: Shared types and constants (sizes, colors, paddings).

use serde::Deserialize;

/// Default surface width in pixels.
pub const WIDTH: i32 = 960;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 600;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right); `None` on overflow.
    pub const fn hsum(&self) -> Option<u32> { self.left.checked_add(self.right) }
    /// Total vertical inset (top + bottom); `None` on overflow.
    pub const fn vsum(&self) -> Option<u32> { self.top.checked_add(self.bottom) }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(64, 24, 24, 56)
    }
}

/// sRGB color. `name` keeps the CSS keyword so SVG output reads like hand-written markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub name: Option<&'static str>,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, name: None }
    }

    pub const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, name: Some(name) }
    }

    pub const STEELBLUE: Color = Color::named("steelblue", 70, 130, 180);
    pub const GREEN: Color = Color::named("green", 0, 128, 0);
    pub const CORAL: Color = Color::named("coral", 255, 127, 80);
    pub const CRIMSON: Color = Color::named("crimson", 220, 20, 60);
    pub const RED: Color = Color::named("red", 255, 0, 0);

    /// CSS representation: the keyword when known, `#rrggbb` otherwise.
    pub fn to_css(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
        }
    }
}
