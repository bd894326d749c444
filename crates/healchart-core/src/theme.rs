// File: crates/healchart-core/src/theme.rs
// Summary: Light/Dark theming for chart chrome and series colors.

use crate::types::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub fixed_point: Color,
    pub revival_point: Color,
    pub chance_point: Color,
    pub chance_line: Color,
    pub timed_point: Color,
    pub timed_line: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::named("white", 255, 255, 255),
            grid: Color::rgb(230, 230, 235),
            axis_line: Color::rgb(60, 60, 70),
            axis_label: Color::rgb(20, 20, 30),
            tick: Color::rgb(100, 100, 110),
            fixed_point: Color::STEELBLUE,
            revival_point: Color::GREEN,
            chance_point: Color::CORAL,
            chance_line: Color::CORAL,
            timed_point: Color::CRIMSON,
            timed_line: Color::RED,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            grid: Color::rgb(40, 40, 45),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            tick: Color::rgb(150, 150, 160),
            fixed_point: Color::rgb(64, 160, 255),
            revival_point: Color::rgb(40, 200, 120),
            chance_point: Color::CORAL,
            chance_line: Color::rgb(255, 160, 122),
            timed_point: Color::rgb(255, 80, 100),
            timed_line: Color::rgb(255, 70, 70),
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: Color::rgb(0xfd, 0xf6, 0xe3), // base3
            grid: Color::rgb(0xee, 0xe8, 0xd5),       // base2
            axis_line: Color::rgb(0x65, 0x7b, 0x83),  // base00
            axis_label: Color::rgb(0x00, 0x2b, 0x36), // base03
            tick: Color::rgb(0x58, 0x6e, 0x75),       // base01
            fixed_point: Color::rgb(0x26, 0x8b, 0xd2), // blue
            revival_point: Color::rgb(0x85, 0x99, 0x00), // green
            chance_point: Color::rgb(0xcb, 0x4b, 0x16), // orange
            chance_line: Color::rgb(0xcb, 0x4b, 0x16),
            timed_point: Color::rgb(0xd3, 0x36, 0x82), // magenta
            timed_line: Color::rgb(0xdc, 0x32, 0x2f),  // red
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark(), Theme::solarized_light()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
