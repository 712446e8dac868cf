//! Plot colors.

use crate::render::Color;

/// Visual theme for plots and their overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Window background.
    pub background: Color,
    /// Axis lines, ticks and labels.
    pub axis: Color,
    /// Grid lines of the primary axes.
    pub grid: Color,
    /// Color of anything selected.
    pub selection: Color,
    /// Legend border.
    pub legend_border: Color,
    /// General text (title, legend items).
    pub text: Color,
    /// Popup menus, prompt dialog and status bar background.
    pub overlay: Color,
    /// Popup border and hovered menu entries.
    pub overlay_accent: Color,
}

impl Theme {
    /// Dark text on white.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            axis: Color::BLACK,
            grid: Color::rgb8(200, 200, 200),
            selection: Color::BLUE,
            legend_border: Color::BLACK,
            text: Color::BLACK,
            overlay: Color::rgb8(245, 245, 245),
            overlay_accent: Color::rgb8(180, 200, 235),
        }
    }

    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb8(30, 30, 34),
            axis: Color::rgb8(210, 210, 215),
            grid: Color::rgb8(70, 70, 78),
            selection: Color::rgb8(90, 150, 255),
            legend_border: Color::rgb8(150, 150, 160),
            text: Color::rgb8(230, 230, 235),
            overlay: Color::rgb8(48, 48, 54),
            overlay_accent: Color::rgb8(70, 95, 140),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
