use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the form UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub field_bg: Color,
    /// Row tint for completed tasks
    pub done_bg: Color,
    /// Row tint for pending tasks
    pub pending_bg: Color,
    pub add_button: Color,
    pub mark_button: Color,
    pub delete_button: Color,
    pub save_button: Color,
    pub button_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            field_bg: Color::Rgb(0x1A, 0x10, 0x2E),
            done_bg: Color::Rgb(0x12, 0x2B, 0x1A),
            pending_bg: Color::Rgb(0x2E, 0x12, 0x1C),
            add_button: Color::Rgb(0x4C, 0xAF, 0x50),
            mark_button: Color::Rgb(0x21, 0x96, 0xF3),
            delete_button: Color::Rgb(0xF4, 0x43, 0x36),
            save_button: Color::Rgb(0x9C, 0x27, 0xB0),
            button_text: Color::Rgb(0xFF, 0xFF, 0xFF),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults.
    /// Unknown slot names and malformed values are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "green" => theme.green = color,
                "selection_bg" => theme.selection_bg = color,
                "field_bg" => theme.field_bg = color,
                "done_bg" => theme.done_bg = color,
                "pending_bg" => theme.pending_bg = color,
                "add_button" => theme.add_button = color,
                "mark_button" => theme.mark_button = color,
                "delete_button" => theme.delete_button = color,
                "save_button" => theme.save_button = color,
                "button_text" => theme.button_text = color,
                _ => tracing::warn!(slot = %key, "unknown color slot"),
            }
        }

        theme
    }

    /// Row tint for a task's completion state
    pub fn row_bg(&self, completed: bool) -> Color {
        if completed {
            self.done_bg
        } else {
            self.pending_bg
        }
    }

    /// Foreground for the status cell
    pub fn status_color(&self, completed: bool) -> Color {
        if completed { self.green } else { self.red }
    }
}
