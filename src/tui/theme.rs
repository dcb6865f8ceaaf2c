use ratatui::style::Color;

use crate::model::UiConfig;
use crate::model::idea::{Category, Priority, Status};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub purple: Color,
    pub blue: Color,
    pub selection_bg: Color,
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
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            purple: Color::Rgb(0xCC, 0x66, 0xFF),
            blue: Color::Rgb(0x44, 0x88, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
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
    /// Create a theme from board UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                eprintln!("warning: ignoring color {} = {:?} (expected #RRGGBB)", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "purple" => theme.purple = color,
                "blue" => theme.blue = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }

        theme
    }

    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Training => self.blue,
            Category::Race => self.highlight,
            Category::Gear => self.cyan,
            Category::Tips => self.green,
            Category::Vlog => self.purple,
            Category::Other => self.text,
        }
    }

    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.red,
            Priority::Medium => self.yellow,
            Priority::Low => self.dim,
        }
    }

    pub fn status_color(&self, status: Status) -> Color {
        match status {
            Status::Idea => self.text,
            Status::Scripting | Status::Filming | Status::Editing => self.highlight,
            Status::Scheduled => self.cyan,
            Status::Published => self.green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None);
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn config_overrides_known_slots() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "#010203".to_string());
        colors.insert("nonsense".to_string(), "#FFFFFF".to_string());
        let theme = Theme::from_config(&UiConfig { colors });
        assert_eq!(theme.highlight, Color::Rgb(1, 2, 3));
        assert_eq!(theme.category_color(Category::Race), Color::Rgb(1, 2, 3));
        assert_eq!(theme.text, Theme::default().text);
    }
}
