//! Color theme for the TUI
//!
//! Colors can be configured via a `tui_colors.toml` file in the current working directory.
//! Keys that are missing or malformed keep their default color.
//!
//! Example `tui_colors.toml`:
//! ```toml
//! light_square = 200, 180, 150
//! dark_square = 120, 90, 60
//! drop_target = 110, 150, 90
//! annotation = [200, 70, 60]
//! ```

use std::fs;
use std::path::Path;

use ratatui::style::{Color, Modifier, Style};
use rustc_hash::FxHashMap;

use crate::board::color::Color as PieceColor;
use crate::interaction::Decoration;

pub const THEME_FILE: &str = "tui_colors.toml";

/// Color theme for the board TUI
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub light_square: Color,
    pub dark_square: Color,
    pub piece_white: Color,
    pub piece_black: Color,
    pub hovered: Color,
    pub drop_target: Color,
    pub annotation: Color,
    pub selected: Color,
    pub last_move: Color,
    pub promotion: Color,
    pub border: Color,
    pub text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            light_square: Color::Rgb(200, 180, 150),
            dark_square: Color::Rgb(120, 90, 60),
            piece_white: Color::Rgb(255, 255, 255),
            piece_black: Color::Rgb(30, 30, 30),
            hovered: Color::Rgb(150, 150, 190),
            drop_target: Color::Rgb(110, 150, 90),
            annotation: Color::Rgb(200, 70, 60),
            selected: Color::Rgb(210, 190, 70),
            last_move: Color::Rgb(170, 160, 90),
            promotion: Color::Rgb(90, 130, 200),
            border: Color::Gray,
            text: Color::White,
        }
    }
}

impl Theme {
    /// The theme from `tui_colors.toml` in the working directory, or the
    /// defaults if there is no such file.
    pub fn load() -> Self {
        Self::from_config_file(Path::new(THEME_FILE)).unwrap_or_default()
    }

    fn from_config_file(path: &Path) -> Option<Self> {
        let contents = fs::read_to_string(path).ok()?;
        Some(Self::from_config_str(&contents))
    }

    /// Parses `key = r, g, b` lines over the defaults.
    pub fn from_config_str(contents: &str) -> Self {
        let colors = parse_colors(contents);
        let defaults = Self::default();
        let pick = |key: &str, default: Color| colors.get(key).copied().unwrap_or(default);

        Self {
            light_square: pick("light_square", defaults.light_square),
            dark_square: pick("dark_square", defaults.dark_square),
            piece_white: pick("piece_white", defaults.piece_white),
            piece_black: pick("piece_black", defaults.piece_black),
            hovered: pick("hovered", defaults.hovered),
            drop_target: pick("drop_target", defaults.drop_target),
            annotation: pick("annotation", defaults.annotation),
            selected: pick("selected", defaults.selected),
            last_move: pick("last_move", defaults.last_move),
            promotion: pick("promotion", defaults.promotion),
            border: pick("border", defaults.border),
            text: pick("text", defaults.text),
        }
    }

    /// Style for one square: the decoration, if any, replaces the square's
    /// background.
    pub fn square_style(
        &self,
        is_light_square: bool,
        piece_color: Option<PieceColor>,
        decoration: Option<Decoration>,
    ) -> Style {
        let square_bg = match decoration {
            Some(decoration) => self.decoration_color(decoration),
            None if is_light_square => self.light_square,
            None => self.dark_square,
        };
        let style = Style::default().bg(square_bg);

        match piece_color {
            Some(PieceColor::White) => style.fg(self.piece_white).add_modifier(Modifier::BOLD),
            Some(PieceColor::Black) => style.fg(self.piece_black).add_modifier(Modifier::BOLD),
            None => style,
        }
    }

    pub fn decoration_color(&self, decoration: Decoration) -> Color {
        match decoration {
            Decoration::PromotionPrompt => self.promotion,
            Decoration::DropTarget => self.drop_target,
            Decoration::Hovered => self.hovered,
            Decoration::Annotated => self.annotation,
            Decoration::Selected => self.selected,
            Decoration::LastMove => self.last_move,
        }
    }

    /// Get style for text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Get style for borders
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn annotation_style(&self) -> Style {
        Style::default().fg(self.annotation).add_modifier(Modifier::BOLD)
    }

    pub fn promotion_style(&self) -> Style {
        Style::default()
            .fg(self.text)
            .bg(self.promotion)
            .add_modifier(Modifier::BOLD)
    }
}

fn parse_colors(contents: &str) -> FxHashMap<String, Color> {
    let mut colors = FxHashMap::default();

    for line in contents.lines() {
        // Drop trailing comments
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        // Parse "key = r, g, b" or "key = [r, g, b]"
        if let Some((key, value)) = line.split_once('=') {
            let rgb_str = value.trim().trim_start_matches('[').trim_end_matches(']');
            let rgb_parts: Vec<&str> = rgb_str.split(',').map(|s| s.trim()).collect();
            if rgb_parts.len() == 3 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    rgb_parts[0].parse::<u8>(),
                    rgb_parts[1].parse::<u8>(),
                    rgb_parts[2].parse::<u8>(),
                ) {
                    colors.insert(key.trim().to_string(), Color::Rgb(r, g, b));
                }
            }
        }
    }

    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_overrides_only_listed_keys() {
        let theme = Theme::from_config_str(
            "# board\nlight_square = 1, 2, 3\ndrop_target = [4, 5, 6]  # green-ish\n",
        );
        assert_eq!(Color::Rgb(1, 2, 3), theme.light_square);
        assert_eq!(Color::Rgb(4, 5, 6), theme.drop_target);
        assert_eq!(Theme::default().dark_square, theme.dark_square);
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let theme = Theme::from_config_str("hovered = 1, 2\nselected = 300, 0, 0\nnonsense\n");
        assert_eq!(Theme::default(), theme);
    }

    #[test]
    fn test_decoration_replaces_background() {
        let theme = Theme::default();
        let style = theme.square_style(true, None, Some(Decoration::DropTarget));
        assert_eq!(Some(theme.drop_target), style.bg);
        let plain = theme.square_style(false, Some(PieceColor::Black), None);
        assert_eq!(Some(theme.dark_square), plain.bg);
        assert_eq!(Some(theme.piece_black), plain.fg);
    }
}
