//! Colour palettes.

use ratatui::style::Color;

/// Colours used by every pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub online: Color,
    pub away: Color,
    pub offline: Color,
    pub error: Color,
    pub accent: Color,
}

const PRIMARY: Color = Color::Rgb(0x0A, 0x84, 0xFF);
const SUCCESS: Color = Color::Rgb(0x34, 0xC7, 0x59);
const WARNING: Color = Color::Rgb(0xFF, 0x95, 0x00);
const ERROR: Color = Color::Rgb(0xFF, 0x3B, 0x30);
const GRAY: Color = Color::Rgb(0x8E, 0x8E, 0x93);

impl Palette {
    pub fn dark() -> Self {
        Self {
            primary: PRIMARY,
            background: Color::Rgb(0x00, 0x00, 0x00),
            card: Color::Rgb(0x1C, 0x1C, 0x1E),
            text: Color::Rgb(0xFF, 0xFF, 0xFF),
            text_secondary: GRAY,
            border: Color::Rgb(0x2C, 0x2C, 0x2E),
            online: SUCCESS,
            away: WARNING,
            offline: GRAY,
            error: ERROR,
            accent: SUCCESS,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xF2, 0xF2, 0xF7),
            card: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x00, 0x00, 0x00),
            border: Color::Rgb(0xD8, 0xD8, 0xDC),
            ..Self::dark()
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
