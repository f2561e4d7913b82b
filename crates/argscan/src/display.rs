//! Presentation settings carried by a [`Registry`](crate::Registry).
//!
//! Nothing in this crate reads these values; they exist so that a help
//! renderer living outside the parser can format a registry consistently.

use serde::{Deserialize, Serialize};

/// Foreground terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// One color per piece of rendered help text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Palette {
    pub title: Color,
    pub description: Color,
    pub header: Color,
    pub command: Color,
    pub command_description: Color,
    pub flag: Color,
    pub flag_description: Color,
    pub option: Color,
    pub option_description: Color,
    pub option_allowed: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: Color::Green,
            description: Color::White,
            header: Color::Red,
            command: Color::Magenta,
            command_description: Color::White,
            flag: Color::Blue,
            flag_description: Color::White,
            option: Color::Blue,
            option_description: Color::White,
            option_allowed: Color::Yellow,
        }
    }
}

/// Section headers, color toggle and palette.
///
/// An empty header means the renderer should omit the header line but still
/// list the section's entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayOptions {
    pub commands_header: String,
    pub flags_header: String,
    pub options_header: String,
    pub colors: bool,
    pub palette: Palette,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            commands_header: "COMMANDS".to_string(),
            flags_header: "FLAGS".to_string(),
            options_header: "OPTIONS".to_string(),
            colors: false,
            palette: Palette::default(),
        }
    }
}
