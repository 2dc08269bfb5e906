//! Human-facing message channel

use super::colors::{to_text_color, ColorTheme};
use colored::Colorize;

/// Prints prefixed, single-line messages. Informational output goes to
/// stdout, warnings and errors to stderr.
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    theme: ColorTheme,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: impl AsRef<str>) {
        println!("{}", self.format("I:", self.theme.info, message.as_ref()));
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        eprintln!("{}", self.format("W:", self.theme.warning, message.as_ref()));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        eprintln!("{}", self.format("E:", self.theme.error, message.as_ref()));
    }

    fn format(&self, prefix: &str, color: comfy_table::Color, message: &str) -> String {
        format!("{} {}", prefix.color(to_text_color(color)), message)
    }
}
