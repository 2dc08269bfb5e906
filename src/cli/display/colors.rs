//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Coarse grouping of the lifecycle states reported by the cluster
/// management service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatePhase {
    Ready,
    Transitional,
    Failed,
    Unknown,
}

impl StatePhase {
    pub fn of(state: Option<&str>) -> Self {
        match state {
            Some("ready") => StatePhase::Ready,
            Some("error" | "uninstalling") => StatePhase::Failed,
            Some(
                "pending" | "validating" | "waiting" | "installing" | "hibernating" | "resuming"
                | "powering_down",
            ) => StatePhase::Transitional,
            _ => StatePhase::Unknown,
        }
    }
}

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_state_color(&self, state: Option<&str>) -> TableColor {
        match StatePhase::of(state) {
            StatePhase::Ready => self.success,
            StatePhase::Transitional => self.warning,
            StatePhase::Failed => self.error,
            StatePhase::Unknown => self.muted,
        }
    }

    /// Private endpoints stand out since they cut off public access
    pub fn get_listening_color(&self, private: bool) -> TableColor {
        if private {
            self.warning
        } else {
            self.info
        }
    }
}

/// Same color for text printed outside of tables
pub fn to_text_color(color: TableColor) -> colored::Color {
    match color {
        TableColor::Green => colored::Color::Green,
        TableColor::Yellow => colored::Color::Yellow,
        TableColor::Red => colored::Color::Red,
        TableColor::Cyan => colored::Color::Cyan,
        TableColor::DarkGrey => colored::Color::BrightBlack,
        _ => colored::Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_phase() {
        assert_eq!(StatePhase::of(Some("ready")), StatePhase::Ready);
        assert_eq!(StatePhase::of(Some("hibernating")), StatePhase::Transitional);
        assert_eq!(StatePhase::of(Some("uninstalling")), StatePhase::Failed);
        assert_eq!(StatePhase::of(Some("frobnicating")), StatePhase::Unknown);
        assert_eq!(StatePhase::of(None), StatePhase::Unknown);
    }

    #[test]
    fn test_get_state_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_state_color(Some("ready")), TableColor::Green);
        assert_eq!(theme.get_state_color(Some("installing")), TableColor::Yellow);
        assert_eq!(theme.get_state_color(Some("error")), TableColor::Red);
        assert_eq!(theme.get_state_color(None), TableColor::DarkGrey);
    }

    #[test]
    fn test_listening_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_listening_color(true), TableColor::Yellow);
        assert_eq!(theme.get_listening_color(false), TableColor::Cyan);
    }

    #[test]
    fn test_to_text_color() {
        assert_eq!(to_text_color(TableColor::DarkGrey), colored::Color::BrightBlack);
        assert_eq!(to_text_color(TableColor::Blue), colored::Color::White);
    }
}
