//! Status icons for CLI output

use super::colors::StatePhase;

pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";
    pub const PENDING: &'static str = "⏳";
    pub const ERROR: &'static str = "✗";
    pub const UNKNOWN: &'static str = "?";

    /// Private API endpoint
    pub const LOCKED: &'static str = "🔒";

    /// Public API endpoint
    pub const OPEN: &'static str = "🌐";

    pub fn get_state_icon(state: Option<&str>) -> &'static str {
        match StatePhase::of(state) {
            StatePhase::Ready => Self::SUCCESS,
            StatePhase::Transitional => Self::PENDING,
            StatePhase::Failed => Self::ERROR,
            StatePhase::Unknown => Self::UNKNOWN,
        }
    }

    pub fn get_listening_icon(private: bool) -> &'static str {
        if private {
            Self::LOCKED
        } else {
            Self::OPEN
        }
    }
}
