//! Display module for formatted CLI output

pub mod colors;
pub mod icons;
pub mod reporter;
pub mod table;

pub use colors::{ColorTheme, StatePhase};
pub use icons::StatusIcon;
pub use reporter::Reporter;
pub use table::TableRenderer;
