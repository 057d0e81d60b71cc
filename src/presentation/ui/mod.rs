pub mod countdown;
pub mod display;
pub mod report;

pub use countdown::WarningCountdown;
pub use display::{auto_display, color_enabled, DisplayHelper};
pub use report::ReportRenderer;
