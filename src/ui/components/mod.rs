//! UI components for the Nova Desk interface

mod input_bar;
mod recorder_panel;
mod result_display;
mod status_bar;

pub use input_bar::InputBar;
pub use recorder_panel::{RecorderAction, RecorderPanel};
pub use result_display::ResultDisplay;
pub use status_bar::StatusBar;
