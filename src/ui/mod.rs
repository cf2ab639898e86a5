//! Nova Desk user interface

mod app;
mod components;
mod state;
mod theme;

pub use app::NovaApp;
pub use state::AppState;
pub use theme::Theme;

use crate::config::ClientConfig;

/// Launch the desktop UI
pub fn run(config: ClientConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Nova Desk")
            .with_inner_size([540.0, 680.0])
            .with_min_inner_size([440.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Nova Desk",
        options,
        Box::new(move |cc| match NovaApp::new(cc, config) {
            Ok(app) => Ok(Box::new(app) as Box<dyn eframe::App>),
            Err(e) => Err(Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        }),
    )
}
