//! Status bar component
//!
//! Shows the interaction status line and a pulsing dot while the
//! microphone is capturing.

use crate::ui::state::{AppState, RecorderState};
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Status line below the heading
pub struct StatusBar<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.state.recorder_state == RecorderState::Recording {
                let t = ui.ctx().input(|i| i.time);
                let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;
                let (rect, _) =
                    ui.allocate_exact_size(egui::Vec2::splat(10.0), egui::Sense::hover());
                ui.painter().circle_filled(
                    rect.center(),
                    4.0,
                    self.theme.recording.gamma_multiply(0.4 + pulse * 0.6),
                );
                ui.ctx().request_repaint();
            }

            let status = if self.state.status_text.is_empty() {
                "Ready"
            } else {
                &self.state.status_text
            };
            ui.label(RichText::new(status).color(self.theme.text_muted).italics());
        });
    }
}
