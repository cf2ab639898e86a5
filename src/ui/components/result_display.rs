//! Assistant result display
//!
//! Renders the latest assistant response with a short fade-in when the
//! text changes, plus copy and clear actions.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

/// Result display card
pub struct ResultDisplay<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ResultDisplay<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_min_height(140.0);

                let text = self.state.result.text().to_string();
                if text.is_empty() {
                    ui.label(
                        RichText::new("Responses will appear here.")
                            .color(self.theme.text_muted)
                            .italics(),
                    );
                    return;
                }

                let alpha = self.state.result.fade_alpha();
                let color = self.theme.text_primary.gamma_multiply(alpha);

                egui::ScrollArea::vertical()
                    .max_height(220.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        ui.label(RichText::new(&text).size(16.0).color(color));
                    });

                if self.state.result.is_fading() {
                    ui.ctx().request_repaint();
                }

                ui.add_space(self.theme.spacing_sm);
                ui.horizontal(|ui| {
                    if ui.button("📋 Copy").clicked() {
                        ui.ctx().copy_text(text);
                        self.state.confirm_copy();
                    }
                    if ui.button("Clear").clicked() {
                        self.state.result.clear();
                    }
                });
            });
    }
}
