//! Input bar component
//!
//! Provides the voice trigger, manual text input, and the dual-purpose
//! Send/Stop control.

use crate::dispatch::SendState;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

/// Input bar for voice and manual commands
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_voice_button(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_mute_button(ui);
                });
            });
    }

    fn show_voice_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(
            RichText::new("🎤")
                .size(20.0)
                .color(self.theme.text_secondary),
        )
        .min_size(Vec2::splat(44.0))
        .rounding(self.theme.button_rounding);

        let response = ui.add(button);
        if response.clicked() {
            self.state.start_voice();
        }
        response.on_hover_text("Ask by voice");
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        // Reserve room for the send and mute buttons
        let available_width = ui.available_width() - 120.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Type a command...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0))
            .id(egui::Id::new("command_input"));

        let response = ui.add(text_edit);

        if response.has_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.state.toggle_send();
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let pending = self.state.send_state == SendState::Pending;
        let has_text = !self.state.input_text.trim().is_empty();

        let fill = if pending {
            self.theme.error
        } else if has_text {
            self.theme.primary
        } else {
            self.theme.bg_tertiary
        };

        let button = egui::Button::new(
            RichText::new(self.state.send_state.label())
                .color(self.theme.text_primary),
        )
        .min_size(Vec2::new(64.0, 44.0))
        .rounding(self.theme.button_rounding)
        .fill(fill);

        // The Stop side must stay clickable even with empty input
        let response = ui.add_enabled(pending || has_text, button);
        if response.clicked() {
            self.state.toggle_send();
        }
        response.on_hover_text(if pending {
            "Stop the pending request"
        } else {
            "Send command (Enter)"
        });
    }

    fn show_mute_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(
            RichText::new("🔇")
                .size(18.0)
                .color(self.theme.text_secondary),
        )
        .min_size(Vec2::splat(44.0))
        .rounding(self.theme.button_rounding);

        let response = ui.add(button);
        if response.clicked() {
            self.state.stop_speech();
        }
        response.on_hover_text("Stop speaking");
    }
}
