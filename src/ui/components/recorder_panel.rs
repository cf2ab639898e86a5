//! Recorder panel component
//!
//! Controls for capturing a local clip, playing it back, and sending it
//! for transcription. Device work happens in the app shell, so button
//! presses that need the hardware are returned as actions.

use crate::ui::state::{AppState, RecorderState};
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

/// Hardware-touching request raised by the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderAction {
    StartRecording,
    StopRecording,
    Play,
}

/// Local recording controls
pub struct RecorderPanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> RecorderPanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<RecorderAction> {
        let mut action = None;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.label(
                    RichText::new("Voice note")
                        .color(self.theme.text_secondary)
                        .small(),
                );
                ui.add_space(self.theme.spacing_sm);

                ui.horizontal(|ui| {
                    let recording = self.state.recorder_state == RecorderState::Recording;
                    let uploading = self.state.recorder_state == RecorderState::Uploading;
                    let has_clip = self
                        .state
                        .clip
                        .as_ref()
                        .map(|clip| !clip.is_empty())
                        .unwrap_or(false);

                    let record_label = if recording {
                        "⏹ Stop"
                    } else {
                        "⏺ Record"
                    };
                    let record_button = egui::Button::new(
                        RichText::new(record_label).color(self.theme.text_primary),
                    )
                    .min_size(Vec2::new(90.0, 36.0))
                    .rounding(self.theme.button_rounding)
                    .fill(if recording {
                        self.theme.recording.gamma_multiply(0.4)
                    } else {
                        self.theme.bg_tertiary
                    });

                    if ui.add_enabled(!uploading, record_button).clicked() {
                        action = Some(if recording {
                            RecorderAction::StopRecording
                        } else {
                            RecorderAction::StartRecording
                        });
                    }

                    let play_button =
                        egui::Button::new(RichText::new("▶ Play").color(self.theme.text_primary))
                            .min_size(Vec2::new(80.0, 36.0))
                            .rounding(self.theme.button_rounding)
                            .fill(self.theme.bg_tertiary);
                    if ui
                        .add_enabled(has_clip && !recording && !uploading, play_button)
                        .clicked()
                    {
                        action = Some(RecorderAction::Play);
                    }

                    let upload_label = if uploading {
                        "Uploading..."
                    } else {
                        "⬆ Upload"
                    };
                    let upload_button = egui::Button::new(
                        RichText::new(upload_label).color(self.theme.text_primary),
                    )
                    .min_size(Vec2::new(100.0, 36.0))
                    .rounding(self.theme.button_rounding)
                    .fill(if has_clip && !uploading {
                        self.theme.primary
                    } else {
                        self.theme.bg_tertiary
                    });
                    // Kept clickable without a clip so the missing-clip
                    // alert can fire, matching the rest of the flow.
                    if ui.add_enabled(!recording && !uploading, upload_button).clicked() {
                        self.state.upload_recording();
                    }

                    if let Some(clip) = &self.state.clip {
                        ui.add_space(self.theme.spacing_sm);
                        ui.label(
                            RichText::new(format!("{:.1}s", clip.duration_secs()))
                                .color(self.theme.text_muted)
                                .small(),
                        );
                    }
                });
            });

        action
    }
}
