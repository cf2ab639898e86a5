//! Application shell
//!
//! Owns the tokio runtime, the audio hardware, and the central state;
//! wires settlement channels into the per-frame update.

use crate::audio::{AudioRecorder, ClipPlayer};
use crate::config::ClientConfig;
use crate::speech::SpeechAnnouncer;
use crate::ui::components::{InputBar, RecorderAction, RecorderPanel, ResultDisplay, StatusBar};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::{NovaError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::{Align2, RichText, Vec2};
use tracing::{info, warn};

/// Main application
pub struct NovaApp {
    // Owns the runtime; state and dispatch tasks borrow its handle.
    _runtime: tokio::runtime::Runtime,
    state: AppState,
    theme: Theme,

    recorder: Option<AudioRecorder>,
    player: Option<ClipPlayer>,
    audio_tx: Sender<Vec<f32>>,
    audio_rx: Receiver<Vec<f32>>,
    pending_samples: Vec<f32>,
    capture_rate: u32,
}

impl NovaApp {
    /// Create the application
    pub fn new(cc: &eframe::CreationContext<'_>, config: ClientConfig) -> Result<Self> {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| NovaError::IOError(format!("Failed to start async runtime: {}", e)))?;

        let state = AppState::new(
            &config,
            runtime.handle().clone(),
            Box::new(SpeechAnnouncer::new()),
        );

        let (audio_tx, audio_rx) = unbounded();

        Ok(Self {
            _runtime: runtime,
            state,
            theme,
            recorder: None,
            player: None,
            audio_tx,
            audio_rx,
            pending_samples: Vec::new(),
            capture_rate: 0,
        })
    }

    fn start_recording(&mut self) {
        if self.recorder.is_none() {
            match AudioRecorder::new() {
                Ok(recorder) => self.recorder = Some(recorder),
                Err(e) => {
                    self.state.recording_failed(e.to_string());
                    return;
                }
            }
        }

        let recorder = self.recorder.as_mut().unwrap();
        self.pending_samples.clear();
        self.capture_rate = recorder.sample_rate();

        if let Err(e) = recorder.start(self.audio_tx.clone()) {
            self.state.recording_failed(e.to_string());
            return;
        }
        self.state.begin_recording();
    }

    fn stop_recording(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.stop();
        }
        self.drain_audio();
        let samples = std::mem::take(&mut self.pending_samples);
        self.state.finish_recording(samples, self.capture_rate);
    }

    fn play_clip(&mut self) {
        let Some(clip) = self.state.clip.clone() else {
            return;
        };

        if self.player.is_none() {
            match ClipPlayer::new() {
                Ok(player) => self.player = Some(player),
                Err(e) => {
                    warn!("Playback unavailable: {}", e);
                    self.state.last_error = Some(e.to_string());
                    return;
                }
            }
        }

        if let Err(e) = self.player.as_mut().unwrap().play(&clip) {
            warn!("Playback failed: {}", e);
            self.state.last_error = Some(e.to_string());
        }
    }

    /// Pull captured samples out of the device callback channel
    fn drain_audio(&mut self) {
        while let Ok(chunk) = self.audio_rx.try_recv() {
            self.pending_samples.extend_from_slice(&chunk);
        }
    }

    fn open_pending_url(&mut self) {
        if let Some(url) = self.state.pending_open_url.take() {
            match webbrowser::open(&url) {
                Ok(()) => info!("Opened {}", url),
                Err(e) => warn!("Failed to open {}: {}", url, e),
            }
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alert.clone() else {
            return;
        };

        egui::Window::new("Nova Desk")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.add_space(self.theme.spacing_sm);
                ui.label(RichText::new(message).size(15.0));
                ui.add_space(self.theme.spacing);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        self.state.alert = None;
                    }
                });
            });
    }
}

impl eframe::App for NovaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();
        self.drain_audio();
        self.open_pending_url();

        let alert_open = self.state.alert.is_some();
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!alert_open, |ui| {
                ui.add_space(self.theme.spacing_sm);
                ui.heading(RichText::new("Nova Desk").color(self.theme.primary));
                StatusBar::new(&self.state, &self.theme).show(ui);
                ui.add_space(self.theme.spacing);

                ResultDisplay::new(&mut self.state, &self.theme).show(ui);
                ui.add_space(self.theme.spacing);

                InputBar::new(&mut self.state, &self.theme).show(ui);
                ui.add_space(self.theme.spacing);

                action = RecorderPanel::new(&mut self.state, &self.theme).show(ui);
            });
        });

        match action {
            Some(RecorderAction::StartRecording) => self.start_recording(),
            Some(RecorderAction::StopRecording) => self.stop_recording(),
            Some(RecorderAction::Play) => self.play_clip(),
            None => {}
        }

        self.show_alert(ctx);

        // Settlement events arrive off-frame
        if self.state.is_busy() || self.recorder.as_ref().is_some_and(|r| r.is_recording()) {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        }
    }
}
