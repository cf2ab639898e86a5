//! Application state management
//!
//! This module provides the central state for the Nova Desk UI. All shared
//! mutable state lives here and is only touched from the UI thread; backend
//! work settles through channels drained once per frame by `poll_events`.

use crate::api::{AssistantClient, UploadResponse};
use crate::audio::{encode_wav, RecordedClip};
use crate::config::ClientConfig;
use crate::dispatch::{
    CommandPayload, DispatchEvent, DispatchOutcome, Dispatcher, SendState, FAILURE_MESSAGE,
    STOPPED_MESSAGE,
};
use crate::speech::Announcer;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Fixed introduction rendered and spoken without contacting the backend.
pub const INTRO_TEXT: &str = "Hello, I'm Nova Desk, your next-generation AI companion \
and virtual assistant. How can I help you today?";

/// Manual input that triggers the local introduction (matched after
/// trimming and lowercasing).
const INTRO_TRIGGER: &str = "who are you?";

/// Interaction status lines
pub const STATUS_LISTENING: &str = "Speak now...";
pub const STATUS_PROCESSING: &str = "Processing command...";
pub const STATUS_RECORDING: &str = "Recording started...";
pub const STATUS_RECORDED: &str = "Recording stopped. You can now upload.";
pub const STATUS_MIC_ERROR: &str = "Error accessing microphone.";

/// Message shown when an upload cannot reach the backend.
pub const UPLOAD_FAILURE_MESSAGE: &str = "Error uploading audio.";

/// Confirmation shown after the result is copied to the clipboard.
pub const COPY_CONFIRMATION: &str = "Response copied to clipboard!";

/// How long the result text takes to fade back in after a change.
const RESULT_FADE: Duration = Duration::from_millis(150);

/// The assistant result display, with a fade-in transition on change
#[derive(Debug, Default)]
pub struct ResultPane {
    text: String,
    changed_at: Option<Instant>,
}

impl ResultPane {
    /// Replace the displayed text and restart the fade
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.changed_at = Some(Instant::now());
    }

    /// Clear the display without a fade
    pub fn clear(&mut self) {
        self.text.clear();
        self.changed_at = None;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current fade-in opacity in 0.0..=1.0
    pub fn fade_alpha(&self) -> f32 {
        match self.changed_at {
            Some(changed_at) => {
                let t = changed_at.elapsed().as_secs_f32() / RESULT_FADE.as_secs_f32();
                t.clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }

    /// Check if the fade animation is still running
    pub fn is_fading(&self) -> bool {
        self.fade_alpha() < 1.0
    }
}

/// State of the local microphone recorder panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// Nothing recorded yet, or the last clip was discarded
    #[default]
    Idle,
    /// Actively capturing from the microphone
    Recording,
    /// A clip is held for playback or upload
    Recorded,
    /// The clip is being uploaded for transcription
    Uploading,
}

/// Settlement of a recorded-audio upload
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// The backend answered (transcription or application error)
    Completed(UploadResponse),
    /// Transport or decode failure; detail has been logged
    Failed(String),
}

/// Central application state
pub struct AppState {
    /// Current manual command input
    pub input_text: String,

    /// State of the dual-purpose Send/Stop control
    pub send_state: SendState,

    /// Assistant result display
    pub result: ResultPane,

    /// Interaction status line
    pub status_text: String,

    /// Modal alert text, if one is open
    pub alert: Option<String>,

    /// Recorder panel state
    pub recorder_state: RecorderState,

    /// The held recording, if any
    pub clip: Option<RecordedClip>,

    /// URL to open in the system browser, consumed by the app shell
    pub pending_open_url: Option<String>,

    /// Detail of the last failure, for the log/debug display
    pub last_error: Option<String>,

    speak_responses: bool,
    open_links: bool,

    client: AssistantClient,
    runtime: tokio::runtime::Handle,
    dispatcher: Dispatcher,
    dispatch_rx: Receiver<DispatchEvent>,
    upload_tx: Sender<UploadEvent>,
    upload_rx: Receiver<UploadEvent>,
    announcer: Box<dyn Announcer>,
}

impl AppState {
    /// Create the application state
    pub fn new(
        config: &ClientConfig,
        runtime: tokio::runtime::Handle,
        announcer: Box<dyn Announcer>,
    ) -> Self {
        let client = AssistantClient::new(&config.server_url);
        let (dispatch_tx, dispatch_rx) = unbounded();
        let (upload_tx, upload_rx) = unbounded();
        let dispatcher = Dispatcher::new(client.clone(), runtime.clone(), dispatch_tx);

        Self {
            input_text: String::new(),
            send_state: SendState::Idle,
            result: ResultPane::default(),
            status_text: String::new(),
            alert: None,
            recorder_state: RecorderState::Idle,
            clip: None,
            pending_open_url: None,
            last_error: None,
            speak_responses: config.speak_responses,
            open_links: config.open_links,
            client,
            runtime,
            dispatcher,
            dispatch_rx,
            upload_tx,
            upload_rx,
            announcer,
        }
    }

    /// Id of the tracked in-flight request, if any
    pub fn current_request_id(&self) -> Option<u64> {
        self.dispatcher.current_request()
    }

    /// Check if any background work is pending (drives repaint requests)
    pub fn is_busy(&self) -> bool {
        self.send_state.is_pending() || self.recorder_state == RecorderState::Uploading
    }

    /// Single entry point for the send control: cancel when pending,
    /// dispatch the manual input otherwise.
    pub fn toggle_send(&mut self) {
        if self.send_state.is_pending() {
            self.cancel_active();
        } else {
            self.send_manual();
        }
    }

    /// Dispatch the current manual input as a text command.
    ///
    /// Empty or whitespace-only input is a silent no-op. The introduction
    /// question is answered locally without a network call.
    pub fn send_manual(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.status_text = STATUS_PROCESSING.to_string();
        self.result.clear();

        if text.to_lowercase() == INTRO_TRIGGER {
            self.result.set(INTRO_TEXT);
            self.announcer.speak(INTRO_TEXT);
            self.status_text.clear();
            return;
        }

        if let Some(id) = self.dispatcher.dispatch(CommandPayload::Manual(text)) {
            debug!("Dispatched manual command as request {}", id);
            self.send_state = SendState::Pending;
        }
    }

    /// Ask the backend to capture a voice command on its microphone.
    ///
    /// Shares the Send/Stop control with manual dispatches.
    pub fn start_voice(&mut self) {
        self.status_text = STATUS_LISTENING.to_string();
        self.result.clear();

        if let Some(id) = self.dispatcher.dispatch(CommandPayload::Voice) {
            debug!("Dispatched voice command as request {}", id);
            self.send_state = SendState::Pending;
        }
    }

    /// Signal cancellation on the in-flight request. No-op when idle; the
    /// settlement event resets the button state.
    pub fn cancel_active(&mut self) {
        self.dispatcher.cancel();
    }

    /// Stop any in-progress speech
    pub fn stop_speech(&mut self) {
        self.announcer.stop();
    }

    /// Confirm a clipboard copy through the modal alert
    pub fn confirm_copy(&mut self) {
        self.alert = Some(COPY_CONFIRMATION.to_string());
    }

    /// Drain settlement events from backend tasks. Called once per frame.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.dispatch_rx.try_recv() {
            self.handle_dispatch_event(event);
        }

        while let Ok(event) = self.upload_rx.try_recv() {
            self.handle_upload_event(event);
        }
    }

    fn handle_dispatch_event(&mut self, event: DispatchEvent) {
        // Superseded requests must not touch shared state.
        if !self.dispatcher.settle(event.request_id) {
            return;
        }

        self.send_state = SendState::Idle;
        self.status_text.clear();

        match event.outcome {
            DispatchOutcome::Success(response) => {
                info!("Request {} succeeded", event.request_id);
                if self.speak_responses {
                    self.announcer.speak(&response.result);
                }
                self.result.set(response.result);
                if self.open_links {
                    self.pending_open_url = response.open_url;
                }
            }
            DispatchOutcome::Canceled => {
                info!("Request {} canceled", event.request_id);
                self.result.set(STOPPED_MESSAGE);
            }
            DispatchOutcome::Failed(detail) => {
                self.result.set(FAILURE_MESSAGE);
                self.last_error = Some(detail);
            }
        }
    }

    fn handle_upload_event(&mut self, event: UploadEvent) {
        self.recorder_state = if self.clip.is_some() {
            RecorderState::Recorded
        } else {
            RecorderState::Idle
        };

        match event {
            UploadEvent::Completed(response) => {
                if let Some(text) = response.text {
                    if self.speak_responses {
                        self.announcer.speak(&text);
                    }
                    self.alert = Some(format!("Audio processed: {}", text));
                    self.result.set(text);
                } else if let Some(error) = response.error {
                    self.alert = Some(format!("Error: {}", error));
                    self.result.set(error);
                } else {
                    debug!("Upload response carried neither text nor error");
                }
            }
            UploadEvent::Failed(detail) => {
                self.result.set(UPLOAD_FAILURE_MESSAGE);
                self.alert = Some(UPLOAD_FAILURE_MESSAGE.to_string());
                self.last_error = Some(detail);
            }
        }
    }

    // === Recorder panel transitions (the device itself lives in the app shell) ===

    /// A new capture has started; any held clip is discarded.
    pub fn begin_recording(&mut self) {
        self.clip = None;
        self.recorder_state = RecorderState::Recording;
        self.status_text = STATUS_RECORDING.to_string();
    }

    /// Microphone access failed. Reported on the status line only.
    pub fn recording_failed(&mut self, detail: String) {
        error!("Microphone access failed: {}", detail);
        self.recorder_state = RecorderState::Idle;
        self.status_text = STATUS_MIC_ERROR.to_string();
        self.last_error = Some(detail);
    }

    /// Capture finished; hold the clip for playback and upload.
    pub fn finish_recording(&mut self, samples: Vec<f32>, sample_rate: u32) {
        info!("Recorded clip: {} samples at {} Hz", samples.len(), sample_rate);
        self.clip = Some(RecordedClip {
            samples,
            sample_rate,
        });
        self.recorder_state = RecorderState::Recorded;
        self.status_text = STATUS_RECORDED.to_string();
    }

    /// Upload the held clip for server-side transcription.
    pub fn upload_recording(&mut self) {
        let clip = match &self.clip {
            Some(clip) if !clip.is_empty() => clip.clone(),
            _ => {
                self.alert = Some("No recorded audio found. Please record first.".to_string());
                return;
            }
        };

        let wav_bytes = match encode_wav(&clip.samples, clip.sample_rate) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to encode clip: {}", e);
                self.result.set(UPLOAD_FAILURE_MESSAGE);
                self.last_error = Some(e.to_string());
                return;
            }
        };

        self.recorder_state = RecorderState::Uploading;
        let client = self.client.clone();
        let upload_tx = self.upload_tx.clone();
        self.runtime.spawn(async move {
            let event = match client.upload(wav_bytes).await {
                Ok(response) => UploadEvent::Completed(response),
                Err(e) => {
                    error!("Upload failed: {}", e);
                    UploadEvent::Failed(e.to_string())
                }
            };
            let _ = upload_tx.send(event);
        });
    }
}
