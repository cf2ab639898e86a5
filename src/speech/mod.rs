//! Spoken announcements through the platform speech engine
//!
//! Successful assistant responses are read aloud; canceled and failed
//! requests are not. When no speech engine is available the announcer
//! degrades to a logged no-op so the rest of the client keeps working.

use tracing::{debug, warn};

/// Seam for announcing response text aloud
pub trait Announcer {
    /// Speak the given text, interrupting any current utterance.
    fn speak(&mut self, text: &str);

    /// Stop any in-progress speech.
    fn stop(&mut self);
}

/// Platform TTS announcer
pub struct SpeechAnnouncer {
    tts: Option<tts::Tts>,
}

impl SpeechAnnouncer {
    pub fn new() -> Self {
        let tts = match tts::Tts::default() {
            Ok(engine) => {
                debug!("Speech engine initialized");
                Some(engine)
            }
            Err(err) => {
                warn!("No speech engine available: {}", err);
                None
            }
        };
        Self { tts }
    }

    /// Check if a speech engine was found
    pub fn is_available(&self) -> bool {
        self.tts.is_some()
    }
}

impl Default for SpeechAnnouncer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer for SpeechAnnouncer {
    fn speak(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(tts) = &mut self.tts {
            debug!("Speaking {} chars", text.len());
            let interrupt = true;
            if let Err(err) = tts.speak(text, interrupt) {
                warn!("Failed to speak response: {}", err);
            }
        }
    }

    fn stop(&mut self) {
        if let Some(tts) = &mut self.tts {
            if let Err(err) = tts.stop() {
                warn!("Failed to stop speech: {}", err);
            }
        }
    }
}

/// Record of speech invocations, shared with tests through `Rc`
#[cfg(test)]
#[derive(Default)]
pub struct SpeechLog {
    pub spoken: Vec<String>,
    pub stops: usize,
}

/// Announcer that records invocations, for tests
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingAnnouncer {
    pub log: std::rc::Rc<std::cell::RefCell<SpeechLog>>,
}

#[cfg(test)]
impl Announcer for RecordingAnnouncer {
    fn speak(&mut self, text: &str) {
        if !text.is_empty() {
            self.log.borrow_mut().spoken.push(text.to_string());
        }
    }

    fn stop(&mut self) {
        self.log.borrow_mut().stops += 1;
    }
}
