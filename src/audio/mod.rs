//! Microphone capture, WAV packaging, and clip playback

mod player;
mod recorder;
mod wav;

pub use player::ClipPlayer;
pub use recorder::AudioRecorder;
pub use wav::encode_wav;

/// A finished microphone recording, kept in memory for playback and upload.
#[derive(Debug, Clone)]
pub struct RecordedClip {
    /// Mono samples in the -1.0..=1.0 range
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl RecordedClip {
    /// Duration of the clip in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Check if the clip contains no audio
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
