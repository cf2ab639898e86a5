use crate::audio::RecordedClip;
use crate::{NovaError, Result};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::info;

/// Playback for the recorded clip
///
/// Keeps the output stream alive for the lifetime of the player; each
/// `play` replaces whatever was playing before.
pub struct ClipPlayer {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Option<Sink>,
}

impl ClipPlayer {
    /// Create a player on the default output device
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| NovaError::AudioDeviceError(format!("No output device: {}", e)))?;
        Ok(Self {
            _stream: stream,
            handle,
            sink: None,
        })
    }

    /// Play the given clip from the start
    pub fn play(&mut self, clip: &RecordedClip) -> Result<()> {
        if clip.is_empty() {
            return Ok(());
        }

        self.stop();

        let sink = Sink::try_new(&self.handle)
            .map_err(|e| NovaError::AudioDeviceError(format!("Failed to open playback sink: {}", e)))?;
        sink.append(SamplesBuffer::new(1, clip.sample_rate, clip.samples.clone()));
        info!("Playing recorded clip ({:.2}s)", clip.duration_secs());
        self.sink = Some(sink);
        Ok(())
    }

    /// Stop playback
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    /// Check if a clip is currently playing
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|sink| !sink.empty()).unwrap_or(false)
    }
}
