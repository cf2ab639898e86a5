//! Nova Desk — desktop client for the Nova voice/text assistant
//!
//! The assistant itself lives behind an HTTP backend; this crate provides
//! the native UI, request lifecycle coordination, microphone capture, and
//! spoken announcements.

pub mod api;
pub mod audio;
pub mod config;
pub mod dispatch;
pub mod speech;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum NovaError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Audio processing error: {0}")]
    AudioProcessingError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Assistant API error: {0}")]
    ApiError(String),

    #[error("Speech error: {0}")]
    SpeechError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl From<std::io::Error> for NovaError {
    fn from(e: std::io::Error) -> Self {
        NovaError::IOError(e.to_string())
    }
}

impl From<reqwest::Error> for NovaError {
    fn from(e: reqwest::Error) -> Self {
        NovaError::HttpError(e.to_string())
    }
}

impl NovaError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            NovaError::AudioDeviceError(_) => false,
            // Network and backend errors are typically transient
            NovaError::HttpError(_) => true,
            NovaError::ApiError(_) => true,
            // Speech failures degrade to text-only display
            NovaError::SpeechError(_) => true,
            NovaError::AudioProcessingError(_) => true,
            NovaError::IOError(_) => false,
            NovaError::ConfigError(_) => false,
            NovaError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            NovaError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            NovaError::HttpError(_) => {
                "Could not reach the assistant server. Please try again later.".to_string()
            }
            NovaError::ApiError(_) => {
                "The assistant could not process the request. Please try again.".to_string()
            }
            NovaError::SpeechError(_) => {
                "Text-to-speech failed. Response is shown as text.".to_string()
            }
            NovaError::AudioProcessingError(_) => {
                "Audio processing failed. Please try again.".to_string()
            }
            NovaError::IOError(_) => "File system error occurred.".to_string(),
            NovaError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            NovaError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NovaError>;
