//! HTTP client for the Nova assistant backend
//!
//! The backend owns all assistant logic; this module only speaks its wire
//! format: JSON commands to `/listen` and `/command`, and a multipart WAV
//! upload to `/upload`.
//!
//! No request timeout is configured. A hung request stays in flight until the
//! caller cancels it through the dispatch layer.

use crate::Result;
use serde::Deserialize;
use tracing::debug;

/// Multipart field name the backend expects for uploaded audio.
pub const UPLOAD_FIELD: &str = "file";

/// File name the backend expects for uploaded audio.
pub const UPLOAD_FILE_NAME: &str = "recorded_audio.wav";

/// Response to `/listen` and `/command` requests
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandResponse {
    /// The assistant's textual result
    pub result: String,

    /// Echo of the command that was processed, if the backend reports it
    #[serde(default)]
    pub command: Option<String>,

    /// URL the client should open on the user's behalf
    #[serde(default)]
    pub open_url: Option<String>,
}

/// Response to an `/upload` request
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,

    /// Recognized text when transcription succeeded
    #[serde(default)]
    pub text: Option<String>,

    /// Application-level error reported by the backend
    #[serde(default)]
    pub error: Option<String>,
}

/// Client for the assistant backend
#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    base_url: String,
}

impl AssistantClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ask the backend to capture and process a voice command.
    pub async fn listen(&self) -> Result<CommandResponse> {
        debug!("POST /listen");
        let response = self
            .http
            .post(self.endpoint("/listen"))
            .json(&serde_json::json!({}))
            .send()
            .await?
            .json::<CommandResponse>()
            .await?;
        Ok(response)
    }

    /// Submit a manual text command.
    pub async fn command(&self, command: &str) -> Result<CommandResponse> {
        debug!("POST /command ({} chars)", command.len());
        let response = self
            .http
            .post(self.endpoint("/command"))
            .json(&serde_json::json!({ "command": command }))
            .send()
            .await?
            .json::<CommandResponse>()
            .await?;
        Ok(response)
    }

    /// Upload a recorded WAV clip for server-side transcription.
    pub async fn upload(&self, wav_bytes: Vec<u8>) -> Result<UploadResponse> {
        debug!("POST /upload ({} bytes)", wav_bytes.len());
        let part = reqwest::multipart::Part::bytes(wav_bytes)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .http
            .post(self.endpoint("/upload"))
            .multipart(form)
            .send()
            .await?
            .json::<UploadResponse>()
            .await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = AssistantClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.endpoint("/command"), "http://localhost:5000/command");
    }

    #[test]
    fn test_command_response_minimal() {
        let response: CommandResponse = serde_json::from_str(r#"{"result": "hi"}"#).unwrap();
        assert_eq!(response.result, "hi");
        assert_eq!(response.command, None);
        assert_eq!(response.open_url, None);
    }

    #[test]
    fn test_command_response_with_url() {
        let response: CommandResponse =
            serde_json::from_str(r#"{"result": "Opening website: x", "open_url": "https://x"}"#)
                .unwrap();
        assert_eq!(response.open_url.as_deref(), Some("https://x"));
    }

    #[test]
    fn test_upload_response_variants() {
        let ok: UploadResponse =
            serde_json::from_str(r#"{"message": "Success", "text": "hello world"}"#).unwrap();
        assert_eq!(ok.text.as_deref(), Some("hello world"));
        assert_eq!(ok.error, None);

        let err: UploadResponse =
            serde_json::from_str(r#"{"error": "Could not understand audio"}"#).unwrap();
        assert_eq!(err.error.as_deref(), Some("Could not understand audio"));
        assert_eq!(err.text, None);
    }
}
