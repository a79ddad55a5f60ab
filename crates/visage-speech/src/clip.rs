//! Speech clip decoding - from backend JSON to a playable clip
//!
//! The backend answers a synthesis request with one JSON document:
//! base64 audio, clip metadata, and the timed viseme list. This module
//! owns the DTOs for that shape and the conversion into domain types.
//! All decode failures surface as [`VisageError::Clip`] so callers see a
//! single error path for a malformed backend response.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use visage_core::{MediaTime, VisageError, VisageResult, VisemeEvent, VisemeId};
use visage_timeline::VisemeTrack;

/// Audio container formats the backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    /// Parse the backend's format label.
    pub fn from_label(label: &str) -> VisageResult<Self> {
        match label.to_ascii_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "wav" => Ok(AudioFormat::Wav),
            other => Err(VisageError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
        }
    }
}

/// Wire shape of one timed viseme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisemeEventDto {
    pub viseme_id: u8,
    /// Seconds from audio start.
    pub time_offset: f64,
    /// Seconds; the backend omits it for legacy alignments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl From<VisemeEventDto> for VisemeEvent {
    fn from(dto: VisemeEventDto) -> Self {
        let duration = match dto.duration {
            Some(secs) if secs.is_finite() && secs > 0.0 => Duration::from_secs_f64(secs),
            Some(_) => Duration::ZERO,
            None => VisemeEvent::DEFAULT_DURATION,
        };
        VisemeEvent::new(
            VisemeId::new(dto.viseme_id),
            MediaTime::from_secs_f64(dto.time_offset),
            duration,
        )
    }
}

/// Wire shape of a successful synthesis response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSpeechResponse {
    pub success: bool,
    /// Base64-encoded audio bytes.
    pub audio_data: String,
    /// Clip length in seconds.
    pub duration: f64,
    pub visemes: Vec<VisemeEventDto>,
    pub sample_rate: u32,
    pub format: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub language: String,
}

/// A decoded, playable utterance.
#[derive(Debug, Clone)]
pub struct SpeechClip {
    pub audio: Vec<u8>,
    pub format: AudioFormat,
    pub sample_rate: u32,
    pub duration: Duration,
    pub visemes: Vec<VisemeEvent>,
    pub text: String,
    pub language: String,
}

impl SpeechClip {
    /// Decode a raw backend response body.
    pub fn from_json(body: &str) -> VisageResult<Self> {
        let response: GenerateSpeechResponse = serde_json::from_str(body)
            .map_err(|err| VisageError::Clip(format!("invalid response body: {err}")))?;
        Self::try_from(response)
    }

    /// Build the lookup track for this clip's viseme list.
    pub fn track(&self) -> VisemeTrack {
        VisemeTrack::new(self.visemes.clone())
    }
}

impl TryFrom<GenerateSpeechResponse> for SpeechClip {
    type Error = VisageError;

    fn try_from(response: GenerateSpeechResponse) -> VisageResult<Self> {
        if !response.success {
            return Err(VisageError::Clip("backend reported failure".to_string()));
        }
        let audio = BASE64
            .decode(response.audio_data.as_bytes())
            .map_err(|err| VisageError::Clip(format!("bad audio payload: {err}")))?;
        let format = AudioFormat::from_label(&response.format)?;
        let duration = if response.duration.is_finite() && response.duration > 0.0 {
            Duration::from_secs_f64(response.duration)
        } else {
            Duration::ZERO
        };

        Ok(SpeechClip {
            audio,
            format,
            sample_rate: response.sample_rate,
            duration,
            visemes: response.visemes.into_iter().map(VisemeEvent::from).collect(),
            text: response.text,
            language: response.language,
        })
    }
}
