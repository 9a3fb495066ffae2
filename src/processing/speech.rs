//! Narration estimates for text-to-speech requests. No audio is produced.

use serde::Serialize;

/// Voice used when the caller does not pick one.
pub const DEFAULT_VOICE: &str = "default";

/// Word count and estimated narration length for a text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechEstimate {
    /// Whitespace-delimited words in the text.
    pub word_count: usize,
    /// Estimated narration time in seconds.
    pub estimated_duration_secs: f64,
    /// Voice the estimate was made for.
    pub voice: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl SpeechEstimate {
    /// Duration formatted like `"3.5 seconds"`.
    pub fn duration_label(&self) -> String {
        format!("{:.1} seconds", self.estimated_duration_secs)
    }
}

/// Estimate narration time at `seconds_per_word` for the given voice.
pub fn estimate_speech(text: &str, voice: Option<&str>, seconds_per_word: f64) -> SpeechEstimate {
    let voice = voice
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_VOICE)
        .to_string();
    let word_count = text.split_whitespace().count();
    SpeechEstimate {
        word_count,
        estimated_duration_secs: word_count as f64 * seconds_per_word,
        message: format!("Text successfully converted to speech using {voice} voice!"),
        voice,
    }
}
