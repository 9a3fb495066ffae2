//! Core data types and error definitions for the document pipeline.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

/// Media kind asserted by the caller, usually derived from a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    /// Portable Document Format.
    Pdf,
    /// Office Open XML word-processing document.
    Docx,
    /// UTF-8 text, including markdown.
    PlainText,
    /// Raster image handled by the image describer.
    Image,
}

impl DocumentKind {
    /// Map a file extension (without the dot) to a declared kind, ignoring case.
    pub fn from_extension(extension: &str) -> Result<Self, ExtractionError> {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" | "md" => Ok(Self::PlainText),
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" => Ok(Self::Image),
            other => Err(ExtractionError::UnsupportedKind(other.to_string())),
        }
    }

    /// Map a filename or path to a declared kind using its extension.
    pub fn from_filename(filename: &str) -> Result<Self, ExtractionError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|value| value.to_str())
            .ok_or_else(|| ExtractionError::UnsupportedKind(filename.to_string()))?;
        Self::from_extension(extension)
    }

    /// Short lower-case label used in logs and JSON output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "plain-text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while turning document bytes into text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    /// The declared kind has no text extractor.
    #[error("Unsupported file type: {0}")]
    UnsupportedKind(String),
    /// The PDF could not be parsed.
    #[error("Error extracting PDF text: {0}")]
    Pdf(String),
    /// The DOCX archive could not be parsed.
    #[error("Error extracting DOCX text: {0}")]
    Docx(String),
    /// Plain-text input was not valid UTF-8.
    #[error("Plain text is not valid UTF-8: {0}")]
    InvalidUtf8(String),
}

/// Errors raised while reading image metadata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescribeError {
    /// The bytes did not match any known image signature.
    #[error("Unrecognized image format")]
    UnknownFormat,
    /// The header could not be read to obtain dimensions.
    #[error("Error analyzing image: {0}")]
    Decode(String),
}

/// Plain text recovered from an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedDocument {
    /// Declared kind the text was extracted as.
    pub kind: DocumentKind,
    /// Extracted text.
    pub text: String,
    /// Number of characters in `text`.
    pub characters: usize,
    /// Hex-encoded SHA-256 of `text`.
    pub content_hash: String,
}

impl ExtractedDocument {
    pub(crate) fn new(kind: DocumentKind, text: String) -> Self {
        let characters = text.chars().count();
        let content_hash = hex::encode(Sha256::digest(text.as_bytes()));
        Self {
            kind,
            text,
            characters,
            content_hash,
        }
    }

    /// First `limit` characters of the text, followed by `...` when the text is longer.
    pub fn preview(&self, limit: usize) -> String {
        if self.characters <= limit {
            return self.text.clone();
        }
        let mut preview: String = self.text.chars().take(limit).collect();
        preview.push_str("...");
        preview
    }
}

/// Confidence label attached to answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    /// Answer is long enough to be considered well supported.
    High,
    /// Default label for heuristic answers.
    Medium,
}

impl std::str::FromStr for Confidence {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            _ => Err(()),
        }
    }
}

/// Service that produced a conversation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Question answered over stored document text.
    DocumentQa,
    /// Question answered over an uploaded image.
    VisualQa,
    /// Extractive summary.
    Summarization,
    /// Narration estimate.
    TextToSpeech,
}

impl ServiceType {
    /// Stable identifier persisted alongside conversation records.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocumentQa => "document_qa",
            Self::VisualQa => "visual_qa",
            Self::Summarization => "summarization",
            Self::TextToSpeech => "text_to_speech",
        }
    }
}

/// Caller identity threaded through every service call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

/// Error returned when a caller identity is blank.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("user id must not be empty")]
pub struct InvalidUserId;

impl UserId {
    /// Build a user id, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidUserId> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidUserId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Question/answer pair handed back to the caller for persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationRecord {
    /// Random identifier for the record.
    pub id: Uuid,
    /// Caller that issued the request.
    pub user_id: UserId,
    /// Stored document the question referred to, when any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Question text, or a generated description of the request.
    pub question: String,
    /// Text returned to the caller.
    pub answer: String,
    /// Service that handled the request.
    pub service_type: ServiceType,
    /// Creation time in RFC 3339 (UTC).
    pub created_at: String,
}

impl ConversationRecord {
    pub(crate) fn new(
        user_id: &UserId,
        document_id: Option<String>,
        question: String,
        answer: String,
        service_type: ServiceType,
    ) -> Self {
        let created_at = format_timestamp(OffsetDateTime::now_utc());
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.clone(),
            document_id,
            question,
            answer,
            service_type,
            created_at,
        }
    }
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Failed to format record timestamp");
        String::new()
    })
}
