//! Caller-facing facade over the stateless pipeline components.

use crate::{
    config::{Config, get_config},
    metrics::{UsageMetrics, UsageSnapshot},
    processing::{
        answer::{NO_ANSWER_MESSAGE, document_confidence, resolve},
        extract::extract,
        speech::{SpeechEstimate, estimate_speech},
        summarize::SummaryReport,
        types::{
            Confidence, ConversationRecord, DescribeError, DocumentKind, ExtractedDocument,
            ExtractionError, InvalidUserId, ServiceType, UserId,
        },
        vision::{answer_visual, classify_visual_question, describe_image},
    },
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by [`DocumentService`].
///
/// Input-validation failures are kept apart from processing failures so that an outer layer can
/// map them to different responses.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Text to summarize or narrate was blank.
    #[error("Text cannot be empty")]
    EmptyText,
    /// Question was blank.
    #[error("Question cannot be empty")]
    EmptyQuestion,
    /// Caller identity was blank.
    #[error(transparent)]
    InvalidUser(#[from] InvalidUserId),
    /// Document bytes could not be turned into text.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    /// Image bytes could not be described.
    #[error(transparent)]
    Describe(#[from] DescribeError),
}

impl ServiceError {
    /// True for failures caused by the caller's input rather than by parsing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyText | Self::EmptyQuestion | Self::InvalidUser(_)
        )
    }
}

/// Result of ingesting an uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    /// Name the document was uploaded under.
    pub filename: String,
    /// Extracted text and its metadata.
    pub document: ExtractedDocument,
    /// Short preview of the extracted text.
    pub preview: String,
}

/// Answer to a question about a stored document.
#[derive(Debug, Clone, Serialize)]
pub struct QaOutcome {
    /// Answer text.
    pub answer: String,
    /// Confidence label derived from the answer length.
    pub confidence: Confidence,
    /// Record for the caller to persist.
    pub record: ConversationRecord,
}

/// Answer to a question about an uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct VisualOutcome {
    /// Answer text.
    pub answer: String,
    /// Metadata description the answer was built from.
    pub image_analysis: String,
    /// Configured visual confidence.
    pub confidence: Confidence,
    /// Record for the caller to persist.
    pub record: ConversationRecord,
}

/// Summary produced for a caller.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    /// Summary text and statistics.
    #[serde(flatten)]
    pub report: SummaryReport,
    /// Record for the caller to persist.
    pub record: ConversationRecord,
}

/// Narration estimate produced for a caller.
#[derive(Debug, Clone, Serialize)]
pub struct SpeechOutcome {
    /// Word count and duration.
    #[serde(flatten)]
    pub estimate: SpeechEstimate,
    /// Record for the caller to persist.
    pub record: ConversationRecord,
}

/// Abstraction over the pipeline used by external surfaces (CLI, batch ingestion).
pub trait DocumentIntelligence: Send + Sync {
    /// Extract text from an uploaded file, picking the reader from its extension.
    fn ingest(
        &self,
        user: &UserId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, ServiceError>;

    /// Answer a question over previously extracted text.
    fn ask_document(
        &self,
        user: &UserId,
        document_id: Option<&str>,
        context: &str,
        question: &str,
    ) -> Result<QaOutcome, ServiceError>;

    /// Answer a question about an image.
    fn ask_image(
        &self,
        user: &UserId,
        bytes: &[u8],
        question: &str,
    ) -> Result<VisualOutcome, ServiceError>;

    /// Summarize text, using the configured bound when `max_length` is `None`.
    fn summarize(
        &self,
        user: &UserId,
        text: &str,
        max_length: Option<usize>,
    ) -> Result<SummaryOutcome, ServiceError>;

    /// Estimate narration for text.
    fn speak(
        &self,
        user: &UserId,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SpeechOutcome, ServiceError>;

    /// Retrieve the current usage snapshot.
    fn usage(&self) -> UsageSnapshot;
}

/// Composes extraction, summarization, and question answering for one process.
///
/// The service holds no per-request state; its only shared state is the atomic usage counters,
/// so a single instance can be shared behind an `Arc` across threads.
pub struct DocumentService {
    config: Config,
    metrics: Arc<UsageMetrics>,
}

impl DocumentService {
    /// Build a service from the global configuration.
    pub fn new() -> Self {
        Self::with_config(get_config().clone())
    }

    /// Build a service from an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            metrics: Arc::new(UsageMetrics::new()),
        }
    }

    /// Configuration the service was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extract text from an uploaded file.
    pub fn ingest(
        &self,
        user: &UserId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, ServiceError> {
        let kind = DocumentKind::from_filename(filename)?;
        let document = extract(bytes, kind).inspect_err(|error| {
            tracing::warn!(user = %user, filename, kind = %kind, error = %error, "Extraction failed");
        })?;
        self.metrics.record_document();
        tracing::info!(
            user = %user,
            filename,
            kind = %kind,
            characters = document.characters,
            "Document processed"
        );
        let preview = document.preview(self.config.preview_chars);
        Ok(IngestOutcome {
            filename: filename.to_string(),
            document,
            preview,
        })
    }

    /// Answer a question over previously extracted text.
    pub fn ask_document(
        &self,
        user: &UserId,
        document_id: Option<&str>,
        context: &str,
        question: &str,
    ) -> Result<QaOutcome, ServiceError> {
        if question.trim().is_empty() {
            return Err(ServiceError::EmptyQuestion);
        }
        if context.trim().is_empty() {
            return Err(ServiceError::EmptyText);
        }
        let (intent, answer) = match resolve(context, question) {
            Some((intent, text)) => (Some(intent), text),
            None => (None, NO_ANSWER_MESSAGE.to_string()),
        };
        let confidence = document_confidence(&answer, self.config.high_confidence_min_chars);
        tracing::info!(
            user = %user,
            document_id,
            intent = ?intent,
            confidence = ?confidence,
            "Document question answered"
        );
        let record = self.record(
            user,
            document_id.map(str::to_string),
            question.to_string(),
            answer.clone(),
            ServiceType::DocumentQa,
        );
        Ok(QaOutcome {
            answer,
            confidence,
            record,
        })
    }

    /// Answer a question about an image.
    pub fn ask_image(
        &self,
        user: &UserId,
        bytes: &[u8],
        question: &str,
    ) -> Result<VisualOutcome, ServiceError> {
        if question.trim().is_empty() {
            return Err(ServiceError::EmptyQuestion);
        }
        let image_analysis = describe_image(bytes).inspect_err(|error| {
            tracing::warn!(user = %user, error = %error, "Image analysis failed");
        })?;
        let answer = answer_visual(&image_analysis, question);
        tracing::info!(
            user = %user,
            intent = ?classify_visual_question(question),
            "Visual question answered"
        );
        let record = self.record(
            user,
            None,
            question.to_string(),
            answer.clone(),
            ServiceType::VisualQa,
        );
        Ok(VisualOutcome {
            answer,
            image_analysis,
            confidence: self.config.visual_confidence,
            record,
        })
    }

    /// Summarize text.
    pub fn summarize(
        &self,
        user: &UserId,
        text: &str,
        max_length: Option<usize>,
    ) -> Result<SummaryOutcome, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::EmptyText);
        }
        let max_length = max_length.unwrap_or(self.config.summary_max_length);
        let report = SummaryReport::build(text, max_length);
        tracing::info!(
            user = %user,
            max_length,
            original_length = report.original_length,
            summary_length = report.summary_length,
            "Summary generated"
        );
        let record = self.record(
            user,
            None,
            format!("Summarize text (max {max_length} chars)"),
            report.summary.clone(),
            ServiceType::Summarization,
        );
        Ok(SummaryOutcome { report, record })
    }

    /// Estimate narration for text.
    pub fn speak(
        &self,
        user: &UserId,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SpeechOutcome, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::EmptyText);
        }
        let estimate = estimate_speech(text, voice, self.config.speech_seconds_per_word);
        tracing::info!(
            user = %user,
            voice = %estimate.voice,
            words = estimate.word_count,
            "Speech estimate generated"
        );
        let record = self.record(
            user,
            None,
            format!("Convert to speech using {} voice", estimate.voice),
            format!(
                "Text-to-speech conversion completed for {} words",
                estimate.word_count
            ),
            ServiceType::TextToSpeech,
        );
        Ok(SpeechOutcome { estimate, record })
    }

    /// Return the current usage snapshot.
    pub fn usage(&self) -> UsageSnapshot {
        self.metrics.snapshot()
    }

    fn record(
        &self,
        user: &UserId,
        document_id: Option<String>,
        question: String,
        answer: String,
        service_type: ServiceType,
    ) -> ConversationRecord {
        self.metrics.record_conversation(service_type);
        ConversationRecord::new(user, document_id, question, answer, service_type)
    }
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentIntelligence for DocumentService {
    fn ingest(
        &self,
        user: &UserId,
        filename: &str,
        bytes: &[u8],
    ) -> Result<IngestOutcome, ServiceError> {
        DocumentService::ingest(self, user, filename, bytes)
    }

    fn ask_document(
        &self,
        user: &UserId,
        document_id: Option<&str>,
        context: &str,
        question: &str,
    ) -> Result<QaOutcome, ServiceError> {
        DocumentService::ask_document(self, user, document_id, context, question)
    }

    fn ask_image(
        &self,
        user: &UserId,
        bytes: &[u8],
        question: &str,
    ) -> Result<VisualOutcome, ServiceError> {
        DocumentService::ask_image(self, user, bytes, question)
    }

    fn summarize(
        &self,
        user: &UserId,
        text: &str,
        max_length: Option<usize>,
    ) -> Result<SummaryOutcome, ServiceError> {
        DocumentService::summarize(self, user, text, max_length)
    }

    fn speak(
        &self,
        user: &UserId,
        text: &str,
        voice: Option<&str>,
    ) -> Result<SpeechOutcome, ServiceError> {
        DocumentService::speak(self, user, text, voice)
    }

    fn usage(&self) -> UsageSnapshot {
        DocumentService::usage(self)
    }
}
