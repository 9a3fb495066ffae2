//! Document intelligence pipeline: extraction, summarization, and heuristic answering.

pub mod answer;
pub mod extract;
mod sentences;
mod service;
pub mod speech;
pub mod summarize;
pub mod types;
pub mod vision;

pub use answer::{QuestionIntent, answer, document_confidence};
pub use extract::extract;
pub use service::{
    DocumentIntelligence, DocumentService, IngestOutcome, QaOutcome, ServiceError, SpeechOutcome,
    SummaryOutcome, VisualOutcome,
};
pub use speech::{SpeechEstimate, estimate_speech};
pub use summarize::{SummaryReport, summarize};
pub use types::{
    Confidence, ConversationRecord, DescribeError, DocumentKind, ExtractedDocument,
    ExtractionError, InvalidUserId, ServiceType, UserId,
};
pub use vision::{VisualIntent, answer_visual, classify_visual_question, describe_image};
