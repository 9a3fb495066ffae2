use std::sync::atomic::{AtomicU64, Ordering};

use crate::processing::ServiceType;

/// Thread-safe counters describing pipeline usage.
#[derive(Default)]
pub struct UsageMetrics {
    documents_processed: AtomicU64,
    document_qa: AtomicU64,
    visual_qa: AtomicU64,
    summarization: AtomicU64,
    text_to_speech: AtomicU64,
}

impl UsageMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a document whose text was extracted successfully.
    pub fn record_document(&self) {
        self.documents_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one conversation for the given service.
    pub fn record_conversation(&self, service: ServiceType) {
        let counter = match service {
            ServiceType::DocumentQa => &self.document_qa,
            ServiceType::VisualQa => &self.visual_qa,
            ServiceType::Summarization => &self.summarization,
            ServiceType::TextToSpeech => &self.text_to_speech,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> UsageSnapshot {
        let service_usage = ServiceUsage {
            document_qa: self.document_qa.load(Ordering::Relaxed),
            visual_qa: self.visual_qa.load(Ordering::Relaxed),
            summarization: self.summarization.load(Ordering::Relaxed),
            text_to_speech: self.text_to_speech.load(Ordering::Relaxed),
        };
        UsageSnapshot {
            documents_processed: self.documents_processed.load(Ordering::Relaxed),
            questions_answered: service_usage.total(),
            service_usage,
        }
    }
}

/// Conversation counts keyed by service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct ServiceUsage {
    /// Questions answered over extracted documents.
    pub document_qa: u64,
    /// Questions answered over images.
    pub visual_qa: u64,
    /// Summaries produced.
    pub summarization: u64,
    /// Speech estimates produced.
    pub text_to_speech: u64,
}

impl ServiceUsage {
    fn total(&self) -> u64 {
        self.document_qa + self.visual_qa + self.summarization + self.text_to_speech
    }
}

/// Immutable view of usage counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct UsageSnapshot {
    /// Number of documents extracted since startup.
    pub documents_processed: u64,
    /// Total conversations across every service.
    pub questions_answered: u64,
    /// Per-service breakdown of `questions_answered`.
    pub service_usage: ServiceUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_documents_and_conversations() {
        let metrics = UsageMetrics::new();
        metrics.record_document();
        metrics.record_conversation(ServiceType::DocumentQa);
        metrics.record_conversation(ServiceType::DocumentQa);
        metrics.record_conversation(ServiceType::Summarization);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_processed, 1);
        assert_eq!(snapshot.questions_answered, 3);
        assert_eq!(snapshot.service_usage.document_qa, 2);
        assert_eq!(snapshot.service_usage.summarization, 1);
        assert_eq!(snapshot.service_usage.visual_qa, 0);
    }

    #[test]
    fn snapshot_is_consistent() {
        let metrics = UsageMetrics::new();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_processed, 0);
        assert_eq!(snapshot.questions_answered, 0);
        assert_eq!(snapshot.service_usage, ServiceUsage::default());
    }
}
