//! Extractive summarization over a fixed first/middle/last sentence selection.

use serde::Serialize;

use super::sentences::{split_sentences, truncate_with_ellipsis};

/// Message returned when there is nothing to summarize.
pub const NO_TEXT_MESSAGE: &str = "No text provided for summarization.";
/// Length budget reserved for the `". "` joining two sentences.
const SEPARATOR_CHARS: usize = 2;

/// Build an extractive summary no longer than `max_length` characters.
///
/// The first sentence is always kept. When there are more than two sentences the middle one
/// and then the last one are added, each only if it still fits the budget.
pub fn summarize(text: &str, max_length: usize) -> String {
    if text.trim().is_empty() {
        return NO_TEXT_MESSAGE.to_string();
    }
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let text = text.trim();
    if char_len(text) <= max_length {
        return text.to_string();
    }

    let sentences = split_sentences(text);
    if sentences.len() <= 1 {
        return truncate_with_ellipsis(text, max_length);
    }

    let mut selected = vec![sentences[0]];
    let mut used = char_len(sentences[0]);
    if sentences.len() > 2 {
        let middle = sentences.len() / 2;
        let last = sentences.len() - 1;
        for index in [middle, last] {
            let sentence = sentences[index];
            let cost = char_len(sentence) + SEPARATOR_CHARS;
            if used + cost <= max_length {
                selected.push(sentence);
                used += cost;
            }
        }
    }

    let mut summary = selected.join(". ");
    if !summary.ends_with('.') {
        summary.push('.');
    }
    truncate_with_ellipsis(&summary, max_length)
}

/// Summary together with the length statistics reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    /// Extractive summary text.
    pub summary: String,
    /// Characters in the input text.
    pub original_length: usize,
    /// Characters in the summary.
    pub summary_length: usize,
    /// Share of the input removed, formatted like `"62.5%"`.
    pub compression_ratio: String,
}

impl SummaryReport {
    /// Summarize `text` and compute the accompanying statistics.
    pub fn build(text: &str, max_length: usize) -> Self {
        let summary = summarize(text, max_length);
        let original_length = char_len(text);
        let summary_length = char_len(&summary);
        let ratio = if original_length == 0 {
            0.0
        } else {
            (1.0 - summary_length as f64 / original_length as f64) * 100.0
        };
        Self {
            summary,
            original_length,
            summary_length,
            compression_ratio: format!("{ratio:.1}%"),
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LESSON: &str = "Photosynthesis converts light into chemical energy. \
        Chlorophyll absorbs mostly red and blue light. \
        The light reactions happen in the thylakoid membranes. \
        The Calvin cycle then fixes carbon dioxide into sugars. \
        Oxygen is released as a by-product of splitting water.";

    #[test]
    fn blank_text_yields_fixed_message() {
        assert_eq!(summarize("", 150), NO_TEXT_MESSAGE);
        assert_eq!(summarize("  \t\n", 150), NO_TEXT_MESSAGE);
    }

    #[test]
    fn short_text_is_returned_unchanged() {
        let text = "  Already short enough.  ";
        assert_eq!(summarize(text, 150), text);
    }

    #[test]
    fn trimmed_text_is_returned_when_only_padding_overflows() {
        let text = "   Fits once trimmed.   ";
        assert_eq!(summarize(text, 20), "Fits once trimmed.");
    }

    #[test]
    fn picks_first_middle_and_last_sentences() {
        let summary = summarize(LESSON, 200);
        assert_eq!(
            summary,
            "Photosynthesis converts light into chemical energy. \
             The light reactions happen in the thylakoid membranes. \
             Oxygen is released as a by-product of splitting water."
        );
    }

    #[test]
    fn middle_is_tried_before_last() {
        // First (50) + middle (53 + 2) fits 110; adding the last would not.
        let summary = summarize(LESSON, 110);
        assert_eq!(
            summary,
            "Photosynthesis converts light into chemical energy. \
             The light reactions happen in the thylakoid membranes."
        );
    }

    #[test]
    fn sentence_that_exactly_fills_the_budget_is_kept() {
        // First (50) + middle (53 + 2) is exactly 105; the closing period then forces a cut.
        assert_eq!(
            summarize(LESSON, 105),
            "Photosynthesis converts light into chemical energy. \
             The light reactions happen in the thylakoid membra..."
        );
        assert_eq!(
            summarize(LESSON, 104),
            "Photosynthesis converts light into chemical energy."
        );
    }

    #[test]
    fn two_sentences_keep_only_the_first() {
        let text = "The mitochondria is the powerhouse of the cell. \
                    It produces most of the chemical energy needed.";
        assert_eq!(
            summarize(text, 60),
            "The mitochondria is the powerhouse of the cell."
        );
    }

    #[test]
    fn single_sentence_is_truncated_with_ellipsis() {
        let text = "a single very long run-on sentence without any terminator at all";
        let summary = summarize(text, 20);
        assert_eq!(summary, "a single very lon...");
        assert_eq!(summary.chars().count(), 20);
    }

    #[test]
    fn oversized_first_sentence_is_hard_truncated() {
        let summary = summarize(LESSON, 30);
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), 30);
    }

    #[test]
    fn length_bound_always_holds() {
        for max_length in 0..=LESSON.len() + 5 {
            let summary = summarize(LESSON, max_length);
            assert!(
                summary.chars().count() <= max_length,
                "max_length {max_length} produced {summary:?}"
            );
        }
    }

    #[test]
    fn summarizing_a_summary_is_stable() {
        let once = summarize(LESSON, 150);
        assert_eq!(summarize(&once, 150), once);
    }

    #[test]
    fn report_includes_compression_ratio() {
        let report = SummaryReport::build("abcdefghij", 150);
        assert_eq!(report.summary, "abcdefghij");
        assert_eq!(report.compression_ratio, "0.0%");

        let report = SummaryReport::build(LESSON, 110);
        assert_eq!(report.original_length, LESSON.chars().count());
        assert!(report.summary_length < report.original_length);
        assert!(report.compression_ratio.ends_with('%'));
    }
}
