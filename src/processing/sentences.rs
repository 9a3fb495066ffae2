//! Sentence and keyword helpers shared by the summarizer and the answerers.

/// Sentences shorter than this (after trimming) are treated as noise.
const MIN_SENTENCE_CHARS: usize = 10;
/// Question words of this length or shorter never participate in matching.
const MAX_STOPWORD_CHARS: usize = 3;

/// Split text on `.`, `!`, and `?`, keeping trimmed sentences longer than ten characters.
pub(crate) fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .collect()
}

/// Lower-cased question words usable for matching, with edge punctuation stripped.
pub(crate) fn question_keywords(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| word.chars().count() > MAX_STOPWORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// True when `haystack` contains any of `needles` as a substring.
pub(crate) fn contains_any<S: AsRef<str>>(haystack: &str, needles: &[S]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(needle.as_ref()))
}

/// Cut `text` to at most `max_chars` characters, marking the cut with `...` when it fits.
pub(crate) fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < ELLIPSIS.len() {
        return text.chars().take(max_chars).collect();
    }
    let mut truncated: String = text.chars().take(max_chars - ELLIPSIS.len()).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
