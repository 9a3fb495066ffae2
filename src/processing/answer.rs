//! Keyword-driven question answering over extracted document text.
//!
//! Intents are an ordered rule table. A rule applies when the lower-cased question contains one
//! of its trigger words; the first applicable rule whose handler finds an answer wins, otherwise
//! evaluation continues with the next rule. Sentences here are split on `.` only and are not
//! length-filtered, unlike the summarizer.

use super::sentences::{contains_any, question_keywords};
use super::types::Confidence;

/// Returned when either the context or the question is blank.
pub const MISSING_INPUT_MESSAGE: &str = "Please provide both context and a question.";
/// Returned when no rule produced an answer.
pub const NO_ANSWER_MESSAGE: &str = "I couldn't find a specific answer to your question in the provided context. Please try rephrasing your question or provide more relevant content.";

const PROCESS_MARKERS: &[&str] = &["first", "then", "next", "step", "process"];
const MAX_PROCESS_SENTENCES: usize = 3;
const MAX_RELEVANT_SENTENCES: usize = 2;

/// Question category that produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionIntent {
    /// "What is ..." style questions answered with one matching sentence.
    Definitional,
    /// "How do I ..." style questions answered with sequencing sentences.
    Process,
    /// Any question answered with sentences sharing its keywords.
    Relevant,
}

type Handler = fn(context: &str, keywords: &[String]) -> Option<String>;

struct IntentRule {
    intent: QuestionIntent,
    /// An empty trigger list applies to every question.
    triggers: &'static [&'static str],
    handler: Handler,
}

impl IntentRule {
    fn applies_to(&self, question: &str) -> bool {
        self.triggers.is_empty() || contains_any(question, self.triggers)
    }
}

const RULES: &[IntentRule] = &[
    IntentRule {
        intent: QuestionIntent::Definitional,
        triggers: &["what", "define", "definition"],
        handler: first_keyword_sentence,
    },
    IntentRule {
        intent: QuestionIntent::Process,
        triggers: &["how", "process", "steps"],
        handler: process_sentences,
    },
    IntentRule {
        intent: QuestionIntent::Relevant,
        triggers: &[],
        handler: relevant_sentences,
    },
];

/// Answer `question` from `context` using the ordered keyword rules.
pub fn answer(context: &str, question: &str) -> String {
    if context.trim().is_empty() || question.trim().is_empty() {
        return MISSING_INPUT_MESSAGE.to_string();
    }
    resolve(context, question)
        .map(|(_, text)| text)
        .unwrap_or_else(|| NO_ANSWER_MESSAGE.to_string())
}

/// Evaluate the rule table, returning the winning intent and its answer.
pub(crate) fn resolve(context: &str, question: &str) -> Option<(QuestionIntent, String)> {
    let question = question.to_lowercase();
    let keywords = question_keywords(&question);
    RULES
        .iter()
        .filter(|rule| rule.applies_to(&question))
        .find_map(|rule| (rule.handler)(context, &keywords).map(|text| (rule.intent, text)))
}

/// `High` when the answer is longer than `high_min_chars` characters, otherwise `Medium`.
pub fn document_confidence(answer: &str, high_min_chars: usize) -> Confidence {
    if answer.chars().count() > high_min_chars {
        Confidence::High
    } else {
        Confidence::Medium
    }
}

fn first_keyword_sentence(context: &str, keywords: &[String]) -> Option<String> {
    context
        .split('.')
        .find(|sentence| contains_any(&sentence.to_lowercase(), keywords))
        .map(|sentence| format!("{}.", sentence.trim()))
}

fn process_sentences(context: &str, _keywords: &[String]) -> Option<String> {
    let steps: Vec<&str> = context
        .split('.')
        .filter(|sentence| contains_any(&sentence.to_lowercase(), PROCESS_MARKERS))
        .map(str::trim)
        .take(MAX_PROCESS_SENTENCES)
        .collect();
    join_sentences(&steps)
}

fn relevant_sentences(context: &str, keywords: &[String]) -> Option<String> {
    let matches: Vec<&str> = context
        .split('.')
        .filter(|sentence| contains_any(&sentence.to_lowercase(), keywords))
        .map(str::trim)
        .take(MAX_RELEVANT_SENTENCES)
        .collect();
    join_sentences(&matches)
}

fn join_sentences(sentences: &[&str]) -> Option<String> {
    if sentences.is_empty() {
        None
    } else {
        Some(format!("{}.", sentences.join(". ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str =
        "Paris is the capital. It is known for the Eiffel Tower. Tourists visit every year.";

    #[test]
    fn blank_inputs_prompt_for_both() {
        assert_eq!(answer("", "What is it?"), MISSING_INPUT_MESSAGE);
        assert_eq!(answer(PARIS, ""), MISSING_INPUT_MESSAGE);
        assert_eq!(answer("   ", "   "), MISSING_INPUT_MESSAGE);
    }

    #[test]
    fn definitional_question_returns_first_matching_sentence() {
        assert_eq!(answer(PARIS, "What is the capital?"), "Paris is the capital.");
        assert_eq!(
            resolve(PARIS, "What is the capital?").map(|(intent, _)| intent),
            Some(QuestionIntent::Definitional)
        );
    }

    #[test]
    fn process_question_collects_up_to_three_steps() {
        let context = "Boil water. First add the pasta. Then stir gently. \
                       Next drain it. The step count is four.";
        assert_eq!(
            answer(context, "How do I cook pasta?"),
            "First add the pasta. Then stir gently. Next drain it."
        );
    }

    #[test]
    fn definitional_falls_through_to_process() {
        let context = "Mix the flour. Then bake for an hour.";
        let resolved = resolve(context, "What are the steps?");
        assert_eq!(
            resolved,
            Some((QuestionIntent::Process, "Then bake for an hour.".to_string()))
        );
    }

    #[test]
    fn fallback_returns_two_relevant_sentences() {
        let context = "Volcanoes erupt magma. Magma cools into rock. \
                       Igneous rock forms from magma. Wind shapes dunes.";
        let resolved = resolve(context, "Tell me about magma");
        assert_eq!(
            resolved,
            Some((
                QuestionIntent::Relevant,
                "Volcanoes erupt magma. Magma cools into rock.".to_string()
            ))
        );
    }

    #[test]
    fn unrelated_context_yields_fixed_message() {
        assert_eq!(answer(PARIS, "Explain photosynthesis"), NO_ANSWER_MESSAGE);
        assert_eq!(answer(PARIS, "Why?"), NO_ANSWER_MESSAGE);
    }

    #[test]
    fn repeated_sentences_are_not_deduplicated() {
        let context = "Atoms bond. Atoms bond. Atoms bond.";
        assert_eq!(answer(context, "Describe atoms"), "Atoms bond. Atoms bond.");
    }

    #[test]
    fn confidence_threshold_is_exclusive() {
        assert_eq!(document_confidence(&"a".repeat(50), 50), Confidence::Medium);
        assert_eq!(document_confidence(&"a".repeat(51), 50), Confidence::High);
    }
}
