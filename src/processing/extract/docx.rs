use docx_rs::{DocumentChild, InsertChild, Paragraph, ParagraphChild, Run, RunChild, read_docx};

use crate::processing::types::ExtractionError;

/// Extract body paragraphs in document order, joined with newlines.
///
/// Paragraphs nested inside tables are not body paragraphs and are skipped.
pub(super) fn extract_docx_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    let docx = read_docx(bytes).map_err(|err| ExtractionError::Docx(err.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();
    tracing::trace!(paragraphs = paragraphs.len(), "Read DOCX paragraphs");

    Ok(paragraphs.join("\n").trim().to_string())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &paragraph.children);
    text
}

// Hyperlinks and tracked insertions wrap ordinary runs; deletions are not part of the text.
fn push_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(text, run),
            ParagraphChild::Hyperlink(link) => push_children(text, &link.children),
            ParagraphChild::Insert(insert) => {
                for part in &insert.children {
                    if let InsertChild::Run(run) = part {
                        push_run(text, run);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(text: &mut String, run: &Run) {
    for part in &run.children {
        match part {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
