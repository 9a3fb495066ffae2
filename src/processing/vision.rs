//! Metadata-only image descriptions and templated visual answers.
//!
//! No pixels are decoded: the describer reads the format signature and the header dimensions,
//! and the visual answerer wraps that description in a template picked by question intent.

use image::{ImageFormat, ImageReader};
use std::io::Cursor;

use super::sentences::contains_any;
use super::types::DescribeError;

/// Describe an image from its format and pixel dimensions.
pub fn describe_image(bytes: &[u8]) -> Result<String, DescribeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|err| DescribeError::Decode(err.to_string()))?;
    let format = reader.format().ok_or(DescribeError::UnknownFormat)?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|err| DescribeError::Decode(err.to_string()))?;
    tracing::debug!(format = ?format, width, height, "Read image header");

    Ok(format!(
        "Image analysis: This appears to be a {} image with dimensions {width}x{height} pixels. \
         The image contains visual content that could include diagrams, charts, text, or other \
         educational materials.",
        format_label(format)
    ))
}

fn format_label(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".into(),
        ImageFormat::Jpeg => "JPEG".into(),
        ImageFormat::Gif => "GIF".into(),
        ImageFormat::WebP => "WEBP".into(),
        ImageFormat::Bmp => "BMP".into(),
        ImageFormat::Tiff => "TIFF".into(),
        ImageFormat::Ico => "ICO".into(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Question category used to pick a visual answer template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualIntent {
    /// What is shown in the image.
    Descriptive,
    /// Why or how the image means something.
    Explanatory,
    /// Colour and brightness.
    Color,
    /// Size, resolution, and quality.
    Technical,
    /// Anything else.
    General,
}

struct VisualRule {
    intent: VisualIntent,
    triggers: &'static [&'static str],
}

const VISUAL_RULES: &[VisualRule] = &[
    VisualRule {
        intent: VisualIntent::Descriptive,
        triggers: &["what", "describe", "see", "show", "content"],
    },
    VisualRule {
        intent: VisualIntent::Explanatory,
        triggers: &["how", "why", "explain", "meaning"],
    },
    VisualRule {
        intent: VisualIntent::Color,
        triggers: &["color", "colours", "bright", "dark"],
    },
    VisualRule {
        intent: VisualIntent::Technical,
        triggers: &["size", "dimension", "resolution", "quality"],
    },
];

/// Classify a visual question; the first rule whose trigger appears in it wins.
pub fn classify_visual_question(question: &str) -> VisualIntent {
    let question = question.to_lowercase();
    VISUAL_RULES
        .iter()
        .find(|rule| contains_any(&question, rule.triggers))
        .map_or(VisualIntent::General, |rule| rule.intent)
}

/// Wrap an image description in the template matching the question's intent.
///
/// The question is echoed verbatim.
pub fn answer_visual(description: &str, question: &str) -> String {
    match classify_visual_question(question) {
        VisualIntent::Descriptive => format!(
            "Based on my analysis of this image:\n\n{description}\n\nTo answer your question '{question}': The image contains visual elements that I've analyzed above. The technical and visual characteristics suggest this could be useful for educational purposes."
        ),
        VisualIntent::Explanatory => format!(
            "Here's my analysis to help explain what you're seeing:\n\n{description}\n\nRegarding '{question}': Based on the visual characteristics, this image appears to be educational content. The analysis above provides insights into its structure and potential use cases."
        ),
        VisualIntent::Color => format!(
            "Focusing on the visual aspects you asked about:\n\n{description}\n\nFor your question '{question}': The color and brightness analysis above should help answer your specific inquiry about the visual properties of this image."
        ),
        VisualIntent::Technical => format!(
            "Here are the technical specifications:\n\n{description}\n\nRegarding '{question}': The technical details section above provides the specific information you're looking for about the image properties."
        ),
        VisualIntent::General => format!(
            "Here's a comprehensive analysis of your image:\n\n{description}\n\nFor your question '{question}': This analysis should provide the context needed to understand the image content and its potential educational applications."
        ),
    }
}
